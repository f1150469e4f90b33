use anyhow::Result;
use colored::*;
use dividend_projector::{
    core::types::AnalysisResult,
    dividends::report::{self, format_currency},
    BatchRunner, BatchStatus, HttpSource, ProgressTracker, ProjectorConfig, Scenario,
};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use strum::IntoEnumIterator;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "dividend-cli", about = "Project yearly dividends from historical payouts")]
struct Opt {
    /// Comma separated ticker codes, e.g. "PETR4, VALE3, ITUB4"
    #[structopt(default_value = "PINE4, BBAS3, ABCB4")]
    tickers: String,

    /// Write the comparative summary as CSV to this file
    #[structopt(long, parse(from_os_str))]
    csv: Option<PathBuf>,

    /// Print full results as JSON instead of tables
    #[structopt(long)]
    json: bool,

    /// Disable the progress bar
    #[structopt(long)]
    no_progress: bool,
}

fn print_result(result: &AnalysisResult) {
    let projection = &result.projection;

    println!("\n{}", format!("📈 {}", result.ticker).blue().bold());
    if result.overridden {
        println!(
            "{}",
            format!(
                "🔄 {} amount replaced by the reported {} amount",
                projection.base_year,
                projection.base_year + 1
            )
            .yellow()
        );
    }
    if result.low_confidence {
        println!(
            "{}",
            "⚠️ Dividend table not found; years and amounts were matched by position".yellow()
        );
    }

    println!("{:>6} {:>12} {:>10}", "Year", "Dividend", "Variation");
    for record in result.history.records() {
        println!(
            "{:>6} {:>12} {:>10.2}",
            record.year,
            format_currency(record.amount),
            record.variation
        );
    }

    print!("\n{:>6}", "Year");
    for scenario in Scenario::iter() {
        print!(" {:>16}", format!("Scenario {}", scenario.number()));
    }
    println!();
    for (i, year) in projection.years.iter().enumerate() {
        print!("{:>6}", year);
        for scenario in Scenario::iter() {
            let value = projection.forecast(scenario).values.get(i).copied();
            print!(" {:>16}", value.map(format_currency).unwrap_or_default());
        }
        println!();
    }

    println!("\nAverage variation used:");
    for scenario in Scenario::iter() {
        println!(
            "  {:<16} {:.2}",
            scenario.to_string(),
            projection.forecast(scenario).average_variation
        );
    }
}

fn print_summary(results: &[AnalysisResult], config: &ProjectorConfig) {
    println!("\n{}", "📈 Comparative summary".bold());
    println!("{}", report::summary_headers(config).join(" | "));
    for result in results {
        println!("{}", report::summary_row(result).join(" | "));
    }
    if results.iter().any(|r| r.overridden) {
        println!(
            "{}",
            format!(
                "* {} amount taken from the {} report",
                config.current_year,
                config.lookahead_year()
            )
            .dimmed()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    log::debug!("Logger initialized");

    let opt = Opt::from_args();
    let config = ProjectorConfig::from_env()?;

    // Stop between tickers on Ctrl+C; the ticker in flight still completes.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nReceived Ctrl+C, stopping after the current ticker");
        r.store(false, Ordering::SeqCst);
    })?;

    let source = HttpSource::new(&config)?;
    let ticker_count = opt.tickers.split(',').filter(|t| !t.trim().is_empty()).count();
    let progress = if opt.no_progress || opt.json {
        ProgressTracker::hidden()
    } else {
        ProgressTracker::new(ticker_count as u64)
    };

    let runner = BatchRunner::new(source, config.clone())
        .with_progress(progress)
        .with_running_flag(running);

    let report = runner.run_input(&opt.tickers).await;

    for error in report.failures() {
        eprintln!("{}", format!("⚠️ {}", error).yellow());
    }

    let results: Vec<AnalysisResult> = report.results().into_iter().cloned().collect();

    if opt.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            print_result(result);
        }
        if !results.is_empty() {
            print_summary(&results, &config);
        }
    }

    if let Some(path) = &opt.csv {
        if !results.is_empty() {
            report::write_summary_file(&results, &config, path)?;
            println!("📥 Summary written to {}", path.display());
        }
    }

    match report.status() {
        BatchStatus::Complete(n) => {
            eprintln!("{}", format!("✅ {} tickers processed successfully", n).green());
        }
        BatchStatus::Partial(n) => {
            eprintln!(
                "{}",
                format!("✅ {} of {} tickers processed", n, report.outcomes.len()).yellow()
            );
        }
        BatchStatus::Failed => {
            eprintln!("{}", "❌ No ticker was processed successfully".red());
            std::process::exit(1);
        }
    }

    Ok(())
}
