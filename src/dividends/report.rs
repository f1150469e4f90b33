use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::core::config::ProjectorConfig;
use crate::core::types::{AnalysisResult, Scenario};

pub const CURRENCY: &str = "R$";

pub fn format_currency(value: f64) -> String {
    format!("{} {:.2}", CURRENCY, value)
}

pub fn summary_headers(config: &ProjectorConfig) -> Vec<String> {
    let final_year = config.current_year + config.horizon as i32;

    let mut headers = vec![
        "Ticker".to_string(),
        format!("Dividend {}", config.current_year),
        "Avg Var Total".to_string(),
        "Avg Var 5Y".to_string(),
        "Avg Var 2Y".to_string(),
    ];
    headers.extend(
        Scenario::iter().map(|s| format!("Scenario {} ({})", s.number(), final_year)),
    );
    headers
}

/// One summary line: ticker, base amount, the three averages and the last
/// value of each scenario.
pub fn summary_row(result: &AnalysisResult) -> Vec<String> {
    let projection = &result.projection;

    let mut row = vec![result.display_ticker(), format_currency(projection.base_value)];
    row.extend(
        Scenario::iter().map(|s| format!("{:.2}", projection.forecast(s).average_variation)),
    );
    row.extend(Scenario::iter().map(|s| {
        projection
            .forecast(s)
            .final_value()
            .map(format_currency)
            .unwrap_or_default()
    }));
    row
}

pub fn write_summary<W: Write>(
    results: &[AnalysisResult],
    config: &ProjectorConfig,
    writer: W,
) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    writer.write_record(summary_headers(config))?;
    for result in results {
        writer.write_record(summary_row(result))?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_summary_file(
    results: &[AnalysisResult],
    config: &ProjectorConfig,
    path: &Path,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    write_summary(results, config, file)?;
    log::debug!("Saved summary of {} tickers to {:?}", results.len(), path);
    Ok(())
}

pub fn summary_csv(results: &[AnalysisResult], config: &ProjectorConfig) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    write_summary(results, config, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
