pub mod overrides;
pub mod parsing;
pub mod projection;
pub mod report;
pub mod series;
pub mod tickers;

use crate::core::config::ProjectorConfig;
use crate::core::error::AnalysisError;
use crate::core::types::AnalysisResult;

use overrides::OverrideRegistry;
use tickers::Ticker;

/// Runs the whole pipeline on an already fetched page:
/// extract -> pair -> normalize -> override -> cap -> project.
pub fn analyze(
    ticker: &Ticker,
    body: &str,
    config: &ProjectorConfig,
    overrides: &OverrideRegistry,
) -> Result<AnalysisResult, AnalysisError> {
    let code = ticker.code();

    let extraction = {
        let document = parsing::parse_document(&code, body)?;
        parsing::extract_tokens(&code, &document)?
    };
    let low_confidence = extraction.tier.is_low_confidence();
    if low_confidence {
        log::warn!("{}: years and amounts were paired by position only", code);
    }

    let pairs = parsing::build_pairs(&code, &extraction.tokens)?;
    let series = series::normalize(&code, &pairs)?;
    let (series, overridden) = overrides.apply(ticker, series, config);

    let history = series.capped_at(config.current_year);
    let projection =
        projection::project(&history, config).ok_or_else(|| AnalysisError::NoHistoricalData {
            ticker: code.clone(),
            current_year: config.current_year,
        })?;

    log::info!(
        "{}: {} historical years, base {} = {:.2}",
        code,
        history.len(),
        projection.base_year,
        projection.base_value
    );

    Ok(AnalysisResult {
        ticker: code,
        history,
        projection,
        overridden,
        low_confidence,
    })
}
