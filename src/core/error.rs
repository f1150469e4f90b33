use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Everything that can stop a single ticker's analysis. None of these abort a
/// batch; the runner records them and moves on to the next ticker.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid ticker code: '{ticker}'")]
    InvalidTicker { ticker: String },

    #[error("could not fetch page for {ticker}: {reason}")]
    FetchFailure { ticker: String, reason: String },

    #[error("could not parse page for {ticker}: {reason}")]
    ParseFailure { ticker: String, reason: String },

    #[error("insufficient data for {ticker}: {found} usable tokens")]
    InsufficientData { ticker: String, found: usize },

    #[error("could not organize data for {ticker} into (year, amount) pairs")]
    UnorganizableData { ticker: String },

    #[error("no row of {ticker} could be converted to numbers")]
    ConversionFailure { ticker: String },

    #[error("no historical year up to {current_year} for {ticker}")]
    NoHistoricalData { ticker: String, current_year: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum ErrorKind {
    InvalidTicker,
    FetchFailure,
    ParseFailure,
    InsufficientData,
    UnorganizableData,
    ConversionFailure,
    NoHistoricalData,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::InvalidTicker { .. } => ErrorKind::InvalidTicker,
            AnalysisError::FetchFailure { .. } => ErrorKind::FetchFailure,
            AnalysisError::ParseFailure { .. } => ErrorKind::ParseFailure,
            AnalysisError::InsufficientData { .. } => ErrorKind::InsufficientData,
            AnalysisError::UnorganizableData { .. } => ErrorKind::UnorganizableData,
            AnalysisError::ConversionFailure { .. } => ErrorKind::ConversionFailure,
            AnalysisError::NoHistoricalData { .. } => ErrorKind::NoHistoricalData,
        }
    }

    pub fn ticker(&self) -> &str {
        match self {
            AnalysisError::InvalidTicker { ticker }
            | AnalysisError::FetchFailure { ticker, .. }
            | AnalysisError::ParseFailure { ticker, .. }
            | AnalysisError::InsufficientData { ticker, .. }
            | AnalysisError::UnorganizableData { ticker }
            | AnalysisError::ConversionFailure { ticker }
            | AnalysisError::NoHistoricalData { ticker, .. } => ticker,
        }
    }
}
