pub mod core;
pub mod dividends;
pub mod fetch;
pub mod utils;

// Re-exports
pub use crate::core::config::ProjectorConfig;
pub use crate::core::error::{AnalysisError, ErrorKind};
pub use crate::core::types::{AnalysisResult, AnnualSeries, DocumentSource, ProjectionSet, Scenario};
pub use crate::dividends::analyze;
pub use crate::dividends::tickers::{is_valid_ticker, Ticker};
pub use crate::fetch::{BatchReport, BatchRunner, BatchStatus, HttpSource};
pub use crate::utils::progress::ProgressTracker;
