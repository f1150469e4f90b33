use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::AnalysisError;

static TICKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{4}\d{1,2}$").expect("ticker pattern is valid"));

/// Four letters followed by one or two digits, e.g. `PETR4` or `TAEE11`.
pub fn is_valid_ticker(code: &str) -> bool {
    TICKER_PATTERN.is_match(code)
}

/// A validated ticker, stored lower-case as the data source expects it in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(code: &str) -> Result<Self, AnalysisError> {
        let code = code.trim();
        if !is_valid_ticker(code) {
            return Err(AnalysisError::InvalidTicker {
                ticker: code.to_string(),
            });
        }
        Ok(Ticker(code.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn code(&self) -> String {
        self.0.to_uppercase()
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_uppercase())
    }
}

/// Splits a comma separated list of codes. Empty entries are ignored; codes
/// failing validation come back as `InvalidTicker` errors in input order.
pub fn parse_ticker_list(input: &str) -> (Vec<Ticker>, Vec<AnalysisError>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for code in input.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        match Ticker::new(&code.to_lowercase()) {
            Ok(ticker) => {
                if !valid.contains(&ticker) {
                    valid.push(ticker);
                }
            }
            Err(e) => invalid.push(e),
        }
    }

    (valid, invalid)
}
