use std::collections::BTreeMap;

use crate::core::error::AnalysisError;
use crate::core::types::{round_cents, AnnualSeries};

use super::parsing::RawPair;

/// Mean above which amounts are assumed to be written in cents.
///
/// This is a heuristic, not a unit detector: a payer with a genuine average
/// payout above 100 per share would be scaled down as well.
pub const CENTS_MEAN_THRESHOLD: f64 = 100.0;

/// Parses Brazilian formatted money: `R$ 1.234,56` -> `1234.56`.
/// Negative values are rejected since payouts never are.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => None,
    }
}

pub fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.len() != 4 {
        return None;
    }
    raw.parse().ok()
}

/// Turns raw pairs into a gap-free yearly series.
///
/// Unparseable rows are dropped. If a year shows up twice only its first row
/// is kept. Missing years in between get a zero amount.
pub fn normalize(ticker: &str, pairs: &[RawPair]) -> Result<AnnualSeries, AnalysisError> {
    let mut parsed: BTreeMap<i32, f64> = BTreeMap::new();

    for pair in pairs {
        match (parse_year(&pair.year), parse_amount(&pair.amount)) {
            (Some(year), Some(amount)) => {
                if parsed.contains_key(&year) {
                    log::warn!("{}: duplicate row for {}, keeping the first", ticker, year);
                    continue;
                }
                parsed.insert(year, amount);
            }
            _ => log::debug!("{}: dropping row ({}, {})", ticker, pair.year, pair.amount),
        }
    }

    let (first, last) = match (parsed.keys().next(), parsed.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(AnalysisError::ConversionFailure {
                ticker: ticker.to_string(),
            })
        }
    };

    let mean = parsed.values().sum::<f64>() / parsed.len() as f64;
    if mean > CENTS_MEAN_THRESHOLD {
        log::debug!("{}: mean amount {:.2} looks like cents, rescaling", ticker, mean);
        parsed.values_mut().for_each(|amount| *amount /= 100.0);
    }

    let filled = (first..=last).map(|year| {
        let amount = parsed.get(&year).copied().unwrap_or(0.0);
        (year, round_cents(amount))
    });

    Ok(AnnualSeries::from_contiguous(filled))
}
