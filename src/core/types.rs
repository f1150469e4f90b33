use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::error::AnalysisError;
use crate::dividends::tickers::Ticker;

/// Rounds to currency precision. Works on the exact binary value and sends
/// exact ties to the even cent, so `2.125` becomes `2.12`.
pub fn round_cents(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| (rounded * Decimal::ONE_HUNDRED).to_i64())
        .map(|cents| cents as f64 / 100.0)
        .unwrap_or(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    pub amount: f64,
    pub variation: f64,
}

/// One record per year, contiguous and ascending. Built by
/// `dividends::series::normalize`; every mutation goes through methods that
/// keep `variation` in sync with `amount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualSeries {
    records: Vec<YearRecord>,
}

impl AnnualSeries {
    /// `amounts` must already be sorted by year without gaps.
    pub(crate) fn from_contiguous(amounts: impl IntoIterator<Item = (i32, f64)>) -> Self {
        let mut series = Self {
            records: amounts
                .into_iter()
                .map(|(year, amount)| YearRecord {
                    year,
                    amount,
                    variation: 0.0,
                })
                .collect(),
        };
        series.recompute_variation();
        series
    }

    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.records.iter().map(|r| r.year)
    }

    pub fn amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.amount)
    }

    pub fn variations(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.variation).collect()
    }

    pub fn amount_of(&self, year: i32) -> Option<f64> {
        self.records.iter().find(|r| r.year == year).map(|r| r.amount)
    }

    pub fn last(&self) -> Option<&YearRecord> {
        self.records.last()
    }

    /// Overwrites the amount of an existing year and refreshes variations.
    /// Returns false when the year is not part of the series.
    pub fn set_amount(&mut self, year: i32, amount: f64) -> bool {
        match self.records.iter_mut().find(|r| r.year == year) {
            Some(record) => {
                record.amount = amount;
                self.recompute_variation();
                true
            }
            None => false,
        }
    }

    /// Drops every year after `last_year`. Variations of the kept years do
    /// not depend on later years, so they stay valid.
    pub fn capped_at(&self, last_year: i32) -> Self {
        Self {
            records: self
                .records
                .iter()
                .copied()
                .filter(|r| r.year <= last_year)
                .collect(),
        }
    }

    pub fn recompute_variation(&mut self) {
        let mut previous: Option<f64> = None;
        for record in self.records.iter_mut() {
            record.variation = match previous {
                Some(prev) => round_cents(record.amount - prev),
                None => 0.0,
            };
            previous = Some(record.amount);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Scenario {
    #[strum(to_string = "Total average")]
    Lifetime,
    #[strum(to_string = "5-year average")]
    FiveYear,
    #[strum(to_string = "2-year average")]
    TwoYear,
}

impl Scenario {
    /// How many trailing variations feed the average; `None` means all.
    pub fn window(&self) -> Option<usize> {
        match self {
            Scenario::Lifetime => None,
            Scenario::FiveYear => Some(5),
            Scenario::TwoYear => Some(2),
        }
    }

    pub fn number(&self) -> usize {
        match self {
            Scenario::Lifetime => 1,
            Scenario::FiveYear => 2,
            Scenario::TwoYear => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub scenario: Scenario,
    pub average_variation: f64,
    pub values: Vec<f64>,
}

impl Forecast {
    pub fn final_value(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSet {
    pub base_year: i32,
    pub base_value: f64,
    pub years: Vec<i32>,
    pub lifetime: Forecast,
    pub five_year: Forecast,
    pub two_year: Forecast,
}

impl ProjectionSet {
    pub fn forecast(&self, scenario: Scenario) -> &Forecast {
        match scenario {
            Scenario::Lifetime => &self.lifetime,
            Scenario::FiveYear => &self.five_year,
            Scenario::TwoYear => &self.two_year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: String,
    /// Capped at the current year; the lookahead year never shows up here.
    pub history: AnnualSeries,
    pub projection: ProjectionSet,
    pub overridden: bool,
    /// Set when the tokens came from loose text matching instead of a table.
    pub low_confidence: bool,
}

impl AnalysisResult {
    pub fn base_value(&self) -> f64 {
        self.projection.base_value
    }

    /// Ticker as shown in summaries, with a `*` marker when an override fired.
    pub fn display_ticker(&self) -> String {
        if self.overridden {
            format!("{}*", self.ticker)
        } else {
            self.ticker.clone()
        }
    }
}

/// Where raw dividend pages come from. `fetch::HttpSource` is the production
/// implementation.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, ticker: &Ticker) -> Result<String, AnalysisError>;
}
