use std::collections::HashMap;

use crate::core::config::ProjectorConfig;
use crate::core::types::AnnualSeries;

use super::tickers::Ticker;

/// A correction for one instrument's known source anomaly. Returns the
/// corrected series, or `None` when the rule has nothing to correct.
pub type OverrideRule = fn(&AnnualSeries, &ProjectorConfig) -> Option<AnnualSeries>;

/// Rules keyed by lower-case ticker code.
#[derive(Clone)]
pub struct OverrideRegistry {
    rules: HashMap<String, OverrideRule>,
}

impl Default for OverrideRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("isae4", lookahead_as_current);
        registry
    }
}

impl OverrideRegistry {
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn register(&mut self, code: &str, rule: OverrideRule) {
        self.rules.insert(code.to_lowercase(), rule);
    }

    pub fn has_rule(&self, ticker: &Ticker) -> bool {
        self.rules.contains_key(ticker.as_str())
    }

    /// Runs the ticker's rule, if any. The flag tells whether it fired.
    pub fn apply(
        &self,
        ticker: &Ticker,
        series: AnnualSeries,
        config: &ProjectorConfig,
    ) -> (AnnualSeries, bool) {
        let Some(rule) = self.rules.get(ticker.as_str()) else {
            return (series, false);
        };

        match rule(&series, config) {
            Some(corrected) => {
                log::info!(
                    "{}: override applied, {} now uses the {} amount",
                    ticker,
                    config.current_year,
                    config.lookahead_year()
                );
                (corrected, true)
            }
            None => (series, false),
        }
    }
}

/// The source files the current year's payout under the following year, so
/// the lookahead amount replaces the current one.
pub fn lookahead_as_current(series: &AnnualSeries, config: &ProjectorConfig) -> Option<AnnualSeries> {
    let lookahead = series.amount_of(config.lookahead_year())?;
    let mut corrected = series.clone();
    if corrected.set_amount(config.current_year, lookahead) {
        Some(corrected)
    } else {
        None
    }
}
