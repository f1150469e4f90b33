use strum::IntoEnumIterator;

use crate::core::config::ProjectorConfig;
use crate::core::types::{round_cents, AnnualSeries, Forecast, ProjectionSet, Scenario};

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of the last `window` values, or of all of them for `None`.
pub fn trailing_mean(values: &[f64], window: Option<usize>) -> f64 {
    match window {
        Some(n) => mean(&values[values.len().saturating_sub(n)..]),
        None => mean(values),
    }
}

/// Each period builds on the previous one, rounded to cents at every step.
pub fn cumulative_forecast(base: f64, average: f64, periods: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(periods);
    let mut current = base;
    for _ in 0..periods {
        current = round_cents(current + average);
        values.push(current);
    }
    values
}

/// Projects a history already capped at the current year. Returns `None` for
/// an empty history.
pub fn project(history: &AnnualSeries, config: &ProjectorConfig) -> Option<ProjectionSet> {
    let (base_year, base_value) = match history.amount_of(config.current_year) {
        Some(amount) => (config.current_year, amount),
        None => {
            let last = history.last()?;
            log::debug!(
                "no amount for {}, projecting from {}",
                config.current_year,
                last.year
            );
            (last.year, last.amount)
        }
    };

    let variations = history.variations();
    let mut forecasts = Scenario::iter().map(|scenario| {
        let average_variation = trailing_mean(&variations, scenario.window());
        Forecast {
            scenario,
            average_variation,
            values: cumulative_forecast(base_value, average_variation, config.horizon),
        }
    });

    Some(ProjectionSet {
        base_year,
        base_value,
        years: config.forecast_years(),
        lifetime: forecasts.next()?,
        five_year: forecasts.next()?,
        two_year: forecasts.next()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(rows: &[(i32, f64)]) -> AnnualSeries {
        AnnualSeries::from_contiguous(rows.iter().copied())
    }

    #[test]
    fn test_trailing_mean_windows() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(trailing_mean(&values, None), 3.0);
        assert_eq!(trailing_mean(&values, Some(5)), 4.0);
        assert_eq!(trailing_mean(&values, Some(2)), 5.5);
        assert_eq!(trailing_mean(&values[..1], Some(5)), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_forecast_compounds_from_previous_period() {
        let values = cumulative_forecast(2.0, 1.0 / 3.0, 5);
        assert_eq!(values, vec![2.33, 2.66, 2.99, 3.32, 3.65]);
    }

    #[test]
    fn test_forecast_rounds_exact_ties_to_even() {
        // Trailing mean of 0.10 and 0.15 lands exactly between two cents.
        assert_eq!(cumulative_forecast(2.0, 0.125, 1), vec![2.12]);
        assert_eq!(cumulative_forecast(0.25, 0.125, 1), vec![0.38]);
    }

    #[test]
    fn test_project_uses_current_year_as_base() {
        let config = ProjectorConfig::default();
        let set = project(&history(&[(2022, 1.0), (2023, 1.5), (2024, 2.0)]), &config).unwrap();

        assert_eq!(set.base_year, 2024);
        assert_eq!(set.base_value, 2.0);
        assert_eq!(set.years, vec![2025, 2026, 2027, 2028, 2029]);
        assert!((set.lifetime.average_variation - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(set.two_year.average_variation, 0.5);
        assert_eq!(set.lifetime.values[0], 2.33);
        assert_eq!(set.two_year.final_value(), Some(4.5));
        assert_eq!(set.forecast(Scenario::FiveYear).scenario, Scenario::FiveYear);
    }

    #[test]
    fn test_project_falls_back_to_last_year() {
        let config = ProjectorConfig::default();
        let set = project(&history(&[(2020, 1.0), (2021, 1.2)]), &config).unwrap();
        assert_eq!(set.base_year, 2021);
        assert_eq!(set.base_value, 1.2);
    }

    #[test]
    fn test_project_empty_history() {
        let config = ProjectorConfig::default();
        assert!(project(&AnnualSeries::default(), &config).is_none());
    }
}
