mod common;

use common::{read_test_file, test_config, ticker};
use dividend_projector::dividends::overrides::OverrideRegistry;
use dividend_projector::{analyze, AnalysisError, ErrorKind, Scenario};

fn years_and_amounts(result: &dividend_projector::AnalysisResult) -> (Vec<i32>, Vec<f64>) {
    (
        result.history.years().collect(),
        result.history.amounts().collect(),
    )
}

#[test]
fn test_featured_card_end_to_end() {
    let body = read_test_file("pine4.html");
    let result = analyze(&ticker("pine4"), &body, &test_config(), &OverrideRegistry::default())
        .unwrap();

    let (years, amounts) = years_and_amounts(&result);
    assert_eq!(result.ticker, "PINE4");
    assert_eq!(years, vec![2022, 2023, 2024]);
    assert_eq!(amounts, vec![1.0, 1.5, 2.0]);
    assert_eq!(result.history.variations(), vec![0.0, 0.5, 0.5]);
    assert!(!result.overridden);
    assert!(!result.low_confidence);

    let projection = &result.projection;
    assert_eq!(projection.base_year, 2024);
    assert_eq!(result.base_value(), 2.0);
    assert!((projection.lifetime.average_variation - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(projection.lifetime.values[0], 2.33);
    assert_eq!(projection.years, vec![2025, 2026, 2027, 2028, 2029]);
}

#[test]
fn test_isae4_override_end_to_end() {
    let body = read_test_file("isae4.html");
    let result = analyze(&ticker("ISAE4"), &body, &test_config(), &OverrideRegistry::default())
        .unwrap();

    let (years, amounts) = years_and_amounts(&result);
    assert!(result.overridden);
    assert_eq!(result.display_ticker(), "ISAE4*");
    assert_eq!(years, vec![2021, 2022, 2023, 2024]);
    assert_eq!(amounts, vec![0.6, 0.8, 0.9, 1.8]);
    assert_eq!(result.history.variations(), vec![0.0, 0.2, 0.1, 0.9]);
    assert_eq!(result.base_value(), 1.8);

    let two_year = result.projection.forecast(Scenario::TwoYear);
    assert_eq!(two_year.average_variation, 0.5);
    assert_eq!(two_year.values, vec![2.3, 2.8, 3.3, 3.8, 4.3]);
}

#[test]
fn test_lookahead_year_dropped_without_override() {
    // Same page under another ticker: no rule, and 2025 still never shows up.
    let body = read_test_file("isae4.html");
    let result = analyze(&ticker("ISAE3"), &body, &test_config(), &OverrideRegistry::default())
        .unwrap();

    assert!(!result.overridden);
    assert_eq!(result.history.last().map(|r| r.year), Some(2024));
    assert_eq!(result.base_value(), 1.0);
}

#[test]
fn test_cents_are_rescaled() {
    let body = read_test_file("cents.html");
    let result = analyze(&ticker("BBAS3"), &body, &test_config(), &OverrideRegistry::default())
        .unwrap();

    let (_, amounts) = years_and_amounts(&result);
    assert_eq!(amounts, vec![1.5, 2.0, 1.75]);
}

#[test]
fn test_any_table_with_reversed_columns_and_gaps() {
    let body = read_test_file("gaps_any_table.html");
    let result = analyze(&ticker("ABCB4"), &body, &test_config(), &OverrideRegistry::default())
        .unwrap();

    let (years, amounts) = years_and_amounts(&result);
    assert_eq!(years, vec![2018, 2019, 2020, 2021, 2022, 2023]);
    assert_eq!(amounts, vec![2.0, 0.0, 2.4, 0.0, 3.0, 3.1]);
    assert!(!result.low_confidence);

    // No 2024 row: the last available year is the base.
    assert_eq!(result.projection.base_year, 2023);
    assert_eq!(result.base_value(), 3.1);
    assert_eq!(result.projection.two_year.average_variation, 1.55);
    assert_eq!(result.projection.two_year.values[0], 4.65);
}

#[test]
fn test_loose_text_is_low_confidence() {
    let body = read_test_file("loose_text.html");
    let result = analyze(&ticker("TAEE11"), &body, &test_config(), &OverrideRegistry::default())
        .unwrap();

    let (years, amounts) = years_and_amounts(&result);
    assert!(result.low_confidence);
    assert_eq!(years, vec![2022, 2023, 2024]);
    assert_eq!(amounts, vec![0.5, 0.7, 1.0]);
}

#[test]
fn test_insufficient_data() {
    let body = read_test_file("empty.html");
    let err = analyze(&ticker("PINE4"), &body, &test_config(), &OverrideRegistry::default())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InsufficientData);
    assert_eq!(err.ticker(), "PINE4");
}

#[test]
fn test_unorganizable_tokens() {
    let body = "<table><tr><td>a</td><td>b</td><td>c</td><td>d</td></tr></table>";
    let err = analyze(&ticker("PINE4"), body, &test_config(), &OverrideRegistry::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnorganizableData);
}

#[test]
fn test_conversion_failure() {
    let body = "<table><tr><td>2022</td><td>n/d</td></tr><tr><td>2023</td><td>-</td></tr></table>";
    let err = analyze(&ticker("PINE4"), body, &test_config(), &OverrideRegistry::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConversionFailure);
}

#[test]
fn test_only_future_years_have_no_history() {
    let body = "<table><tr><td>2026</td><td>R$ 1,00</td></tr><tr><td>2027</td><td>R$ 2,00</td></tr></table>";
    let err = analyze(&ticker("PINE4"), body, &test_config(), &OverrideRegistry::default())
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::NoHistoricalData {
            current_year: 2024,
            ..
        }
    ));
}

#[test]
fn test_plain_text_body_is_parse_failure() {
    let err = analyze(
        &ticker("PINE4"),
        "Too Many Requests",
        &test_config(),
        &OverrideRegistry::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
}
