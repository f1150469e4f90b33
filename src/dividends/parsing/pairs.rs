use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::AnalysisError;

static YEAR_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("year shape is valid"));
static AMOUNT_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(R\$)?\s*\d[\d.,]*$").expect("amount shape is valid"));

/// Number of leading tokens assumed to be column headers when no year is found.
const HEADER_TOKENS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    pub year: String,
    pub amount: String,
}

pub fn is_year_shaped(token: &str) -> bool {
    YEAR_SHAPE.is_match(token)
}

fn is_amount_shaped(token: &str) -> bool {
    !is_year_shaped(token) && AMOUNT_SHAPE.is_match(token)
}

/// Index of the first data token.
///
/// Normally the first year-shaped token. The data starts one token earlier
/// only when the tokens are laid out as `(amount, year)`: an amount right
/// before the first year, and either the sequence ends on a year or the
/// token after the first year is not an amount. An amount-shaped header such
/// as `Total, R$ 9,00` ahead of `(year, amount)` rows is skipped.
/// Without any year the first two tokens are skipped as headers.
pub fn data_start(tokens: &[String]) -> usize {
    match tokens.iter().position(|t| is_year_shaped(t)) {
        Some(0) => 0,
        Some(first) if is_amount_shaped(&tokens[first - 1]) && amount_first(tokens, first) => {
            first - 1
        }
        Some(first) => first,
        None if tokens.len() > HEADER_TOKENS => HEADER_TOKENS,
        None => 0,
    }
}

fn amount_first(tokens: &[String], first: usize) -> bool {
    let ends_on_year = tokens.last().map_or(false, |t| is_year_shaped(t));
    let amount_follows = tokens.get(first + 1).map_or(false, |t| is_amount_shaped(t));
    ends_on_year || !amount_follows
}

/// Groups the tokens two by two from the data start. A trailing odd token is
/// ignored, as are pairs without any year-shaped element.
pub fn build_pairs(ticker: &str, tokens: &[String]) -> Result<Vec<RawPair>, AnalysisError> {
    let start = data_start(tokens);

    let pairs: Vec<RawPair> = tokens[start..]
        .iter()
        .tuples()
        .filter_map(|(first, second)| {
            if is_year_shaped(first) {
                Some(RawPair {
                    year: first.clone(),
                    amount: second.clone(),
                })
            } else if is_year_shaped(second) {
                Some(RawPair {
                    year: second.clone(),
                    amount: first.clone(),
                })
            } else {
                log::debug!("{}: discarding pair ({}, {})", ticker, first, second);
                None
            }
        })
        .collect();

    log::debug!("{}: {} pairs from offset {}", ticker, pairs.len(), start);

    if pairs.is_empty() {
        return Err(AnalysisError::UnorganizableData {
            ticker: ticker.to_string(),
        });
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn pair(year: &str, amount: &str) -> RawPair {
        RawPair {
            year: year.to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_skips_headers_before_first_year() {
        let t = tokens(&["Ano", "Proventos", "2022", "R$ 1,00", "2023", "R$ 1,50"]);
        assert_eq!(data_start(&t), 2);
        assert_eq!(
            build_pairs("PINE4", &t).unwrap(),
            vec![pair("2022", "R$ 1,00"), pair("2023", "R$ 1,50")]
        );
    }

    #[test]
    fn test_amount_before_year() {
        let t = tokens(&["Proventos", "Ano", "R$ 1,00", "2022", "R$ 1,50", "2023"]);
        assert_eq!(data_start(&t), 2);
        assert_eq!(
            build_pairs("PINE4", &t).unwrap(),
            vec![pair("2022", "R$ 1,00"), pair("2023", "R$ 1,50")]
        );
    }

    #[test]
    fn test_amount_shaped_header_before_year_first_rows() {
        let t = tokens(&["Total", "R$ 9,00", "2022", "R$ 1,00", "2023", "R$ 1,50"]);
        assert_eq!(data_start(&t), 2);
        assert_eq!(
            build_pairs("PINE4", &t).unwrap(),
            vec![pair("2022", "R$ 1,00"), pair("2023", "R$ 1,50")]
        );
    }

    #[test]
    fn test_no_year_assumes_two_header_tokens() {
        let t = tokens(&["a", "b", "c", "d"]);
        assert_eq!(data_start(&t), 2);
        assert!(matches!(
            build_pairs("PINE4", &t),
            Err(AnalysisError::UnorganizableData { .. })
        ));
    }

    #[test]
    fn test_drops_pairs_without_year_and_odd_tail() {
        let t = tokens(&["2022", "R$ 1,00", "Total", "R$ 9,00", "2023", "R$ 2,00", "2024"]);
        assert_eq!(
            build_pairs("PINE4", &t).unwrap(),
            vec![pair("2022", "R$ 1,00"), pair("2023", "R$ 2,00")]
        );
    }
}
