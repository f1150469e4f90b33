use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::error::AnalysisError;

/// Below this many tokens a tier is considered to have missed the data.
pub const MIN_TOKENS: usize = 4;

static FEATURED_CARD_ROWS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.card.featured-card.per-year-chart tr").expect("card selector is valid")
});
static TABLE_ROWS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table tr").expect("table selector is valid"));
static ROW_CELLS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("cell selector is valid"));

static LOOSE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b20\d{2}\b").expect("year pattern is valid"));
static LOOSE_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"R\$\s*\d(?:[\d.,]*\d)?").expect("amount pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ExtractionTier {
    #[strum(to_string = "featured card")]
    FeaturedCard,
    #[strum(to_string = "any table")]
    AnyTable,
    #[strum(to_string = "loose text")]
    LooseText,
}

impl ExtractionTier {
    /// Loose text matching pairs years and amounts purely by position.
    pub fn is_low_confidence(&self) -> bool {
        matches!(self, ExtractionTier::LooseText)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub tier: ExtractionTier,
    pub tokens: Vec<String>,
}

type Strategy = fn(&Html) -> Vec<String>;

const CASCADE: [(ExtractionTier, Strategy); 3] = [
    (ExtractionTier::FeaturedCard, featured_card_tokens),
    (ExtractionTier::AnyTable, any_table_tokens),
    (ExtractionTier::LooseText, loose_text_tokens),
];

/// Parses the page body. html5ever accepts nearly anything, so the only
/// rejected bodies are the ones with no markup at all.
pub fn parse_document(ticker: &str, body: &str) -> Result<Html, AnalysisError> {
    if body.trim().is_empty() {
        return Err(AnalysisError::ParseFailure {
            ticker: ticker.to_string(),
            reason: "empty document".to_string(),
        });
    }
    if !body.contains('<') {
        return Err(AnalysisError::ParseFailure {
            ticker: ticker.to_string(),
            reason: "document contains no markup".to_string(),
        });
    }

    let document = Html::parse_document(body);
    if !document.errors.is_empty() {
        log::debug!("{}: {} markup errors tolerated", ticker, document.errors.len());
    }
    Ok(document)
}

/// Runs the tiers in order and keeps the first one with enough tokens.
pub fn extract_tokens(ticker: &str, document: &Html) -> Result<Extraction, AnalysisError> {
    let mut best = 0;

    for (tier, strategy) in CASCADE {
        let tokens = strategy(document);
        log::debug!("{}: tier '{}' produced {} tokens", ticker, tier, tokens.len());

        if tokens.len() >= MIN_TOKENS {
            if tier != ExtractionTier::FeaturedCard {
                log::warn!("{}: dividend card missing, using '{}' extraction", ticker, tier);
            }
            return Ok(Extraction { tier, tokens });
        }
        best = best.max(tokens.len());
    }

    Err(AnalysisError::InsufficientData {
        ticker: ticker.to_string(),
        found: best,
    })
}

pub fn featured_card_tokens(document: &Html) -> Vec<String> {
    row_cell_tokens(document.select(&FEATURED_CARD_ROWS))
}

pub fn any_table_tokens(document: &Html) -> Vec<String> {
    row_cell_tokens(document.select(&TABLE_ROWS))
}

/// Years and `R$` amounts matched independently in the page text, then
/// interleaved pairwise up to the shorter list.
pub fn loose_text_tokens(document: &Html) -> Vec<String> {
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");

    let years = LOOSE_YEAR.find_iter(&text).map(|m| m.as_str());
    let amounts = LOOSE_AMOUNT.find_iter(&text).map(|m| m.as_str());

    years
        .zip(amounts)
        .flat_map(|(year, amount)| [year, amount])
        .filter_map(clean_token)
        .collect()
}

fn row_cell_tokens<'a>(rows: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
    rows.flat_map(|row| row.select(&ROW_CELLS))
        .filter_map(|cell| clean_token(&cell_text(cell)))
        .collect()
}

// Each text node is trimmed before joining, so `<td>R$ <b>1,00</b></td>`
// reads as `R$1,00`.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect::<Vec<_>>().join("")
}

fn clean_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
