pub mod extract;
pub mod pairs;

pub use extract::{extract_tokens, parse_document, Extraction, ExtractionTier};
pub use pairs::{build_pairs, RawPair};
