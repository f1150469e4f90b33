#![allow(dead_code)]

use dividend_projector::{ProjectorConfig, Ticker};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub fn get_test_file_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(filename)
}

pub fn read_test_file(filename: &str) -> String {
    fs::read_to_string(get_test_file_path(filename))
        .unwrap_or_else(|e| panic!("Failed to read test file {}: {}", filename, e))
}

pub fn ticker(code: &str) -> Ticker {
    Ticker::new(code).unwrap_or_else(|e| panic!("bad test ticker: {}", e))
}

/// Reference configuration without the courtesy pause.
pub fn test_config() -> ProjectorConfig {
    ProjectorConfig {
        pause: Duration::ZERO,
        ..ProjectorConfig::default()
    }
}
