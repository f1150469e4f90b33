use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://playinvest.com.br/dividendos/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

#[derive(Clone, Debug)]
pub struct ProjectorConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub timeout: Duration,
    /// Courtesy delay between two tickers of a batch.
    pub pause: Duration,
    /// Last year considered historical; base of every forecast.
    pub current_year: i32,
    pub horizon: usize,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            pause: Duration::from_secs(1),
            current_year: 2024,
            horizon: 5,
        }
    }
}

impl ProjectorConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("DIVIDENDS_BASE_URL") {
            config.base_url = parse_base_url(&base_url)?;
        }

        if let Ok(user_agent) = std::env::var("DIVIDENDS_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(secs) = std::env::var("DIVIDENDS_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("DIVIDENDS_TIMEOUT_SECS is not a number: {}", secs))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(ms) = std::env::var("DIVIDENDS_PAUSE_MS") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("DIVIDENDS_PAUSE_MS is not a number: {}", ms))?;
            config.pause = Duration::from_millis(ms);
        }

        if let Ok(year) = std::env::var("DIVIDENDS_CURRENT_YEAR") {
            config.current_year = year
                .parse()
                .with_context(|| format!("DIVIDENDS_CURRENT_YEAR is not a year: {}", year))?;
        }

        Ok(config)
    }

    /// The year after `current_year`. Sources report it early; it is only
    /// ever read by override rules and never enters the history.
    pub fn lookahead_year(&self) -> i32 {
        self.current_year + 1
    }

    pub fn forecast_years(&self) -> Vec<i32> {
        (1..=self.horizon as i32)
            .map(|offset| self.current_year + offset)
            .collect()
    }
}

// `Url::join` drops the last path segment unless it ends with a slash.
fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|e| anyhow!("Invalid DIVIDENDS_BASE_URL {}: {}", raw, e))
}
