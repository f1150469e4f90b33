pub mod batch;

pub use batch::{BatchReport, BatchRunner, BatchStatus, TickerOutcome};

use reqwest::{Client, StatusCode};
use url::Url;

use crate::core::config::ProjectorConfig;
use crate::core::error::AnalysisError;
use crate::core::types::DocumentSource;
use crate::dividends::tickers::Ticker;

/// Fetches dividend pages over HTTP, one GET per ticker.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl HttpSource {
    pub fn new(config: &ProjectorConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn page_url(&self, ticker: &Ticker) -> Result<Url, url::ParseError> {
        self.base_url.join(ticker.as_str())
    }
}

#[async_trait::async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, ticker: &Ticker) -> Result<String, AnalysisError> {
        let failure = |reason: String| AnalysisError::FetchFailure {
            ticker: ticker.code(),
            reason,
        };

        let url = self.page_url(ticker).map_err(|e| failure(e.to_string()))?;
        log::debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT, mime::TEXT_HTML.as_ref())
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        log::debug!("Response status: {}", response.status());

        if response.status() != StatusCode::OK {
            return Err(failure(format!("HTTP status {}", response.status())));
        }

        let body = response.text().await.map_err(|e| failure(e.to_string()))?;
        log::debug!("Received content length: {}", body.len());
        Ok(body)
    }
}
