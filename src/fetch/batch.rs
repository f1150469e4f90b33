use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::config::ProjectorConfig;
use crate::core::error::AnalysisError;
use crate::core::types::{AnalysisResult, DocumentSource};
use crate::dividends::overrides::OverrideRegistry;
use crate::dividends::tickers::{parse_ticker_list, Ticker};
use crate::dividends::analyze;
use crate::utils::progress::ProgressTracker;
use crate::utils::rate_limit::RateLimiter;

#[derive(Debug)]
pub enum TickerOutcome {
    Success(AnalysisResult),
    Failed(AnalysisError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchStatus {
    /// Not a single ticker produced a result.
    Failed,
    Partial(usize),
    Complete(usize),
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<TickerOutcome>,
    /// True when the run stopped before reaching every ticker.
    pub interrupted: bool,
}

impl BatchReport {
    pub fn results(&self) -> Vec<&AnalysisResult> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                TickerOutcome::Success(result) => Some(result),
                TickerOutcome::Failed(_) => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<&AnalysisError> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                TickerOutcome::Failed(error) => Some(error),
                TickerOutcome::Success(_) => None,
            })
            .collect()
    }

    pub fn successful(&self) -> usize {
        self.results().len()
    }

    pub fn status(&self) -> BatchStatus {
        let successful = self.successful();
        if successful == 0 {
            BatchStatus::Failed
        } else if successful < self.outcomes.len() || self.interrupted {
            BatchStatus::Partial(successful)
        } else {
            BatchStatus::Complete(successful)
        }
    }
}

/// Processes tickers one after another: fetch, analyze, record. A failing
/// ticker is recorded and never stops the batch.
pub struct BatchRunner<S: DocumentSource> {
    source: S,
    config: ProjectorConfig,
    overrides: OverrideRegistry,
    rate_limiter: RateLimiter,
    progress: ProgressTracker,
    running: Arc<AtomicBool>,
}

impl<S: DocumentSource> BatchRunner<S> {
    pub fn new(source: S, config: ProjectorConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.pause);
        Self {
            source,
            config,
            overrides: OverrideRegistry::default(),
            rate_limiter,
            progress: ProgressTracker::hidden(),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideRegistry) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_progress(mut self, progress: ProgressTracker) -> Self {
        self.progress = progress;
        self
    }

    /// The batch stops before the next ticker once this flag is cleared.
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = running;
        self
    }

    /// Parses a comma separated list and runs the valid codes. Invalid codes
    /// are reported first, without touching the network.
    pub async fn run_input(&self, input: &str) -> BatchReport {
        let (tickers, invalid) = parse_ticker_list(input);
        for error in &invalid {
            log::warn!("{}", error);
        }

        let mut report = self.run(&tickers).await;
        let mut outcomes: Vec<TickerOutcome> =
            invalid.into_iter().map(TickerOutcome::Failed).collect();
        outcomes.append(&mut report.outcomes);
        report.outcomes = outcomes;
        report
    }

    pub async fn run(&self, tickers: &[Ticker]) -> BatchReport {
        let mut report = BatchReport::default();

        for ticker in tickers {
            if !self.running.load(Ordering::SeqCst) {
                log::info!("Batch interrupted before {}", ticker);
                report.interrupted = true;
                break;
            }

            self.rate_limiter.acquire().await;
            self.progress.update_message(&ticker.code());

            let outcome = match self.process(ticker).await {
                Ok(result) => TickerOutcome::Success(result),
                Err(e) => {
                    log::warn!("{}", e);
                    self.progress.println(&format!("⚠️ {}", e));
                    TickerOutcome::Failed(e)
                }
            };
            report.outcomes.push(outcome);
            self.progress.increment();
        }

        self.progress.finish();
        report
    }

    pub async fn process(&self, ticker: &Ticker) -> Result<AnalysisResult, AnalysisError> {
        let body = self.source.fetch(ticker).await?;
        analyze(ticker, &body, &self.config, &self.overrides)
    }
}
