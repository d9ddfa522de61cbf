//! The fetch -> extract -> summarise sequence behind one user action.

use crate::agent::{GenerationParams, Summarizer};
use crate::config::PipelineConfig;
use crate::input::InputError;
use crate::scraper::{self, FetchResult, PageFetcher, ScraperError};
use crate::summary::{self, SummaryResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Prefix that sets failure messages apart from normal output
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("could not fetch the page: {0}")]
    FetchFailure(String),
    #[error("summarization failed: {0}")]
    SummarizationFailure(String),
    #[error("summary task aborted: {0}")]
    TaskAborted(String),
}

/// One parameterised pipeline shared by the TUI and the one-shot command
pub struct Pipeline {
    fetcher: PageFetcher,
    summarizer: Arc<dyn Summarizer>,
    params: GenerationParams,
    short_content_threshold: usize,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig, summarizer: Arc<dyn Summarizer>) -> Result<Self, ScraperError> {
        Ok(Self {
            fetcher: PageFetcher::new(&config.user_agent, config.fetch_timeout())?,
            summarizer,
            params: config.generation_params(),
            short_content_threshold: config.short_content_threshold,
        })
    }

    /// Run every stage for an already normalised URL
    #[instrument(skip(self))]
    pub async fn run(&self, url: &str) -> Result<SummaryResult, PipelineError> {
        let html = self.fetch(url).await?;

        let text = scraper::extract_text(&html);
        info!(chars = text.chars().count(), "text extracted");

        summary::summarize_text(
            &text,
            self.summarizer.as_ref(),
            &self.params,
            self.short_content_threshold,
        )
        .await
        .map_err(|e| PipelineError::SummarizationFailure(e.to_string()))
    }

    async fn fetch(&self, url: &str) -> Result<String, PipelineError> {
        match self.fetcher.fetch(url).await {
            FetchResult::Success { html } => Ok(html),
            FetchResult::Failure { reason } => Err(PipelineError::FetchFailure(reason)),
        }
    }
}

/// Text shown for a finished run, failures prefixed with [`ERROR_PREFIX`]
pub fn display_text(outcome: &Result<SummaryResult, PipelineError>) -> String {
    match outcome {
        Ok(result) => result.display_text().to_string(),
        Err(e) => format!("{ERROR_PREFIX}{e}").replace('\n', " "),
    }
}
