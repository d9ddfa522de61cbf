//! # sitebrief
//!
//! Fetch a webpage, strip the boilerplate and summarise what is left.
//!
//! ## Pipeline
//!
//! - **Input**: the typed URL is trimmed and defaults to `https://`
//! - **Scraping**: one GET with a fixed timeout, then paragraph text only
//! - **Summary**: short pages pass through, longer ones go to the LLM agent
//! - **Orchestration**: one background task at a time, results handed back over a channel

pub mod agent;
pub mod config;
pub mod format;
pub mod input;
pub mod observability;
pub mod orchestrator;
pub mod pipeline;
pub mod scraper;
pub mod summary;
pub mod ui;

pub use agent::{GenerationParams, LlmSummarizer, Summarizer};
pub use config::Config;
pub use orchestrator::{DisplaySurface, Orchestrator, TaskState, Trigger};
pub use pipeline::{Pipeline, PipelineError};
pub use summary::SummaryResult;
