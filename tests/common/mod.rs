//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use sitebrief::agent::AgentError;
use sitebrief::config::PipelineConfig;
use sitebrief::orchestrator::DisplaySurface;
use sitebrief::{GenerationParams, Pipeline, Summarizer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Summariser returning a fixed reply and counting its calls
pub struct CountingSummarizer {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl CountingSummarizer {
    pub fn replying(summary: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(summary.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for CountingSummarizer {
    async fn summarize(&self, _text: &str, _params: &GenerationParams) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(AgentError::RequestFailed)
    }
}

/// Summariser that blows up instead of answering
pub struct PanickingSummarizer;

#[async_trait]
impl Summarizer for PanickingSummarizer {
    async fn summarize(&self, _text: &str, _params: &GenerationParams) -> Result<String, AgentError> {
        panic!("model crashed");
    }
}

/// Display surface that remembers what it was told
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub text: String,
    pub busy: bool,
    pub trigger_enabled: bool,
    pub texts: Vec<String>,
}

impl DisplaySurface for RecordingDisplay {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.texts.push(text.to_string());
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
    }
}

pub fn pipeline_with(summarizer: Arc<dyn Summarizer>, timeout_secs: u64) -> Arc<Pipeline> {
    let config = PipelineConfig {
        fetch_timeout_secs: timeout_secs,
        ..PipelineConfig::default()
    };
    Arc::new(Pipeline::new(&config, summarizer).unwrap())
}

pub const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

/// A page whose paragraphs are well above the short-content threshold
pub const ARTICLE_HTML: &str = r#"<!doctype html>
<html>
  <head><title>Borrowing explained</title><script>trackVisitor();</script></head>
  <body>
    <nav><a href="/">Home</a> <p>Site navigation blurb</p></nav>
    <header><p>Subscribe to our newsletter</p></header>
    <article>
      <p>The borrow checker enforces that references never outlive the data they point to.</p>
      <p>Mutable references are exclusive, so data races are ruled out at compile time.</p>
      <p>Shared references may be copied freely as long as nobody mutates the value.</p>
    </article>
    <footer><p>Copyright notice</p></footer>
  </body>
</html>"#;

/// A page with a single short paragraph
pub const SHORT_HTML: &str = "<html><body><nav><p>Menu</p></nav><p>  Coming   soon. </p></body></html>";
