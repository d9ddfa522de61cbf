//! Summary classification - decides whether extracted text is worth summarising.

use crate::agent::{AgentError, GenerationParams, Summarizer};
use crate::format::format_bullets;
use tracing::{debug, info};

/// Shown when a page has no readable paragraph text at all
pub const EMPTY_CONTENT_MESSAGE: &str =
    "This website doesn't contain enough readable text to summarize.";

/// What the pipeline made of a page's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    /// Too short to summarise; the text is passed through verbatim
    ShortContent { text: String },
    /// No usable text was extracted
    Empty { message: String },
    /// A formatted, bulleted summary
    Summary { bulleted_text: String },
}

impl SummaryResult {
    /// The text shown to the user
    pub fn display_text(&self) -> &str {
        match self {
            SummaryResult::ShortContent { text } => text,
            SummaryResult::Empty { message } => message,
            SummaryResult::Summary { bulleted_text } => bulleted_text,
        }
    }
}

/// Classify `text` and, when it is long enough, summarise and format it.
///
/// Text shorter than `short_content_threshold` characters never reaches the
/// summariser.
pub async fn summarize_text(
    text: &str,
    summarizer: &dyn Summarizer,
    params: &GenerationParams,
    short_content_threshold: usize,
) -> Result<SummaryResult, AgentError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        info!("no readable text extracted");
        return Ok(SummaryResult::Empty {
            message: EMPTY_CONTENT_MESSAGE.to_string(),
        });
    }

    let chars = trimmed.chars().count();
    if chars < short_content_threshold {
        info!(chars, threshold = short_content_threshold, "content too short, passing through");
        return Ok(SummaryResult::ShortContent {
            text: text.to_string(),
        });
    }

    debug!(chars, ?params, "summarising");
    let summary = summarizer.summarize(text, params).await?;
    Ok(SummaryResult::Summary {
        bulleted_text: format_bullets(&summary),
    })
}
