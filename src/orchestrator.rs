//! Runs the pipeline off the interactive thread, one task at a time.
//!
//! The interactive side owns the [`DisplaySurface`]. A background task only
//! ever produces a [`TaskEvent`]; the interactive side applies it with
//! [`Orchestrator::apply`].

use crate::input::normalize_url;
use crate::pipeline::{self, Pipeline, PipelineError};
use crate::summary::SummaryResult;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinError;
use tracing::{debug, info, warn};

/// Notice shown while a task is in flight
pub const PENDING_NOTICE: &str = "Fetching and analyzing website... Please wait.";

/// Where results end up: a text pane, a busy indicator and a trigger control
pub trait DisplaySurface {
    /// Replace everything currently shown
    fn set_text(&mut self, text: &str);
    fn set_busy(&mut self, busy: bool);
    fn set_trigger_enabled(&mut self, enabled: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Result of pressing the trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A background task was spawned
    Started { url: String },
    /// A task is already running; nothing happened
    Ignored,
    /// The input was rejected before any network call
    Rejected,
}

/// Hand-off from the background task to the interactive side
#[derive(Debug)]
pub enum TaskEvent {
    Finished(Result<SummaryResult, PipelineError>),
}

pub struct Orchestrator {
    pipeline: Arc<Pipeline>,
    state: TaskState,
    events_tx: UnboundedSender<TaskEvent>,
    events_rx: UnboundedReceiver<TaskEvent>,
}

impl Orchestrator {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            pipeline,
            state: TaskState::Idle,
            events_tx,
            events_rx,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TaskState::Running
    }

    /// Start a run for `input` unless one is already in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&mut self, input: &str, display: &mut dyn DisplaySurface) -> Trigger {
        if self.is_running() {
            debug!("trigger ignored, task already running");
            return Trigger::Ignored;
        }

        let url = match normalize_url(input) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "input rejected");
                display.set_text(&pipeline::display_text(&Err(e.into())));
                return Trigger::Rejected;
            }
        };

        info!(%url, "starting summary task");
        self.state = TaskState::Running;
        display.set_trigger_enabled(false);
        display.set_busy(true);
        display.set_text(PENDING_NOTICE);

        let pipeline = Arc::clone(&self.pipeline);
        let events_tx = self.events_tx.clone();
        let task_url = url.clone();
        let run = tokio::spawn(async move { pipeline.run(&task_url).await });
        tokio::spawn(async move {
            // A panicking run still has to hand control back
            let outcome = run.await.unwrap_or_else(|e| {
                warn!(error = %e, "summary task panicked");
                Err(PipelineError::TaskAborted(abort_reason(e)))
            });
            // The receiver lives as long as the orchestrator
            let _ = events_tx.send(TaskEvent::Finished(outcome));
        });

        Trigger::Started { url }
    }

    /// Apply a finished task to the display and re-enable the trigger
    pub fn apply(&mut self, event: TaskEvent, display: &mut dyn DisplaySurface) {
        let TaskEvent::Finished(outcome) = event;

        self.state = match &outcome {
            Ok(_) => TaskState::Succeeded,
            Err(e) => {
                warn!(error = %e, "summary task failed");
                TaskState::Failed
            }
        };
        info!(state = ?self.state, "summary task finished");

        display.set_text(&pipeline::display_text(&outcome));
        display.set_busy(false);
        display.set_trigger_enabled(true);
    }

    /// Wait for the next task event
    pub async fn next_event(&mut self) -> Option<TaskEvent> {
        self.events_rx.recv().await
    }

    /// Take a pending task event without waiting
    pub fn try_next_event(&mut self) -> Option<TaskEvent> {
        self.events_rx.try_recv().ok()
    }
}

fn abort_reason(error: JoinError) -> String {
    if !error.is_panic() {
        return error.to_string();
    }
    let payload = error.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "task panicked".to_string())
}
