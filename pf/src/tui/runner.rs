//! TUI runner - main loop that owns the terminal
//!
//! The TuiRunner is responsible for:
//! - Dispatching events to App for handling
//! - Draining queued submits from the form
//! - Running generation requests on background tasks
//! - Applying results back to state, dropping stale ones

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::DefaultsConfig;
use crate::generator::CompletionClient;
use crate::plan::{RequestStatus, build_prompt};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::AppState;
use super::views;

/// Result from the background generation task
#[derive(Debug)]
enum GenerationOutcome {
    /// Plan generated
    Completed { seq: u64, markdown: String },
    /// Error occurred
    Failed { seq: u64, error: String },
}

/// TUI runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state and key handling
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Generation client shared with background tasks
    client: Arc<dyn CompletionClient>,
    /// Receiver for the in-flight generation task
    result_rx: Option<mpsc::Receiver<GenerationOutcome>>,
    /// Handle to the in-flight generation task
    gen_task: Option<JoinHandle<()>>,
    /// Sequence number of the most recent submit; stale results are dropped
    request_seq: u64,
}

impl TuiRunner {
    pub fn new(terminal: Tui, client: Arc<dyn CompletionClient>, defaults: &DefaultsConfig) -> Self {
        debug!("TuiRunner::new: called");
        Self {
            app: App::new(defaults),
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            client,
            result_rx: None,
            gen_task: None,
            request_seq: 0,
        }
    }

    /// Run the main event loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        info!("TuiRunner::run: starting event loop");
        loop {
            let state = &self.app.state;
            self.terminal.draw(|frame| views::render(state, frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Key(key) => {
                            if self.app.handle_key(key) {
                                debug!("TuiRunner::run: exit requested");
                                break;
                            }
                        }
                        Event::Resize(w, h) => {
                            debug!(w, h, "TuiRunner::run: terminal resized");
                        }
                        Event::Tick => {}
                    }
                }
            }

            self.drain_pending_submit();
            self.drain_generation_results();
        }

        // Abort any in-flight generation task; its result has no receiver
        // once the runner is gone
        if let Some(task) = self.gen_task.take() {
            debug!("TuiRunner::run: aborting in-flight generation task");
            task.abort();
        }

        info!("TuiRunner::run: event loop finished");
        Ok(())
    }

    /// Pick up a submit queued by key handling
    fn drain_pending_submit(&mut self) {
        let Some((seq, prompt)) = accept_submit(&mut self.app.state, &mut self.request_seq) else {
            return;
        };

        let client = Arc::clone(&self.client);
        let (tx, rx) = mpsc::channel(1);
        self.result_rx = Some(rx);

        info!(seq, "drain_pending_submit: spawning generation task");
        self.gen_task = Some(tokio::spawn(async move {
            let outcome = match client.generate(&prompt).await {
                Ok(source) => GenerationOutcome::Completed {
                    seq,
                    markdown: source.into_text(),
                },
                Err(e) => GenerationOutcome::Failed {
                    seq,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(outcome).await;
        }));
    }

    /// Apply finished generation results to state
    fn drain_generation_results(&mut self) {
        let Some(rx) = &mut self.result_rx else {
            return;
        };

        while let Ok(outcome) = rx.try_recv() {
            apply_outcome(&mut self.app.state, self.request_seq, outcome);
        }
    }
}

/// Decide whether a queued submit becomes a network request
///
/// Validation failures surface as notifications without any network call.
/// While a request is in flight further submits are rejected with a
/// notification (single-flight). An accepted submit bumps the sequence
/// number, marks the status InFlight, and yields the prompt to dispatch.
fn accept_submit(state: &mut AppState, request_seq: &mut u64) -> Option<(u64, String)> {
    let request = state.pending_submit.take()?;
    debug!(brand = %request.brand_name, "accept_submit: submit queued");

    if state.request_status == RequestStatus::InFlight {
        debug!("accept_submit: request already in flight, rejecting");
        state.notification = Some("A plan is already being generated".to_string());
        return None;
    }

    if let Err(e) = request.validate() {
        debug!(error = %e, "accept_submit: validation failed");
        state.notification = Some(e.to_string());
        return None;
    }

    *request_seq += 1;
    state.request_status = RequestStatus::InFlight;
    Some((*request_seq, build_prompt(&request)))
}

/// Fold one generation outcome into state
///
/// Results whose sequence no longer matches the latest submit are dropped.
/// A failure keeps the previously rendered plan.
fn apply_outcome(state: &mut AppState, current_seq: u64, outcome: GenerationOutcome) {
    debug!(current_seq, ?outcome, "apply_outcome: called");
    match outcome {
        GenerationOutcome::Completed { seq, markdown } => {
            if seq != current_seq {
                debug!(seq, current_seq, "apply_outcome: dropping stale result");
                return;
            }
            info!(seq, "apply_outcome: plan generated");
            state.plan_markdown = Some(markdown);
            state.plan_scroll = 0;
            state.request_status = RequestStatus::Succeeded;
        }
        GenerationOutcome::Failed { seq, error } => {
            if seq != current_seq {
                debug!(seq, current_seq, "apply_outcome: dropping stale error");
                return;
            }
            warn!(seq, %error, "apply_outcome: generation failed");
            state.request_status = RequestStatus::Failed;
        }
    }
}
