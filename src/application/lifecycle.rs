//! Request lifecycle controller.
//!
//! Owns the observable [`RequestState`] and drives at most one generation call
//! at a time:
//!
//! ```text
//! Idle --start--> Generating --success--> Complete
//!                 Generating --failure--> Failed
//! Complete | Failed --reset--> Idle      (reset is allowed from any state)
//! ```
//!
//! Every accepted `start` and every `reset` advances an epoch. A call whose
//! epoch is no longer current when it resolves is dropped, so a late answer
//! can never overwrite a reset or a newer request. Epoch changes happen inside
//! the watch channel's write lock, which keeps them ordered with the state.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::application::generator::{GenerationError, StrategyGenerator};
use crate::domain::{credential::ApiKey, preferences::Preferences, state::RequestState};

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API Key not found. Please set the API_KEY environment variable or `model.api_key`.";
pub const EMPTY_RESULT_CONTENT: &str = "No response generated.";
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "An unexpected error occurred.";

const SOURCE: &str = "blueocean::lifecycle";

/// What happened to a `start` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The call resolved and its result is now the current state.
    Settled(RequestState),
    /// No credential was configured; the state is `Failed` and no call was made.
    CredentialMissing,
    /// A request was already in flight; nothing changed and no call was made.
    Busy,
    /// The call resolved after a reset or a newer start and was ignored.
    Discarded,
}

pub struct RequestController {
    api_key: Option<ApiKey>,
    generator: Arc<dyn StrategyGenerator>,
    state: watch::Sender<RequestState>,
    epoch: AtomicU64,
}

impl RequestController {
    pub fn new(api_key: Option<ApiKey>, generator: Arc<dyn StrategyGenerator>) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self {
            api_key,
            generator,
            state,
            epoch: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Request a strategy for `preferences`.
    ///
    /// Resolves once the generation call has finished (or immediately when no
    /// call is issued). Failures are recorded in the state, never returned.
    pub async fn start(&self, preferences: Preferences) -> StartOutcome {
        let Some(api_key) = self.api_key.as_ref() else {
            self.state.send_modify(|state| {
                self.epoch.fetch_add(1, Ordering::SeqCst);
                *state = RequestState::Failed {
                    message: MISSING_CREDENTIAL_MESSAGE.to_string(),
                };
            });
            warn!(
                target_module = SOURCE,
                "Strategy generation skipped: no API key configured"
            );
            return StartOutcome::CredentialMissing;
        };

        let Some(epoch) = self.begin() else {
            debug!(
                target_module = SOURCE,
                "Strategy generation already in flight; start ignored"
            );
            return StartOutcome::Busy;
        };

        info!(
            target_module = SOURCE,
            epoch,
            open_brief = preferences.is_open(),
            "Strategy generation started"
        );

        let result = self.generator.generate(api_key, &preferences).await;
        let settled = settle(result);

        if self.finish(epoch, settled.clone()) {
            info!(
                target_module = SOURCE,
                epoch,
                status = settled.status(),
                "Strategy generation settled"
            );
            StartOutcome::Settled(settled)
        } else {
            debug!(
                target_module = SOURCE,
                epoch,
                status = settled.status(),
                "Discarding stale strategy result"
            );
            StartOutcome::Discarded
        }
    }

    /// Return to `Idle`, dropping any content or error.
    ///
    /// An in-flight call keeps running; its result will be discarded.
    pub fn reset(&self) {
        let changed = self.state.send_if_modified(|state| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            let changed = *state != RequestState::Idle;
            *state = RequestState::Idle;
            changed
        });

        if changed {
            debug!(target_module = SOURCE, "Request state reset");
        }
    }

    /// Move to `Generating` unless a call is already in flight.
    fn begin(&self) -> Option<u64> {
        let mut epoch = None;
        self.state.send_if_modified(|state| {
            if state.is_generating() {
                return false;
            }
            epoch = Some(self.epoch.fetch_add(1, Ordering::SeqCst) + 1);
            *state = RequestState::Generating;
            true
        });
        epoch
    }

    /// Apply a result if `epoch` still identifies the in-flight call.
    fn finish(&self, epoch: u64, settled: RequestState) -> bool {
        self.state.send_if_modified(|state| {
            if self.epoch.load(Ordering::SeqCst) != epoch || !state.is_generating() {
                return false;
            }
            *state = settled;
            true
        })
    }
}

fn settle(result: Result<Option<String>, GenerationError>) -> RequestState {
    match result {
        Ok(Some(content)) if !content.is_empty() => RequestState::Complete { content },
        Ok(_) => RequestState::Complete {
            content: EMPTY_RESULT_CONTENT.to_string(),
        },
        Err(err) => {
            warn!(
                target_module = SOURCE,
                kind = err.kind(),
                error = %err,
                "Strategy generation failed"
            );
            let message = err.to_string();
            let message = if message.trim().is_empty() {
                UNEXPECTED_FAILURE_MESSAGE.to_string()
            } else {
                message
            };
            RequestState::Failed { message }
        }
    }
}
