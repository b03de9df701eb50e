//! Deep-search lifecycle orchestration.
//!
//! The [`SearchOrchestrator`] owns one outstanding deep-search task:
//! submit, wait out the grace delay, poll on a fixed cadence, resolve,
//! fail, time out or cancel. The caller gets the task id back as soon as
//! submission succeeds; everything after that happens on a spawned poll
//! task and is observable through events and snapshots.

use crate::backend::{BackendError, TaskBackend};
use crate::config::models::PollingSettings;
use crate::task;
use sky_protocol::api_models::{BackendStatus, StatusResponse};
use sky_protocol::ipc::Event;
use sky_protocol::search_models::SearchParams;
use sky_protocol::task_models::{SearchTask, TaskStatus};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Synchronous submission failures, surfaced directly to the caller of
/// [`SearchOrchestrator::start`]. Everything after submission is reported
/// asynchronously through events.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The backend answered but refused to create a task.
    #[error("Backend rejected search request: {0}")]
    Rejected(String),

    /// The submission round-trip itself failed.
    #[error("Search submission failed: {0}")]
    Backend(#[from] BackendError),
}

/// Handles to the currently scheduled poll sequence.
///
/// The token is the cooperative cancellation signal checked at every
/// suspension point inside the poll task; the join handle is the
/// tokio-native strengthening that stops a superseded task outright.
struct ActivePoll {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Orchestrates the lifecycle of one outstanding deep-search request.
///
/// Single-flight per instance with implicit replacement: a second
/// [`start`](Self::start) supersedes the first, cancelling its timers.
/// Late callbacks belonging to a superseded task self-discard via a
/// task-identity check before every state mutation.
pub struct SearchOrchestrator {
    backend: Arc<dyn TaskBackend>,
    settings: PollingSettings,
    events_tx: mpsc::Sender<Event>,
    state: Arc<Mutex<SearchTask>>,
    active: Mutex<Option<ActivePoll>>,
}

impl SearchOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `backend` - The task backend to submit and poll against
    /// * `settings` - Grace delay, poll cadence and global timeout
    /// * `events_tx` - Channel for sending events to the UI
    pub fn new(backend: Arc<dyn TaskBackend>, settings: PollingSettings, events_tx: mpsc::Sender<Event>) -> Self {
        Self {
            backend,
            settings,
            events_tx,
            state: Arc::new(Mutex::new(SearchTask::default())),
            active: Mutex::new(None),
        }
    }

    /// Submit a deep-search request and schedule the poll sequence.
    ///
    /// Returns the backend-assigned task id as soon as submission
    /// succeeds; never waits for completion. Any task still in flight is
    /// superseded first: its timers are cancelled, a cancelled event is
    /// emitted for it, and its late responses are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission round-trip fails or the backend
    /// rejects the request. In both cases the task snapshot transitions
    /// to Failed and no polling is scheduled.
    pub async fn start(&self, params: SearchParams) -> Result<String, SubmitError> {
        self.cancel_active().await;

        let deadline = Instant::now() + self.settings.overall_timeout();
        {
            let mut state = self.state.lock().await;
            if state.status.is_active() {
                // The superseded task gets its cancelled event before the
                // new one takes over the snapshot.
                task::cancel_task(&mut state, &self.events_tx).await;
            }
            task::begin_submission(&mut state);
        }

        let response = match self.backend.submit_search(&params).await {
            Ok(response) => response,
            Err(e) => {
                let mut state = self.state.lock().await;
                task::fail_task(&mut state, &self.events_tx, e.to_string()).await;
                return Err(e.into());
            }
        };

        let task_id = match (response.success, response.data) {
            (true, Some(data)) => data.task_id,
            _ => {
                let reason = response
                    .message
                    .unwrap_or_else(|| "submission rejected without a reason".to_string());
                let mut state = self.state.lock().await;
                task::fail_task(&mut state, &self.events_tx, reason.clone()).await;
                return Err(SubmitError::Rejected(reason));
            }
        };

        {
            let mut state = self.state.lock().await;
            task::accept_submission(&mut state, &self.events_tx, task_id.clone()).await;
        }

        let token = CancellationToken::new();
        let handle = tokio::spawn(poll_until_settled(
            Arc::clone(&self.backend),
            Arc::clone(&self.state),
            self.events_tx.clone(),
            task_id.clone(),
            self.settings.clone(),
            deadline,
            token.clone(),
        ));
        *self.active.lock().await = Some(ActivePoll { token, handle });

        Ok(task_id)
    }

    /// Cancel the outstanding task, if any.
    ///
    /// Idempotent and safe in every state, including before the first
    /// `start` and after terminal resolution. Stops all timers and clears
    /// every observable field.
    pub async fn cancel(&self) {
        self.cancel_active().await;

        let mut state = self.state.lock().await;
        if state.task_id.is_some() || !matches!(state.status, TaskStatus::Idle | TaskStatus::Cancelled) {
            task::cancel_task(&mut state, &self.events_tx).await;
        }
    }

    /// Cancel the outstanding task and reset the snapshot to Idle
    /// defaults, permitting a fresh `start`.
    pub async fn reset(&self) {
        self.cancel_active().await;

        let mut state = self.state.lock().await;
        task::clear_task(&mut state);
    }

    /// Read the current task state.
    pub async fn snapshot(&self) -> SearchTask {
        self.state.lock().await.clone()
    }

    async fn cancel_active(&self) {
        if let Some(active) = self.active.lock().await.take() {
            active.token.cancel();
            active.handle.abort();
        }
    }
}

/// The delayed poll sequence for one submitted task.
///
/// Runs as a spawned tokio task. Every suspension point is guarded by the
/// cancellation token, and every state mutation by a task-identity check,
/// so a superseded or cancelled task can never overwrite the state of a
/// later one.
async fn poll_until_settled(
    backend: Arc<dyn TaskBackend>,
    state: Arc<Mutex<SearchTask>>,
    events_tx: mpsc::Sender<Event>,
    task_id: String,
    settings: PollingSettings,
    deadline: Instant,
    token: CancellationToken,
) {
    // The deep-search pipeline takes 60-120s; polling earlier only wastes
    // requests.
    tokio::select! {
        _ = token.cancelled() => return,
        _ = time::sleep_until(deadline) => {
            settle_timeout(&state, &events_tx, &task_id).await;
            return;
        }
        _ = time::sleep(settings.grace_delay()) => {}
    }

    // First tick fires immediately: one status check right after the
    // grace delay, then the fixed cadence.
    let mut ticker = time::interval(settings.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = time::sleep_until(deadline) => {
                settle_timeout(&state, &events_tx, &task_id).await;
                return;
            }
            _ = ticker.tick() => {}
        }

        let response = tokio::select! {
            _ = token.cancelled() => return,
            response = backend.get_status(&task_id) => response,
        };

        let data = match response {
            Ok(StatusResponse {
                success: true,
                data: Some(data),
                ..
            }) => data,
            Ok(response) => {
                warn!(
                    task_id = %task_id,
                    message = response.message.as_deref().unwrap_or(""),
                    "status query returned an unsuccessful envelope, will retry"
                );
                continue;
            }
            Err(e) => {
                // Status queries are idempotent; transient failures are
                // absorbed until the global timeout.
                warn!(task_id = %task_id, error = %e, "status query failed, will retry");
                continue;
            }
        };

        match data.status {
            BackendStatus::Pending | BackendStatus::Processing => {
                let status = match data.status {
                    BackendStatus::Pending => TaskStatus::Pending,
                    _ => TaskStatus::Processing,
                };
                let mut guard = state.lock().await;
                if !is_current(&guard, &task_id) {
                    return;
                }
                task::record_progress(&mut guard, &events_tx, status, data.progress, data.message).await;
            }
            BackendStatus::Completed => {
                // Polling stops here; exactly one result fetch follows.
                let result = tokio::select! {
                    _ = token.cancelled() => return,
                    result = backend.get_result(&task_id) => result,
                };

                let mut guard = state.lock().await;
                if !is_current(&guard, &task_id) {
                    return;
                }
                match result {
                    Ok(response) => match (response.success, response.data) {
                        (true, Some(payload)) => {
                            task::complete_task(&mut guard, &events_tx, payload).await;
                        }
                        _ => {
                            let reason = response
                                .message
                                .unwrap_or_else(|| "result unavailable after completion".to_string());
                            task::fail_task(
                                &mut guard,
                                &events_tx,
                                format!("Failed to fetch search result: {reason}"),
                            )
                            .await;
                        }
                    },
                    Err(e) => {
                        task::fail_task(&mut guard, &events_tx, format!("Failed to fetch search result: {e}")).await;
                    }
                }
                return;
            }
            BackendStatus::Failed => {
                let reason = data
                    .error
                    .or(data.message)
                    .unwrap_or_else(|| "search failed on the backend".to_string());
                let mut guard = state.lock().await;
                if !is_current(&guard, &task_id) {
                    return;
                }
                task::fail_task(&mut guard, &events_tx, reason).await;
                return;
            }
        }
    }
}

async fn settle_timeout(state: &Arc<Mutex<SearchTask>>, events_tx: &mpsc::Sender<Event>, task_id: &str) {
    let mut guard = state.lock().await;
    if is_current(&guard, task_id) {
        task::timeout_task(&mut guard, events_tx).await;
    }
}

/// Guard against the lost-update hazard: a late callback for a superseded
/// task must not mutate the state of the task that replaced it.
fn is_current(state: &SearchTask, task_id: &str) -> bool {
    state.task_id.as_deref() == Some(task_id)
}
