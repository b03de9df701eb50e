//! Decoupled multi-step progress animation.
//!
//! The controller drives a purely presentational step list and elapsed
//! counter while a search is in flight. The 12s step cadence is a
//! simulated progress indicator: the backend emits no step-level events,
//! so the animation is deliberately not coupled to real search progress.
//! Whoever owns both (the UI layer) stops it when the orchestrator
//! reaches a terminal state.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

/// Fixed cadence at which the step cursor advances.
pub const STEP_ADVANCE_INTERVAL: Duration = Duration::from_secs(12);

const ELAPSED_TICK: Duration = Duration::from_secs(1);

/// Observable state of one progress animation run.
///
/// Invariant: `current_step <= steps.len()`; tickers exist iff `active`.
#[derive(Debug, Clone, Default)]
pub struct ProgressState {
    /// Step labels, fixed at start, immutable during a run.
    pub steps: Vec<String>,

    /// Cursor into `steps`; equals `steps.len()` once every step has been
    /// shown.
    pub current_step: usize,

    /// Whole seconds since the run started.
    pub elapsed_seconds: u64,

    /// Whether a run is in progress.
    pub active: bool,
}

/// Handles to the two tickers of one run.
struct Tickers {
    token: CancellationToken,
    elapsed: JoinHandle<()>,
    stepper: JoinHandle<()>,
}

/// Drives the step cursor and elapsed counter for a loading view.
///
/// Single-writer (its own tickers), multi-reader via snapshots. Starting
/// a new run supersedes the previous one; stopping is idempotent.
#[derive(Default)]
pub struct ProgressStepController {
    state: Arc<Mutex<ProgressState>>,
    tickers: Mutex<Option<Tickers>>,
}

impl ProgressStepController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating the given steps from zero.
    ///
    /// Spawns two independent tickers: a 1s elapsed counter that runs
    /// until [`stop_loading`](Self::stop_loading), and a 12s step
    /// advancer that self-cancels once the cursor reaches `steps.len()`.
    pub async fn start_loading(&self, steps: Vec<String>) {
        self.stop_loading().await;

        {
            let mut state = self.state.lock().await;
            *state = ProgressState {
                steps,
                current_step: 0,
                elapsed_seconds: 0,
                active: true,
            };
        }

        let token = CancellationToken::new();
        let elapsed = tokio::spawn(run_elapsed_ticker(Arc::clone(&self.state), token.clone()));
        let stepper = tokio::spawn(run_step_ticker(Arc::clone(&self.state), token.clone()));
        *self.tickers.lock().await = Some(Tickers { token, elapsed, stepper });
    }

    /// Stop the animation and both tickers. Safe to call repeatedly and
    /// when nothing is running.
    pub async fn stop_loading(&self) {
        if let Some(tickers) = self.tickers.lock().await.take() {
            tickers.token.cancel();
            tickers.elapsed.abort();
            tickers.stepper.abort();
        }

        let mut state = self.state.lock().await;
        state.active = false;
    }

    /// Read the current animation state.
    pub async fn snapshot(&self) -> ProgressState {
        self.state.lock().await.clone()
    }
}

async fn run_elapsed_ticker(state: Arc<Mutex<ProgressState>>, token: CancellationToken) {
    let mut ticker = time::interval(ELAPSED_TICK);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let mut state = state.lock().await;
        state.elapsed_seconds += 1;
    }
}

async fn run_step_ticker(state: Arc<Mutex<ProgressState>>, token: CancellationToken) {
    let mut ticker = time::interval(STEP_ADVANCE_INTERVAL);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let mut state = state.lock().await;
        if state.current_step >= state.steps.len() {
            // Ceiling reached; the elapsed ticker keeps running until the
            // caller stops the run.
            return;
        }
        state.current_step += 1;
    }
}
