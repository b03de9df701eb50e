//! Runtime search task state models.
//!
//! This module defines the structures for tracking the state of one
//! outstanding deep-search task on the client side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Represents the current lifecycle status of a search task.
///
/// The status progresses through these states during normal execution:
/// Idle -> Submitting -> Pending -> Processing -> Completed
///
/// Special states:
/// - Failed: the backend reported a failure, the submission was rejected,
///   or the result could not be fetched
/// - Cancelled: the caller cancelled or superseded the task
/// - TimedOut: the global wall-clock ceiling elapsed without a terminal
///   backend response
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// No task is in flight.
    #[default]
    Idle,

    /// The submission request has been sent but not yet acknowledged.
    Submitting,

    /// The backend accepted the task but has not started working on it.
    Pending,

    /// The backend is actively working on the task.
    Processing,

    /// The task finished and its result has been fetched.
    Completed,

    /// The task failed terminally.
    Failed,

    /// The task was cancelled by the caller.
    Cancelled,

    /// The global timeout elapsed before the backend resolved the task.
    TimedOut,
}

impl TaskStatus {
    /// Whether this status ends the task lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Failed | TaskStatus::Cancelled | TaskStatus::TimedOut
        )
    }

    /// Whether a task in this status still has work outstanding.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            TaskStatus::Submitting | TaskStatus::Pending | TaskStatus::Processing
        )
    }
}

/// Represents the client-side state of a single deep-search task.
///
/// Mutated only by the orchestrator's own callbacks (single-writer);
/// UI consumers read snapshots.
///
/// Invariant: once `status` is Completed, Failed or TimedOut, exactly one
/// of `result` / `error` is populated. Both are `None` while the task is
/// still in flight, and everything is cleared on Cancelled or Idle.
#[derive(Serialize, Deserialize, Debug, Clone, Default, TS)]
pub struct SearchTask {
    /// Opaque identifier assigned by the backend on submission.
    #[serde(default)]
    pub task_id: Option<String>,

    /// Current lifecycle status.
    pub status: TaskStatus,

    /// Backend-reported progress, 0-100. Best effort: the backend may
    /// report non-monotonic values and the client stores them as-is.
    pub progress: u8,

    /// Human-readable status string, replaced wholesale on each poll.
    pub message: String,

    /// Opaque result payload, set only on Completed.
    #[serde(default)]
    #[ts(type = "unknown")]
    pub result: Option<serde_json::Value>,

    /// Terminal error message, set only on Failed / TimedOut.
    #[serde(default)]
    pub error: Option<String>,

    /// Timestamp captured at submission.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}
