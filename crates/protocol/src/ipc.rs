//! Core-to-UI event protocol.
//!
//! This module defines the message types for asynchronous communication
//! between the search core and UI clients.
//!
//! Communication is asynchronous and channel-based, allowing the UI to
//! remain responsive while the core drives the poll loop. The four
//! terminal outcomes (completed, failed, timed out, cancelled) are kept
//! distinct so the UI never has to collapse them into one generic error.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::task_models::TaskStatus;

/// Events sent from the search core to UI clients.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "taskStatusUpdate",
///   "payload": {
///     "task_id": "abc",
///     "status": "PROCESSING",
///     "progress": 40,
///     "message": "Scanning fare classes"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// The backend accepted a new search task.
    TaskSubmitted { task_id: String },

    /// A poll observed new progress for the task.
    TaskStatusUpdate {
        task_id: String,
        status: TaskStatus,
        progress: u8,
        message: String,
    },

    /// The task completed and its result has been stored.
    TaskCompleted { task_id: String },

    /// The task failed: backend-reported failure, rejected submission,
    /// or the result fetch failed after completion.
    TaskFailed { task_id: String, error: String },

    /// The global wall-clock ceiling elapsed before the backend resolved
    /// the task.
    TaskTimedOut { task_id: String, error: String },

    /// The task was cancelled by the caller (explicitly, or implicitly by
    /// a superseding search).
    TaskCancelled { task_id: String },
}
