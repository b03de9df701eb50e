//! Wire envelopes for the task backend HTTP API.
//!
//! The backend wraps every response in a `success` envelope. Transport
//! details (headers, auth, base URL) live in the backend client; these
//! models only describe the JSON bodies.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Task status as reported by the backend.
///
/// This is the backend's view of the task, distinct from the richer
/// client-side [`crate::task_models::TaskStatus`]: the backend never
/// reports Cancelled or TimedOut, those are client-local outcomes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackendStatus {
    /// Queued, not yet started.
    Pending,

    /// The deep-search pipeline is running.
    Processing,

    /// Finished; the result can be fetched.
    Completed,

    /// Failed terminally on the backend.
    Failed,
}

/// Payload of a successful task submission.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct SubmitData {
    /// Identifier for the newly created task.
    pub task_id: String,
}

/// Response to a search submission request.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct SubmitResponse {
    /// Whether the backend accepted the submission.
    pub success: bool,

    /// Present iff `success` is true.
    #[serde(default)]
    pub data: Option<SubmitData>,

    /// Human-readable rejection reason when `success` is false.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of a status query.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct StatusData {
    /// Backend-reported lifecycle status.
    pub status: BackendStatus,

    /// Progress 0-100. May be absent or non-monotonic.
    #[serde(default)]
    pub progress: Option<u8>,

    /// Human-readable progress message.
    #[serde(default)]
    pub message: Option<String>,

    /// Error detail, populated when `status` is FAILED.
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to a task status query.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct StatusResponse {
    /// Whether the query itself succeeded.
    pub success: bool,

    /// Present iff `success` is true.
    #[serde(default)]
    pub data: Option<StatusData>,

    /// Diagnostic message for unsuccessful queries.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a task result fetch.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct ResultResponse {
    /// Whether the result was available.
    pub success: bool,

    /// The search result payload, opaque to this client.
    #[serde(default)]
    #[ts(type = "unknown")]
    pub data: Option<serde_json::Value>,

    /// Diagnostic message when the result is unavailable.
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitResponse {
    /// Convenience constructor for an accepted submission.
    pub fn accepted(task_id: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(SubmitData { task_id: task_id.into() }),
            message: None,
        }
    }

    /// Convenience constructor for a rejected submission.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl StatusResponse {
    /// Convenience constructor for an in-flight status report.
    pub fn running(status: BackendStatus, progress: u8, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(StatusData {
                status,
                progress: Some(progress),
                message: Some(message.into()),
                error: None,
            }),
            message: None,
        }
    }

    /// Convenience constructor for a backend-reported failure.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(StatusData {
                status: BackendStatus::Failed,
                progress: None,
                message: None,
                error: Some(error.into()),
            }),
            message: None,
        }
    }
}
