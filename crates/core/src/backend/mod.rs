//! Task backend abstraction layer.
//!
//! The orchestrator only depends on the [`TaskBackend`] trait; the real
//! HTTP client and the scripted mock are interchangeable behind it.

pub mod http;
pub mod mock;

use async_trait::async_trait;
use sky_protocol::api_models::{ResultResponse, StatusResponse, SubmitResponse};
use sky_protocol::search_models::SearchParams;
use thiserror::Error;

/// Transport-level errors from a task backend.
///
/// These never terminate a poll loop on their own: status queries are
/// idempotent and retried on the next tick.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The remote collaborator that runs deep searches.
///
/// All three calls are plain request/response over HTTP+JSON in the real
/// system. Responses carry a `success` envelope; a `Result::Err` from any
/// of these methods means the transport itself failed.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Submit a new deep-search task.
    async fn submit_search(&self, params: &SearchParams) -> Result<SubmitResponse, BackendError>;

    /// Query the status of an outstanding task.
    async fn get_status(&self, task_id: &str) -> Result<StatusResponse, BackendError>;

    /// Fetch the result of a completed task.
    async fn get_result(&self, task_id: &str) -> Result<ResultResponse, BackendError>;
}
