//! Mock task backend implementation for testing.
//!
//! Responses are scripted per call. The status script repeats its last
//! entry once drained, so a backend that "never finishes" is a single
//! Processing entry. Every status/result call is recorded with its
//! virtual-time instant so tests can assert the poll cadence.

use crate::backend::{BackendError, TaskBackend};
use async_trait::async_trait;
use sky_protocol::api_models::{BackendStatus, ResultResponse, StatusResponse, SubmitResponse};
use sky_protocol::search_models::SearchParams;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use tokio::time::Instant;
use uuid::Uuid;

/// One recorded backend call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Task id the call was made for.
    pub task_id: String,
    /// Instant the call arrived, in tokio (possibly paused) time.
    pub at: Instant,
}

/// One scripted status reply: either an envelope or a transport failure.
pub type ScriptedStatus = Result<StatusResponse, String>;

pub struct MockTaskBackend {
    reject_submission: Option<String>,
    statuses: Mutex<VecDeque<ScriptedStatus>>,
    result: Mutex<Option<Result<ResultResponse, String>>>,
    submitted: Mutex<Vec<String>>,
    status_calls: Mutex<Vec<RecordedCall>>,
    result_calls: Mutex<Vec<RecordedCall>>,
}

impl MockTaskBackend {
    pub fn new(statuses: Vec<ScriptedStatus>) -> Self {
        Self {
            reject_submission: None,
            statuses: Mutex::new(statuses.into()),
            result: Mutex::new(None),
            submitted: Mutex::new(Vec::new()),
            status_calls: Mutex::new(Vec::new()),
            result_calls: Mutex::new(Vec::new()),
        }
    }

    /// Backend that reports Processing once, then Completed, and serves
    /// the given result payload.
    pub fn completing(result: serde_json::Value) -> Self {
        Self::new(vec![
            Ok(StatusResponse::running(BackendStatus::Processing, 40, "Scanning fare classes")),
            Ok(StatusResponse::running(BackendStatus::Completed, 100, "Done")),
        ])
        .with_result(Ok(ResultResponse {
            success: true,
            data: Some(result),
            message: None,
        }))
    }

    /// Backend that reports Processing once, then a terminal failure.
    pub fn failing(error: impl Into<String>) -> Self {
        Self::new(vec![
            Ok(StatusResponse::running(BackendStatus::Processing, 10, "Analyzing route network")),
            Ok(StatusResponse::failed(error)),
        ])
    }

    /// Backend that stays in Processing forever.
    pub fn never_finishing() -> Self {
        Self::new(vec![Ok(StatusResponse::running(
            BackendStatus::Processing,
            25,
            "Querying airlines",
        ))])
    }

    /// Backend that rejects every submission with the given reason.
    pub fn rejecting(message: impl Into<String>) -> Self {
        let mut backend = Self::new(vec![]);
        backend.reject_submission = Some(message.into());
        backend
    }

    /// Override the scripted result reply; `Err` simulates a transport
    /// failure during the result fetch.
    pub fn with_result(self, result: Result<ResultResponse, String>) -> Self {
        Self {
            result: Mutex::new(Some(result)),
            ..self
        }
    }

    /// Task ids issued by [`TaskBackend::submit_search`], in order.
    pub async fn submitted_ids(&self) -> Vec<String> {
        self.submitted.lock().await.clone()
    }

    /// Every `get_status` call seen so far.
    pub async fn status_calls(&self) -> Vec<RecordedCall> {
        self.status_calls.lock().await.clone()
    }

    /// Every `get_result` call seen so far.
    pub async fn result_calls(&self) -> Vec<RecordedCall> {
        self.result_calls.lock().await.clone()
    }
}

#[async_trait]
impl TaskBackend for MockTaskBackend {
    async fn submit_search(&self, _params: &SearchParams) -> Result<SubmitResponse, BackendError> {
        if let Some(reason) = &self.reject_submission {
            return Ok(SubmitResponse::rejected(reason.clone()));
        }

        let task_id = Uuid::new_v4().to_string();
        self.submitted.lock().await.push(task_id.clone());
        Ok(SubmitResponse::accepted(task_id))
    }

    async fn get_status(&self, task_id: &str) -> Result<StatusResponse, BackendError> {
        self.status_calls.lock().await.push(RecordedCall {
            task_id: task_id.to_string(),
            at: Instant::now(),
        });

        let mut statuses = self.statuses.lock().await;
        let scripted = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };

        match scripted {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(BackendError::Connection(reason)),
            None => Err(BackendError::Connection("no scripted status".to_string())),
        }
    }

    async fn get_result(&self, task_id: &str) -> Result<ResultResponse, BackendError> {
        self.result_calls.lock().await.push(RecordedCall {
            task_id: task_id.to_string(),
            at: Instant::now(),
        });

        match self.result.lock().await.clone() {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(BackendError::Connection(reason)),
            None => Ok(ResultResponse {
                success: false,
                data: None,
                message: Some("no scripted result".to_string()),
            }),
        }
    }
}
