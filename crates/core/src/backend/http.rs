//! HTTP implementation of the task backend.

use crate::backend::{BackendError, TaskBackend};
use crate::config::models::BackendConfig;
use async_trait::async_trait;
use reqwest::Client;
use sky_protocol::api_models::{ResultResponse, StatusResponse, SubmitResponse};
use sky_protocol::search_models::SearchParams;
use std::time::Duration;

/// Task backend speaking HTTP+JSON to the flight search service.
pub struct HttpTaskBackend {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl HttpTaskBackend {
    /// Build a client from backend configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl TaskBackend for HttpTaskBackend {
    async fn submit_search(&self, params: &SearchParams) -> Result<SubmitResponse, BackendError> {
        let request = self.client.post(self.url("/api/flights/deep-search")).json(params);
        let response = self.with_auth(request).send().await?.error_for_status()?;
        Ok(response.json::<SubmitResponse>().await?)
    }

    async fn get_status(&self, task_id: &str) -> Result<StatusResponse, BackendError> {
        let request = self.client.get(self.url(&format!("/api/tasks/{task_id}/status")));
        let response = self.with_auth(request).send().await?.error_for_status()?;
        Ok(response.json::<StatusResponse>().await?)
    }

    async fn get_result(&self, task_id: &str) -> Result<ResultResponse, BackendError> {
        let request = self.client.get(self.url(&format!("/api/tasks/{task_id}/result")));
        let response = self.with_auth(request).send().await?.error_for_status()?;
        Ok(response.json::<ResultResponse>().await?)
    }
}
