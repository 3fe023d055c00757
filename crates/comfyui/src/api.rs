//! REST API client for the ComfyUI HTTP endpoints.
//!
//! Wraps workflow submission and history retrieval using [`reqwest`].

use serde::Deserialize;

use crate::workflow::Workflow;

/// HTTP client for a single ComfyUI instance.
pub struct ComfyUiApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response returned by the queue endpoint after successfully queuing a
/// workflow.
#[derive(Debug, Deserialize)]
pub struct QueueResponse {
    /// Server-assigned identifier for the queued prompt.
    pub prompt_id: String,
}

/// Errors from the ComfyUI REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ComfyUiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// ComfyUI returned a non-2xx status code.
    #[error("ComfyUI API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ComfyUiApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:8188`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base HTTP URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a workflow for execution.
    ///
    /// Sends a `POST /api/queue` request with the workflow graph and
    /// returns the server-assigned `prompt_id`.
    pub async fn queue_workflow(
        &self,
        workflow: &Workflow,
    ) -> Result<QueueResponse, ComfyUiApiError> {
        let body = serde_json::json!({ "workflow": workflow });

        let response = self
            .client
            .post(format!("{}/api/queue", self.base_url))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Retrieve the execution history entry for a specific prompt.
    ///
    /// Sends a `GET /api/history/{prompt_id}` request. The returned JSON
    /// maps prompt IDs to entries containing execution status and output
    /// file references. Returns `None` while the server has no entry yet.
    pub async fn get_history(
        &self,
        prompt_id: &str,
    ) -> Result<Option<serde_json::Value>, ComfyUiApiError> {
        let response = self
            .client
            .get(format!("{}/api/history/{prompt_id}", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    /// Retrieve the server status (queue depth etc.) as raw JSON.
    pub async fn get_status(&self) -> Result<serde_json::Value, ComfyUiApiError> {
        let response = self
            .client
            .get(format!("{}/api/status", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ComfyUiApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ComfyUiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ComfyUiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ComfyUiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
