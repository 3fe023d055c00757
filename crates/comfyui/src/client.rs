//! High-level generation client: submit, poll, extract outputs.
//!
//! Implements the `VideoProvider` contract. The wait is a fixed-interval
//! poll against the history endpoint with a hard attempt cap; there is
//! no backoff and no cancellation of a queued execution.

use std::time::Duration;

use async_trait::async_trait;

use playlet_core::generation::{
    ArtifactRef, LipSyncRequest, ProviderError, VideoProvider, VideoRequest,
};

use crate::api::ComfyUiApi;
use crate::workflow::{self, Workflow};

/// Configuration for a ComfyUI generation client.
#[derive(Debug, Clone)]
pub struct ComfyUiConfig {
    /// Base HTTP URL, e.g. `http://localhost:8188`.
    pub base_url: String,
    /// Delay between history polls.
    pub poll_interval: Duration,
    /// Maximum number of history polls before the attempt is abandoned.
    pub max_polls: u32,
}

impl Default for ComfyUiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8188".to_string(),
            poll_interval: Duration::from_secs(1),
            max_polls: 300,
        }
    }
}

/// Outcome of inspecting one history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HistoryState {
    /// No entry yet, or the entry is still executing.
    Pending,
    /// Execution finished; outputs are available.
    Completed,
    /// Execution failed with the given diagnostic.
    Errored(String),
}

/// Classify a prompt's history entry, if present.
fn classify_entry(history: &serde_json::Value, prompt_id: &str) -> HistoryState {
    let Some(entry) = history.get(prompt_id) else {
        return HistoryState::Pending;
    };
    let status = &entry["status"];
    if status["completed"].as_bool() == Some(true) {
        return HistoryState::Completed;
    }
    if status["errored"].as_bool() == Some(true) {
        let message = status["error_message"]
            .as_str()
            .unwrap_or("unknown workflow error");
        return HistoryState::Errored(message.to_string());
    }
    HistoryState::Pending
}

/// Extract the first output file reference from a completed entry and
/// turn it into a `/view` URL on the given base.
fn first_output_url(base_url: &str, entry: &serde_json::Value) -> Option<String> {
    let outputs = entry.get("outputs")?.as_object()?;
    for node in outputs.values() {
        if let Some(file) = node.get("images").and_then(|imgs| imgs.get(0)) {
            let filename = file["filename"].as_str()?;
            let file_type = file["type"].as_str().unwrap_or("output");
            return Some(format!(
                "{base_url}/view?filename={filename}&type={file_type}"
            ));
        }
    }
    None
}

/// Generation client for one ComfyUI instance.
pub struct ComfyUiClient {
    api: ComfyUiApi,
    config: ComfyUiConfig,
}

impl ComfyUiClient {
    pub fn new(config: ComfyUiConfig) -> Self {
        Self {
            api: ComfyUiApi::new(config.base_url.clone()),
            config,
        }
    }

    /// Queue a workflow and poll until it settles, returning the completed
    /// history entry.
    async fn run_workflow(&self, workflow: &Workflow) -> Result<serde_json::Value, ProviderError> {
        let queued = self
            .api
            .queue_workflow(workflow)
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        let prompt_id = queued.prompt_id;

        tracing::debug!(prompt_id = %prompt_id, "Workflow queued");

        for _ in 0..self.config.max_polls {
            let history = self
                .api
                .get_history(&prompt_id)
                .await
                .map_err(|e| ProviderError::Request(e.to_string()))?;

            if let Some(history) = history {
                match classify_entry(&history, &prompt_id) {
                    HistoryState::Completed => {
                        return history
                            .get(&prompt_id)
                            .cloned()
                            .ok_or_else(|| {
                                ProviderError::BadResponse(
                                    "completed entry vanished from history".to_string(),
                                )
                            });
                    }
                    HistoryState::Errored(message) => {
                        return Err(ProviderError::Request(format!(
                            "workflow failed: {message}"
                        )));
                    }
                    HistoryState::Pending => {}
                }
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }

        Err(ProviderError::Request(format!(
            "timed out waiting for workflow completion after {} polls",
            self.config.max_polls
        )))
    }

    /// Run a workflow and extract its single output file as an artifact.
    async fn run_for_artifact(&self, workflow: &Workflow) -> Result<ArtifactRef, ProviderError> {
        let entry = self.run_workflow(workflow).await?;
        first_output_url(&self.config.base_url, &entry)
            .map(|path| ArtifactRef { path })
            .ok_or_else(|| {
                ProviderError::BadResponse("workflow completed without outputs".to_string())
            })
    }
}

#[async_trait]
impl VideoProvider for ComfyUiClient {
    async fn image_to_video(&self, request: VideoRequest) -> Result<ArtifactRef, ProviderError> {
        let workflow = workflow::image_to_video(&request.image_url, &request.prompt);
        self.run_for_artifact(&workflow).await
    }

    async fn lip_sync(&self, request: LipSyncRequest) -> Result<ArtifactRef, ProviderError> {
        let workflow = workflow::lip_sync(
            &request.image_url,
            &request.audio_url,
            request.prompt.as_deref(),
        );
        self.run_for_artifact(&workflow).await
    }
}
