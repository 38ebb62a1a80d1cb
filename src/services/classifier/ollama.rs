//! Ollama backend transport
//!
//! Local model served over HTTP. One request per classification against
//! `/api/generate` with streaming disabled and JSON output format requested;
//! the reply wraps the model text in a `response` field.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ClassifierError;

/// Model inference is slow but must not hang forever
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Local-model backend
pub struct OllamaBackend {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(base_url: &str, model: &str) -> Result<Self, ClassifierError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Send one prompt, return the raw model text
    pub(crate) async fn complete(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<String, ClassifierError> {
        let url = format!("{}/api/generate", self.base_url);

        tracing::debug!(url = %url, model = %self.model, "Querying Ollama");

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                system,
                stream: false,
                format: "json",
            })
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api(status.as_u16(), error_text));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Schema(e.to_string()))?;

        Ok(body.response)
    }
}
