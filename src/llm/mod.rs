//! Language-model client (Ollama HTTP API).
//!
//! The model is the single external, fallible, potentially slow dependency
//! in the pipeline, so it sits behind the narrow `ModelClient` trait: one
//! blocking `invoke(prompt) -> text` call. The deterministic core is tested
//! entirely with canned implementations of this trait.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_HOST: &str = "http://localhost:11434";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Narrow interface to the external model process.
///
/// Implementations return the model's raw text — untrusted, never executed,
/// only fed to the intent parser.
pub trait ModelClient {
    fn invoke(&self, prompt: &str) -> Result<String, AppError>;
}

/// Blocking client for a local Ollama server.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Build a client for `model`, reading `OLLAMA_HOST` from the
    /// environment (`.env` supported) and defaulting to localhost.
    pub fn from_env(model: &str) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Self::new(&base_url, model)
    }

    pub fn new(base_url: &str, model: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::model(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

impl ModelClient for OllamaClient {
    fn invoke(&self, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| AppError::model(format!("Ollama request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let diagnostic = resp.text().unwrap_or_default();
            return Err(AppError::model(format!(
                "Ollama returned status {status} for model '{}': {}",
                self.model,
                diagnostic.trim()
            )));
        }

        let body: GenerateResponse = resp
            .json()
            .map_err(|e| AppError::model(format!("Failed to parse Ollama response: {e}")))?;

        Ok(body.response.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
