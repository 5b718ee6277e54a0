// ============================================================
// Layer 6 — Completion Client
// ============================================================
// Talks to an OpenAI-compatible text-completion endpoint:
//
//   POST {base_url}/v1/completions
//   Authorization: Bearer <credential>
//   { "model": ..., "prompt": ..., "max_tokens": ... }
//
// The answer is the first choice's text with surrounding
// whitespace removed. Anything else maps to `Upstream`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, ServiceError};
use crate::domain::traits::CompletionClient;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_MAX_TOKENS: u32 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model:      &'a str,
    prompt:     &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

pub struct OpenAiCompletionClient {
    http:       reqwest::Client,
    base_url:   String,
    model:      String,
    max_tokens: u32,
}

impl OpenAiCompletionClient {
    pub fn new(
        base_url:   impl Into<String>,
        model:      impl Into<String>,
        max_tokens: u32,
        timeout:    Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Internal(format!("cannot build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            max_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String> {
        let body = CompletionRequest {
            model:      &self.model,
            prompt,
            max_tokens: self.max_tokens,
        };

        tracing::debug!("POST {} (model={})", self.endpoint(), self.model);
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("completion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Completion provider answered {}", status);
            return Err(ServiceError::Upstream(format!("provider returned HTTP {status}")));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("malformed completion response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text.trim().to_string())
            .ok_or_else(|| ServiceError::Upstream("completion response had no choices".into()))
    }
}
