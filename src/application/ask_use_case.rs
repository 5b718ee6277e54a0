// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// Forwards a free-text question to the completion provider:
//
//   question → "Question: <q>\nAnswer:" → CompletionClient → answer
//
// The credential comes from the process environment at startup
// and is never accepted from the request.

use std::sync::Arc;

use crate::domain::error::{Result, ServiceError};
use crate::domain::traits::CompletionClient;
use crate::infra::completion::API_KEY_ENV;

pub struct AskUseCase {
    client:  Arc<dyn CompletionClient>,
    api_key: Option<String>,
}

impl AskUseCase {
    pub fn new(client: Arc<dyn CompletionClient>, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("No completion API key configured; questions will be rejected");
        }
        Self { client, api_key }
    }

    pub async fn answer(&self, question: &str) -> Result<String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::Upstream(format!("no API key configured (set {API_KEY_ENV})")))?;

        let answer = self.client.complete(&build_prompt(question), key).await?;
        tracing::debug!("Completion returned {} chars", answer.len());
        Ok(answer)
    }
}

pub fn build_prompt(question: &str) -> String {
    format!("Question: {question}\nAnswer:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call and replies with a canned result.
    struct FakeClient {
        reply: std::result::Result<String, String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeClient {
        fn replying(reply: std::result::Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(String::from).map_err(String::from),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionClient for FakeClient {
        async fn complete(&self, prompt: &str, credential: &str) -> Result<String> {
            self.calls.lock().unwrap().push((prompt.to_string(), credential.to_string()));
            self.reply.clone().map_err(ServiceError::Upstream)
        }
    }

    #[test]
    fn test_prompt_format() {
        assert_eq!(build_prompt("Why?"), "Question: Why?\nAnswer:");
    }

    #[tokio::test]
    async fn test_answer_passes_prompt_and_key() {
        let client = FakeClient::replying(Ok("Because."));
        let uc     = AskUseCase::new(client.clone(), Some("sk-1".into()));

        assert_eq!(uc.answer("Why?").await.unwrap(), "Because.");
        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[("Question: Why?\nAnswer:".to_string(), "sk-1".to_string())]);
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_calling_provider() {
        let client = FakeClient::replying(Ok("unused"));
        let uc     = AskUseCase::new(client.clone(), Some("  ".into()));

        assert!(matches!(uc.answer("q").await, Err(ServiceError::Upstream(_))));
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let uc = AskUseCase::new(FakeClient::replying(Err("HTTP 500")), Some("k".into()));
        assert!(matches!(uc.answer("q").await, Err(ServiceError::Upstream(_))));
    }
}
