//! HTTP client for the generation endpoint
//!
//! POSTs `{"prompt": "..."}` and resolves the response into a PlanSource.
//! The endpoint usually answers `{"result": "<markdown>"}` but is not
//! guaranteed to; any other body is kept verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{CompletionClient, GeneratorError, PlanSource};
use crate::config::GeneratorConfig;

/// HTTP generation client
pub struct HttpCompletionClient {
    endpoint: String,
    http: Client,
}

impl HttpCompletionClient {
    /// Create a new client from configuration
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder().timeout(timeout).build().map_err(GeneratorError::Network)?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    /// Resolve a response body into one of the two plan shapes
    ///
    /// A JSON object with a string `result` field is Structured; every
    /// other body (plain text, JSON of another shape, malformed JSON) is
    /// Raw with the body text unchanged.
    fn resolve_body(body: &str) -> PlanSource {
        debug!(body_len = body.len(), "resolve_body: called");
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
            && let Some(result) = value.get("result").and_then(|r| r.as_str())
        {
            debug!("resolve_body: structured result field found");
            return PlanSource::Structured(result.to_string());
        }

        debug!("resolve_body: falling back to raw body");
        PlanSource::Raw(body.to_string())
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn generate(&self, prompt: &str) -> Result<PlanSource, GeneratorError> {
        debug!(prompt_len = prompt.len(), "generate: called");
        let body = serde_json::json!({ "prompt": prompt });

        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(GeneratorError::Network)?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            debug!(%status, "generate: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::ApiError { status, message: text });
        }

        debug!("generate: success");
        let text = response.text().await.map_err(GeneratorError::Network)?;
        Ok(Self::resolve_body(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_body_structured() {
        let source = HttpCompletionClient::resolve_body(r##"{"result": "# Marketing Master Plan"}"##);
        assert_eq!(source, PlanSource::Structured("# Marketing Master Plan".to_string()));
    }

    #[test]
    fn test_resolve_body_plain_text() {
        let source = HttpCompletionClient::resolve_body("# Plan as plain markdown");
        assert_eq!(source, PlanSource::Raw("# Plan as plain markdown".to_string()));
    }

    #[test]
    fn test_resolve_body_json_without_result() {
        let body = r#"{"output": "something else"}"#;
        let source = HttpCompletionClient::resolve_body(body);
        assert_eq!(source, PlanSource::Raw(body.to_string()));
    }

    #[test]
    fn test_resolve_body_non_string_result() {
        // `result` must be a string for the structured shape
        let body = r#"{"result": 42}"#;
        let source = HttpCompletionClient::resolve_body(body);
        assert_eq!(source, PlanSource::Raw(body.to_string()));
    }

    #[test]
    fn test_from_config() {
        let config = GeneratorConfig::default();
        let client = HttpCompletionClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint, "https://groqprompt.netlify.app/api/ai");
    }
}
