//! Plan request lifecycle
//!
//! Drives one generation request at a time: validate, call the client,
//! record the outcome. The TUI and the batch CLI both sit on top of this.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{PlanRequest, ValidationError, build_prompt};
use crate::generator::{CompletionClient, GeneratorError};

/// Lifecycle of the current (or most recent) generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// No request has been made yet
    #[default]
    Idle,
    /// A request is on the wire
    InFlight,
    /// The last request produced a plan
    Succeeded,
    /// The last request failed
    Failed,
}

/// Errors from submitting a request, collapsed to the two user-facing
/// categories
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GeneratorError),
}

/// Owns the client, the request status, and the last successful plan
pub struct PlanOrchestrator {
    client: Arc<dyn CompletionClient>,
    status: RequestStatus,
    plan: Option<String>,
}

impl PlanOrchestrator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        debug!("PlanOrchestrator::new: called");
        Self {
            client,
            status: RequestStatus::Idle,
            plan: None,
        }
    }

    /// Current request status
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// The last successfully generated plan, if any
    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    /// Run one generation request to completion
    ///
    /// Validation failures return before any network call and leave the
    /// status untouched. A generation failure sets `Failed` but keeps the
    /// previously stored plan. Resubmitting issues a fresh call; the
    /// stored plan is replaced only on success.
    pub async fn submit(&mut self, request: &PlanRequest) -> Result<&str, SubmitError> {
        debug!(brand = %request.brand_name, "submit: called");
        request.validate()?;

        self.status = RequestStatus::InFlight;
        let prompt = build_prompt(request);
        debug!(prompt_len = prompt.len(), "submit: prompt built, calling client");

        match self.client.generate(&prompt).await {
            Ok(source) => {
                info!(brand = %request.brand_name, "submit: plan generated");
                self.plan = Some(source.into_text());
                self.status = RequestStatus::Succeeded;
                Ok(self.plan.as_deref().unwrap_or_default())
            }
            Err(e) => {
                warn!(error = %e, "submit: generation failed");
                self.status = RequestStatus::Failed;
                Err(SubmitError::Generation(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::PlanSource;
    use crate::generator::mock::MockCompletionClient;

    fn valid_request() -> PlanRequest {
        let mut request = PlanRequest::new("Acme Coffee", 25_000);
        request.kpis = vec!["App Installs".to_string()];
        request.channels = vec!["TikTok Ads (Gen Z)".to_string()];
        request
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_network_call() {
        let client = Arc::new(MockCompletionClient::with_plans(vec![PlanSource::Structured(
            "# Plan".to_string(),
        )]));
        let mut orchestrator = PlanOrchestrator::new(client.clone());

        let mut request = valid_request();
        request.brand_name = String::new();

        let result = orchestrator.submit(&request).await;
        assert!(matches!(result, Err(SubmitError::Validation(ValidationError::MissingBrand))));
        assert_eq!(client.call_count(), 0);
        assert_eq!(orchestrator.status(), RequestStatus::Idle);
        assert!(orchestrator.plan().is_none());
    }

    #[tokio::test]
    async fn test_structured_response_stored() {
        let client = Arc::new(MockCompletionClient::with_plans(vec![PlanSource::Structured(
            "# Plan".to_string(),
        )]));
        let mut orchestrator = PlanOrchestrator::new(client);

        let text = orchestrator.submit(&valid_request()).await.unwrap().to_string();
        assert_eq!(text, "# Plan");
        assert_eq!(orchestrator.status(), RequestStatus::Succeeded);
        assert_eq!(orchestrator.plan(), Some("# Plan"));
    }

    #[tokio::test]
    async fn test_raw_response_stored_verbatim() {
        let body = r#"{"output": "not the result field"}"#;
        let client = Arc::new(MockCompletionClient::with_plans(vec![PlanSource::Raw(body.to_string())]));
        let mut orchestrator = PlanOrchestrator::new(client);

        orchestrator.submit(&valid_request()).await.unwrap();
        assert_eq!(orchestrator.plan(), Some(body));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_plan() {
        let client = Arc::new(MockCompletionClient::new(vec![
            Ok(PlanSource::Structured("# First Plan".to_string())),
            Err("engine stalled".to_string()),
        ]));
        let mut orchestrator = PlanOrchestrator::new(client);

        orchestrator.submit(&valid_request()).await.unwrap();
        assert_eq!(orchestrator.plan(), Some("# First Plan"));

        let result = orchestrator.submit(&valid_request()).await;
        assert!(matches!(result, Err(SubmitError::Generation(_))));
        assert_eq!(orchestrator.status(), RequestStatus::Failed);
        assert_eq!(orchestrator.plan(), Some("# First Plan"));
    }

    #[tokio::test]
    async fn test_in_flight_cleared_on_both_paths() {
        let client = Arc::new(MockCompletionClient::new(vec![
            Ok(PlanSource::Structured("# Plan".to_string())),
            Err("down".to_string()),
        ]));
        let mut orchestrator = PlanOrchestrator::new(client);

        orchestrator.submit(&valid_request()).await.unwrap();
        assert_ne!(orchestrator.status(), RequestStatus::InFlight);

        let _ = orchestrator.submit(&valid_request()).await;
        assert_ne!(orchestrator.status(), RequestStatus::InFlight);
    }

    #[tokio::test]
    async fn test_resubmission_issues_fresh_call() {
        let client = Arc::new(MockCompletionClient::with_plans(vec![
            PlanSource::Structured("# Plan v1".to_string()),
            PlanSource::Structured("# Plan v2".to_string()),
        ]));
        let mut orchestrator = PlanOrchestrator::new(client.clone());

        let request = valid_request();
        orchestrator.submit(&request).await.unwrap();
        orchestrator.submit(&request).await.unwrap();

        assert_eq!(client.call_count(), 2);
        assert_eq!(orchestrator.status(), RequestStatus::Succeeded);
        assert_eq!(orchestrator.plan(), Some("# Plan v2"));
    }
}
