//! Plan domain: form parameters, prompt construction, request lifecycle

mod orchestrator;
mod prompt;
mod request;

pub use orchestrator::{PlanOrchestrator, RequestStatus, SubmitError};
pub use prompt::{build_prompt, format_currency};
pub use request::{PlanRequest, ValidationError};
