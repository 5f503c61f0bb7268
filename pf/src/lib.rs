//! PlanForge - Marketing master plan generator
//!
//! Collects campaign parameters through a terminal form (or CLI flags),
//! builds a strategy prompt, sends it to a remote generation endpoint,
//! and renders the returned Markdown plan.

pub mod cli;
pub mod config;
pub mod generator;
pub mod options;
pub mod plan;
pub mod tui;

pub use config::Config;
pub use generator::{CompletionClient, GeneratorError, HttpCompletionClient, PlanSource};
pub use plan::{PlanOrchestrator, PlanRequest, RequestStatus, SubmitError, ValidationError, build_prompt};
