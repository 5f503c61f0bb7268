//! Plan generation transport
//!
//! The `CompletionClient` trait abstracts the remote generation endpoint
//! so the orchestrator and TUI can run against a mock in tests.

mod client;
mod error;
mod http;

pub use client::{CompletionClient, PlanSource};
pub use error::GeneratorError;
pub use http::HttpCompletionClient;

#[cfg(test)]
pub use client::mock;
