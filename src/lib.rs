//! GraphTalk
//!
//! A small web application for asking natural-language questions about a
//! graph stored in ArangoDB. Questions are translated to AQL by a hosted
//! LLM, executed over the ArangoDB HTTP API, and either summarized back as
//! text or turned into generated plotting code whose output image the page
//! displays.
//!
//! The interesting work happens in two delegate chains:
//!
//! - [`chain::GraphQaChain`]: question → AQL → execution → natural-language
//!   answer.
//! - [`chain::VizCodeChain`]: question → answer → few-shot code-generation
//!   prompt → fenced plotting source, which [`viz::CodeRunner`] executes in a
//!   separate interpreter process.

#![warn(clippy::all)]

pub mod arango;
pub mod chain;
pub mod config;
pub mod http;
pub mod llm;
pub mod viz;

pub use arango::{ArangoClient, ArangoConfig, ArangoError, ArangoResult};
pub use chain::{ChainError, ChainResult, GraphQaChain, QueryRoute, VizCodeChain};
pub use config::AppConfig;
pub use http::{AppState, HttpServer};
pub use llm::{ChatClient, LlmConfig, LlmError, LlmProvider, LlmResult};
pub use viz::{CodeRunner, VizError, VizResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
