//! Delegate chains: natural language → AQL → answer or visualization code.
//!
//! Implements Text-to-AQL translation using LLMs, plus the keyword predicate
//! that decides which chain a query is routed to.

pub mod codegen;
mod prompt;

pub use codegen::VizCodeChain;

use crate::arango::{ArangoClient, ArangoError};
use crate::llm::{ChatClient, LlmError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("database error: {0}")]
    Database(#[from] ArangoError),
    #[error("generated query contains write operations or unsafe keywords")]
    UnsafeQuery,
}

pub type ChainResult<T> = Result<T, ChainError>;

/// Which delegate a user query is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRoute {
    /// Natural-language answer
    Answer,
    /// Generated plot
    Visualize,
}

impl QueryRoute {
    /// A query containing "visualize" or "show" (case-insensitive) takes the
    /// visualization path; everything else the text path.
    pub fn classify(query: &str) -> Self {
        let q = query.to_lowercase();
        if ["visualize", "show"].iter().any(|kw| q.contains(kw)) {
            QueryRoute::Visualize
        } else {
            QueryRoute::Answer
        }
    }
}

/// Question → AQL → execute → natural-language answer.
#[derive(Clone)]
pub struct GraphQaChain {
    db: Arc<ArangoClient>,
    llm: ChatClient,
}

/// Result rows beyond this many are not fed to the summarization prompt.
const SUMMARY_ROW_CAP: usize = 20;

impl GraphQaChain {
    pub fn new(db: Arc<ArangoClient>, llm: ChatClient) -> Self {
        Self { db, llm }
    }

    /// Run the full chain. Synthesizes AQL from the question and a sampled
    /// schema summary, rejects mutating queries, executes the statement, and
    /// asks the model to summarize the rows.
    pub async fn answer(&self, question: &str) -> ChainResult<String> {
        let schema = self.db.schema_summary().await?;

        let reply = self
            .llm
            .chat(prompt::AQL_SYSTEM, &prompt::aql_user(question, &schema))
            .await?;
        let aql = extract_aql(&reply);

        if !is_read_only(&aql) {
            return Err(ChainError::UnsafeQuery);
        }

        tracing::debug!(%aql, "executing synthesized query");
        let rows = self.db.execute_aql(&aql).await?;

        let shown = &rows[..rows.len().min(SUMMARY_ROW_CAP)];
        let summary = self
            .llm
            .chat(
                prompt::SUMMARY_SYSTEM,
                &prompt::summary_user(question, &serde_json::to_string(shown).unwrap_or_default()),
            )
            .await?;

        Ok(summary)
    }

    /// Error-string form used by the HTTP layer: every failure collapses to a
    /// message shown to the user, never a transport error.
    pub async fn answer_text(&self, question: &str) -> String {
        match self.answer(question).await {
            Ok(summary) if !summary.trim().is_empty() => summary,
            Ok(_) => "No result found".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "query chain failed");
                format!("Error processing query: {}", e)
            }
        }
    }
}

/// Extract an AQL statement from an LLM response that may contain markdown
/// fences, explanations, or multiple code blocks.
fn extract_aql(response: &str) -> String {
    let trimmed = response.trim();

    // If response contains a fenced code block, extract the first one
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        // Skip language tag (e.g. "aql\n")
        let code_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        if let Some(end) = after_fence[code_start..].find("```") {
            return after_fence[code_start..code_start + end].trim().to_string();
        }
    }

    // No fences — take lines that look like AQL
    let aql_keywords = ["FOR", "RETURN", "LET", "COLLECT", "WITH"];
    let lines: Vec<&str> = trimmed
        .lines()
        .filter(|line| {
            let upper = line.trim().to_uppercase();
            aql_keywords.iter().any(|kw| upper.starts_with(kw))
                || upper.starts_with("FILTER")
                || upper.starts_with("SORT")
                || upper.starts_with("LIMIT")
        })
        .collect();

    if !lines.is_empty() {
        return lines.join(" ");
    }

    // Fallback: strip outer fences and return as-is
    trimmed
        .trim_start_matches("```aql")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
        .to_string()
}

/// Read-only guard over synthesized AQL.
fn is_read_only(query: &str) -> bool {
    let q = query.to_uppercase();
    !q.contains("INSERT")
        && !q.contains("UPDATE")
        && !q.contains("REPLACE")
        && !q.contains("REMOVE")
        && !q.contains("UPSERT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_visualize_keyword() {
        assert_eq!(QueryRoute::classify("visualize the users"), QueryRoute::Visualize);
        assert_eq!(QueryRoute::classify("VISUALIZE purchases"), QueryRoute::Visualize);
    }

    #[test]
    fn test_classify_show_keyword() {
        assert_eq!(QueryRoute::classify("Show me all patients"), QueryRoute::Visualize);
        assert_eq!(QueryRoute::classify("shOw the graph"), QueryRoute::Visualize);
    }

    #[test]
    fn test_classify_keyword_inside_word() {
        // Substring match, same as the keyword check it replaces
        assert_eq!(QueryRoute::classify("showcase everything"), QueryRoute::Visualize);
    }

    #[test]
    fn test_classify_defaults_to_answer() {
        assert_eq!(QueryRoute::classify("how many users are there"), QueryRoute::Answer);
        assert_eq!(QueryRoute::classify(""), QueryRoute::Answer);
    }

    #[test]
    fn test_extract_aql_from_fenced_block() {
        let response = "Here is the query:\n```aql\nFOR u IN users RETURN u\n```\nDone.";
        assert_eq!(extract_aql(response), "FOR u IN users RETURN u");
    }

    #[test]
    fn test_extract_aql_fence_without_language_tag() {
        let response = "```\nFOR u IN users\n  LIMIT 5\n  RETURN u.name\n```";
        assert_eq!(extract_aql(response), "FOR u IN users\n  LIMIT 5\n  RETURN u.name");
    }

    #[test]
    fn test_extract_aql_keyword_lines() {
        let response = "The query below lists users.\nFOR u IN users\nRETURN u.name\nThat is all.";
        assert_eq!(extract_aql(response), "FOR u IN users RETURN u.name");
    }

    #[test]
    fn test_extract_aql_plain_statement() {
        assert_eq!(
            extract_aql("FOR doc IN items LIMIT 10 RETURN doc"),
            "FOR doc IN items LIMIT 10 RETURN doc"
        );
    }

    #[test]
    fn test_read_only_guard() {
        assert!(is_read_only("FOR u IN users RETURN u"));
        assert!(!is_read_only("INSERT { name: 'x' } INTO users"));
        assert!(!is_read_only("FOR u IN users REMOVE u IN users"));
        assert!(!is_read_only("for u in users update u with { a: 1 } in users"));
    }
}
