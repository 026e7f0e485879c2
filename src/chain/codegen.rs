//! Visualization-code generation (the second delegate).

use crate::chain::{prompt, ChainResult, GraphQaChain};
use crate::llm::ChatClient;
use regex::Regex;
use std::sync::OnceLock;

/// Question → answer (via the Q&A chain) → few-shot prompt to a coder model →
/// extracted plotting source.
#[derive(Clone)]
pub struct VizCodeChain {
    qa: GraphQaChain,
    coder: ChatClient,
}

impl VizCodeChain {
    pub fn new(qa: GraphQaChain, coder: ChatClient) -> Self {
        Self { qa, coder }
    }

    /// Generate plotting source for the query. `Ok(None)` means the model
    /// reply contained no fenced code block, so there is nothing to execute.
    pub async fn generate_code(&self, query: &str) -> ChainResult<Option<String>> {
        let answer = self.qa.answer(query).await?;

        let reply = self
            .coder
            .chat(
                &prompt::viz_system(query, &answer),
                "Generate the visualization code.",
            )
            .await?;

        Ok(extract_code(&reply))
    }
}

fn code_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:\w+)?[ \t]*\n?(.*?)```").expect("valid regex"))
}

/// Extract the first fenced code block from an LLM reply, with or without a
/// language tag. Returns `None` when no block is present.
pub fn extract_code(reply: &str) -> Option<String> {
    code_fence()
        .captures(reply)
        .map(|caps| caps[1].trim().to_string())
        .filter(|code| !code.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_code_python_fence() {
        let reply = "Here you go:\n```python\nimport networkx as nx\nprint(1)\n```\nEnjoy.";
        assert_eq!(
            extract_code(reply).unwrap(),
            "import networkx as nx\nprint(1)"
        );
    }

    #[test]
    fn test_extract_code_untagged_fence() {
        let reply = "```\nplt.savefig('static/plot.png')\n```";
        assert_eq!(extract_code(reply).unwrap(), "plt.savefig('static/plot.png')");
    }

    #[test]
    fn test_extract_code_takes_first_block() {
        let reply = "```python\nfirst\n```\ntext\n```python\nsecond\n```";
        assert_eq!(extract_code(reply).unwrap(), "first");
    }

    #[test]
    fn test_extract_code_no_fence_yields_none() {
        assert_eq!(extract_code("no code here, sorry"), None);
    }

    #[test]
    fn test_extract_code_empty_fence_yields_none() {
        assert_eq!(extract_code("```python\n```"), None);
    }
}
