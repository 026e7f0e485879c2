//! Execution of generated plotting code.
//!
//! Model-generated source is never evaluated inside the server process: the
//! runner stages it in a temp file and spawns a separate interpreter with the
//! app root as working directory, so the fixed relative save path lands in
//! `static/`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use uuid::Uuid;

/// Where the generated code is told to save its image, relative to the app
/// root. The index page references the same path.
pub const PLOT_PATH: &str = "static/plot.png";

#[derive(Error, Debug)]
pub enum VizError {
    #[error("failed to stage generated code: {0}")]
    Io(#[from] std::io::Error),
    #[error("interpreter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

pub type VizResult<T> = Result<T, VizError>;

/// Runs extracted plotting source under a Python interpreter.
pub struct CodeRunner {
    python_bin: String,
    work_dir: PathBuf,
}

impl CodeRunner {
    pub fn new(python_bin: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            python_bin: python_bin.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Dedent and execute one generated script. The interpreter's exit status
    /// is the only success signal; stderr is carried into the error.
    pub async fn run(&self, code: &str) -> VizResult<()> {
        let code = dedent(code);

        tokio::fs::create_dir_all(self.work_dir.join("static")).await?;

        let script = std::env::temp_dir().join(format!("graphtalk-plot-{}.py", Uuid::new_v4()));
        tokio::fs::write(&script, &code).await?;

        let result = self.spawn(&script).await;
        let _ = tokio::fs::remove_file(&script).await;
        result
    }

    async fn spawn(&self, script: &Path) -> VizResult<()> {
        let output = Command::new(&self.python_bin)
            .arg(script)
            .current_dir(&self.work_dir)
            .output()
            .await?;

        if !output.status.success() {
            let stderr: String = String::from_utf8_lossy(&output.stderr)
                .chars()
                .take(2000)
                .collect();
            return Err(VizError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(())
    }
}

/// Strip the common leading whitespace from every non-blank line, the way the
/// original extraction pipeline dedents model output before running it.
pub fn dedent(code: &str) -> String {
    let indent = code
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    code.lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
