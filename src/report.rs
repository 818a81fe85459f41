#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};

use crate::{config::Environment, gradescope::GradescopeFailure, java::ProjectPaths};

/// What a grading run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The build ran; its stdout is the result.
    Completed(String),
    /// Some stage failed; the result is a zero score.
    Failed(GradescopeFailure),
}

impl RunOutcome {
    /// Turns a pipeline result into an outcome, keeping the error message.
    pub fn from_result(result: Result<String>) -> Self {
        match result {
            Ok(output) => RunOutcome::Completed(output),
            Err(err) => {
                tracing::warn!("Grading run failed: {err:#}");
                RunOutcome::Failed(GradescopeFailure::from_error(&err))
            }
        }
    }

    /// The exact text written to stdout and the results file.
    pub fn render(&self) -> Result<String> {
        match self {
            RunOutcome::Completed(output) => Ok(output.clone()),
            RunOutcome::Failed(failure) => failure.to_json(),
        }
    }
}

/// Writes `text` followed by a newline to `out` and, when hosted, `text`
/// alone to the results file.
pub fn publish_to(
    out: &mut impl Write,
    text: &str,
    environment: Environment,
    paths: &ProjectPaths,
) -> Result<()> {
    writeln!(out, "{text}").context("Could not write the result to stdout")?;
    out.flush().context("Could not flush stdout")?;

    if environment.is_hosted() {
        let path = write_results(text, paths)?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}

/// [`publish_to`] on the process's stdout.
pub fn publish(text: &str, environment: Environment, paths: &ProjectPaths) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    publish_to(&mut handle, text, environment, paths)
}

/// Writes `text` to the results file, creating its directory first.
pub fn write_results(text: &str, paths: &ProjectPaths) -> Result<PathBuf> {
    fs::create_dir_all(paths.results_dir())
        .with_context(|| format!("Could not create {}", paths.results_dir().display()))?;
    let path = paths.results_file();
    fs::write(&path, text).with_context(|| format!("Could not write {}", path.display()))?;
    Ok(path)
}
