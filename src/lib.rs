//! # grade-runner
//!
//! Prepares and runs a grading job for a gradle-based Java assignment:
//! builds a fresh working directory from the instructor's scaffold, installs
//! the student's files into their package, optionally copies tests into other
//! packages for cross-testing, runs the build, and reports the output (or a
//! zero-score error) on stdout and, on the grading server, in
//! `results/results.json`.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Loading and validating `config.ini`
pub mod assignment;
/// Runtime settings: environment detection and overrides
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Result payloads in the shape the grading server expects
pub mod gradescope;
/// Reading INI documents
pub mod ini;
/// For gradle projects: workspace layout, installation, cross-testing and
/// builds
pub mod java;
/// For all parsers used
pub mod parsers;
/// Spawning the build tool and collecting its output
pub mod process;
/// Delivering the outcome of a run
pub mod report;
/// Utility functions for convenience
pub mod util;

use anyhow::{Context, Result};
use assignment::AssignmentConfig;
use config::RuntimeConfig;
use java::{ProjectPaths, crosstest, gradle, submission, workspace};
use report::RunOutcome;

/// Runs every stage in order and returns the build's stdout. The first
/// failing stage ends the run.
pub fn grade(runtime: &RuntimeConfig) -> Result<String> {
    let paths = runtime.paths();

    let config_path = runtime.config_path()?;
    let config = AssignmentConfig::load(&config_path)?;
    tracing::info!(
        "Grading package {} ({} files)",
        config.submission().package(),
        config.submission().files().len()
    );

    workspace::build_workspace(paths)?;
    submission::install_submission(paths, config.submission())?;
    crosstest::repackage(paths, &config, runtime.line_filter())?;
    gradle::run_build(paths)
}

/// Grades and publishes the outcome. Pipeline failures are reported as a
/// zero-score result; only a failure to publish is returned as an error.
pub fn run(runtime: &RuntimeConfig) -> Result<RunOutcome> {
    let outcome = RunOutcome::from_result(grade(runtime));
    let text = outcome.render()?;
    report::publish(&text, runtime.environment(), runtime.paths())
        .context("Could not publish the grading result")?;
    Ok(outcome)
}

/// Deletes the working directory left by a previous run.
pub fn clean(paths: &ProjectPaths) -> Result<()> {
    if workspace::clean(paths)? {
        tracing::info!("Deleted {}", paths.working_dir().display());
    } else {
        tracing::info!("Nothing to clean in {}", paths.root_dir().display());
    }
    Ok(())
}
