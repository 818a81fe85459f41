#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use which::which_in;

use super::ProjectPaths;
use crate::{
    constants::{GRADLE_ARGS, GRADLE_ON_PATH, GRADLEW_UNIX, GRADLEW_WINDOWS},
    process::run_collect,
};

/// The build tool invocation for a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleCommand {
    /// Absolute path of the wrapper script or gradle executable.
    program: PathBuf,
    /// Arguments passed to it.
    args:    Vec<OsString>,
}

impl GradleCommand {
    /// File name of the wrapper for the current platform.
    pub fn wrapper_name() -> &'static str {
        if cfg!(windows) { GRADLEW_WINDOWS } else { GRADLEW_UNIX }
    }

    /// Finds the wrapper inside `working_dir`, falling back to `gradle` on
    /// `PATH`.
    pub fn resolve(working_dir: &Path) -> Result<Self> {
        Self::resolve_with_path(working_dir, std::env::var_os("PATH"))
    }

    /// Like [`GradleCommand::resolve`], searching `search_path` instead of
    /// the process's `PATH`.
    pub fn resolve_with_path(working_dir: &Path, search_path: Option<OsString>) -> Result<Self> {
        let wrapper = working_dir.join(Self::wrapper_name());
        let program = if wrapper.is_file() {
            std::path::absolute(&wrapper)
                .with_context(|| format!("Could not resolve {}", wrapper.display()))?
        } else {
            match which_in(GRADLE_ON_PATH, search_path, working_dir) {
                Ok(path) => {
                    tracing::warn!(
                        "{} is missing, using {} instead",
                        wrapper.display(),
                        path.display()
                    );
                    path
                }
                Err(_) => bail!(
                    "Could not find the gradle wrapper {} or a gradle installation on PATH",
                    wrapper.display()
                ),
            }
        };

        Ok(Self {
            program,
            args: GRADLE_ARGS.iter().map(OsString::from).collect(),
        })
    }

    /// Program that will be spawned.
    pub fn program(&self) -> &Path {
        self.program.as_path()
    }

    /// Arguments it is given.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Runs the build in `working_dir` and returns its stdout. A non-zero exit
    /// becomes `Runtime error: <stderr>`.
    pub fn run(&self, working_dir: &Path) -> Result<String> {
        tracing::info!("Running {} in {}", self.program.display(), working_dir.display());
        let collected = run_collect(&self.program, &self.args, Some(working_dir))?;

        if !collected.success() {
            tracing::debug!("Build exited with {}", collected.status);
            bail!("Runtime error: {}", collected.stderr_lossy());
        }

        Ok(collected.stdout_lossy())
    }
}

/// Resolves the build tool for the working directory and runs it.
pub fn run_build(paths: &ProjectPaths) -> Result<String> {
    GradleCommand::resolve(paths.working_dir())?.run(paths.working_dir())
}
