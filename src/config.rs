#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{
    constants::{
        CONFIG_FILE_NAME, DEFAULT_HOSTED_ROOT, HOSTED_ROOT_ENV, MODE_ENV, STRICT_REPACKAGE_ENV,
    },
    java::{ProjectPaths, crosstest::LineFilter},
};

/// Where the grader is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// A developer machine; results only go to stdout.
    Local,
    /// The grading server; results are also persisted to the results file.
    Hosted,
}

impl Environment {
    /// Hosted if `dir` lies under `hosted_root`, local otherwise.
    pub fn detect(dir: &Path, hosted_root: &Path) -> Self {
        if dir.starts_with(hosted_root) {
            Environment::Hosted
        } else {
            Environment::Local
        }
    }

    /// Returns true on the grading server.
    pub fn is_hosted(self) -> bool {
        self == Environment::Hosted
    }

    /// Returns true on a developer machine.
    pub fn is_local(self) -> bool {
        self == Environment::Local
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "hosted" | "gradescope" => Ok(Environment::Hosted),
            other => bail!("Unknown environment `{other}`, expected `local` or `hosted`"),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Hosted => write!(f, "hosted"),
        }
    }
}

/// Everything a grading run needs besides the assignment configuration.
/// Built once at the entry point and passed down explicitly.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct RuntimeConfig {
    /// Local or hosted.
    environment: Environment,
    /// Workspace layout.
    #[builder(default)]
    paths:       ProjectPaths,
    /// Project directory named on the command line (local mode only).
    #[builder(default, setter(into))]
    project_dir: Option<String>,
    /// How cross-test files drop the original package declaration.
    #[builder(default)]
    line_filter: LineFilter,
}

impl RuntimeConfig {
    /// Returns the environment.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the workspace layout.
    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Returns the project directory given on the command line, if any.
    pub fn project_dir(&self) -> Option<&str> {
        self.project_dir.as_deref()
    }

    /// Returns the cross-test line filter.
    pub fn line_filter(&self) -> LineFilter {
        self.line_filter
    }

    /// Location of `config.ini`: next to the grader when hosted, in the
    /// sibling project directory when local.
    pub fn config_path(&self) -> Result<PathBuf> {
        match self.environment {
            Environment::Hosted => Ok(self.paths.root_dir().join(CONFIG_FILE_NAME)),
            Environment::Local => {
                let project = self
                    .project_dir
                    .as_deref()
                    .context("A project directory is required when running locally")?;
                Ok(self
                    .paths
                    .root_dir()
                    .join("..")
                    .join(project)
                    .join(CONFIG_FILE_NAME))
            }
        }
    }
}

/// Path prefix identifying the hosted environment, from `GRADER_HOSTED_ROOT`.
pub fn hosted_root() -> PathBuf {
    hosted_root_from(std::env::var(HOSTED_ROOT_ENV).ok().as_deref())
}

/// `value` trimmed, or the default hosted root when unset or blank.
fn hosted_root_from(value: Option<&str>) -> PathBuf {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_HOSTED_ROOT)
        .into()
}

/// Whether `GRADER_STRICT_REPACKAGE` asks for strict line filtering.
pub fn strict_repackage_requested() -> bool {
    std::env::var(STRICT_REPACKAGE_ENV)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

/// Decides the environment once from the command line and the process
/// environment. See [`choose_environment`].
pub fn resolve_environment(explicit: Option<Environment>, root: &Path) -> Result<Environment> {
    let root = std::path::absolute(root)
        .with_context(|| format!("Could not resolve {}", root.display()))?;
    let mode = std::env::var(MODE_ENV).ok();
    Ok(choose_environment(explicit, mode.as_deref(), &root, &hosted_root()))
}

/// An explicit choice wins, then a valid `mode` (the `GRADER_MODE` value),
/// then whether `root` lies under `hosted_root`. An unparsable `mode` is
/// logged and ignored so the run still reports its result.
pub fn choose_environment(
    explicit: Option<Environment>,
    mode: Option<&str>,
    root: &Path,
    hosted_root: &Path,
) -> Environment {
    if let Some(env) = explicit {
        return env;
    }
    if let Some(value) = mode.filter(|value| !value.trim().is_empty()) {
        match value.parse::<Environment>() {
            Ok(env) => return env,
            Err(err) => {
                tracing::warn!("Ignoring {MODE_ENV}: {err:#}; detecting the environment instead")
            }
        }
    }
    Environment::detect(root, hosted_root)
}

/// Interprets common spellings of an enabled flag.
fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
