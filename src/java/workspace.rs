#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fs;

use anyhow::{Context, Result};

use super::ProjectPaths;
use crate::util::copy_dir_all;

/// A path copied from the grader root into every working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldEntry {
    /// A single file.
    File(&'static str),
    /// A directory, copied recursively.
    Dir(&'static str),
}

impl ScaffoldEntry {
    /// Name relative to the root.
    pub fn name(&self) -> &'static str {
        match self {
            ScaffoldEntry::File(name) | ScaffoldEntry::Dir(name) => name,
        }
    }
}

/// Build descriptor, wrapper scripts, and project directories of a gradle
/// project.
pub const SCAFFOLD: &[ScaffoldEntry] = &[
    ScaffoldEntry::File("build.gradle"),
    ScaffoldEntry::Dir("gradle"),
    ScaffoldEntry::File("gradlew"),
    ScaffoldEntry::File("gradlew.bat"),
    ScaffoldEntry::Dir("src"),
    ScaffoldEntry::Dir("lib"),
    ScaffoldEntry::Dir("config"),
];

/// Deletes the working directory, if any, and recreates it empty.
pub fn reset_workspace(paths: &ProjectPaths) -> Result<()> {
    let working = paths.working_dir();
    if working.exists() {
        tracing::debug!("Removing previous working directory {}", working.display());
        fs::remove_dir_all(working)
            .with_context(|| format!("Could not delete {}", working.display()))?;
    }
    fs::create_dir_all(working)
        .with_context(|| format!("Could not create {}", working.display()))?;
    Ok(())
}

/// Copies every present entry of `entries` from the root into the working
/// directory. Missing entries are skipped.
pub fn copy_scaffold(paths: &ProjectPaths, entries: &[ScaffoldEntry]) -> Result<()> {
    for entry in entries {
        let from = paths.scaffold_path(entry.name());
        let to = paths.working_dir().join(entry.name());

        match entry {
            ScaffoldEntry::Dir(_) if from.is_dir() => {
                let count = copy_dir_all(&from, &to)?;
                tracing::debug!("Copied {} ({count} files)", from.display());
            }
            ScaffoldEntry::File(_) if from.is_file() => {
                fs::copy(&from, &to).with_context(|| {
                    format!("Could not copy {} to {}", from.display(), to.display())
                })?;
                tracing::debug!("Copied {}", from.display());
            }
            _ => tracing::debug!("Skipping missing scaffold entry {}", from.display()),
        }
    }
    Ok(())
}

/// Resets the working directory and fills it with the standard scaffold.
pub fn build_workspace(paths: &ProjectPaths) -> Result<()> {
    reset_workspace(paths)?;
    copy_scaffold(paths, SCAFFOLD)?;
    tracing::info!("Prepared working directory {}", paths.working_dir().display());
    Ok(())
}

/// Deletes the working directory. Returns false if there was none.
pub fn clean(paths: &ProjectPaths) -> Result<bool> {
    let working = paths.working_dir();
    if !working.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(working).with_context(|| format!("Could not delete {}", working.display()))?;
    Ok(true)
}
