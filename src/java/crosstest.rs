#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::{JavaPackage, ProjectPaths};
use crate::assignment::AssignmentConfig;

/// Decides which lines of a test file are dropped when it is moved to
/// another package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineFilter {
    /// Drop every line containing `package <original>`, wherever it occurs.
    /// This also removes unrelated lines such as comments mentioning it.
    #[default]
    Loose,
    /// Drop only the `package <original>;` statement itself.
    Strict,
}

impl LineFilter {
    /// Whether `line` is copied into the repackaged file.
    pub fn keeps(self, line: &str, original: &JavaPackage) -> bool {
        match self {
            LineFilter::Loose => !line.contains(&original.declaration_prefix()),
            LineFilter::Strict => !original.is_declared_by(line),
        }
    }
}

/// Rewrites test `source` from `original` into `destination`: a new package
/// statement, a blank line, a wildcard import of `original`, then the
/// source lines the filter keeps, line endings untouched.
pub fn repackage_source(
    source: &str,
    original: &JavaPackage,
    destination: &JavaPackage,
    filter: LineFilter,
) -> String {
    let mut out = format!(
        "{}\n\n{}\n",
        destination.declaration(),
        original.wildcard_import()
    );
    for line in source.split_inclusive('\n') {
        if filter.keeps(line, original) {
            out.push_str(line);
        }
    }
    out
}

/// Duplicates every configured test file from the submission package into
/// each cross-test package. Does nothing without a `crosstests` section.
/// Returns the written paths.
pub fn repackage(
    paths: &ProjectPaths,
    config: &AssignmentConfig,
    filter: LineFilter,
) -> Result<Vec<PathBuf>> {
    let Some(crosstests) = config.crosstests() else {
        return Ok(Vec::new());
    };
    let original = config.submission().package();
    let source_dir = paths.package_dir(original);
    let mut written = Vec::new();

    for test in crosstests.tests() {
        let source_path = source_dir.join(test);
        if !source_path.is_file() {
            bail!("Cross-test file {} not found.", source_path.display());
        }
        let source = fs::read_to_string(&source_path)
            .with_context(|| format!("Could not read {}", source_path.display()))?;

        for destination in crosstests.packages() {
            let target_dir = paths.package_dir(destination);
            fs::create_dir_all(&target_dir)
                .with_context(|| format!("Could not create {}", target_dir.display()))?;

            let target = target_dir.join(test);
            fs::write(&target, repackage_source(&source, original, destination, filter))
                .with_context(|| format!("Could not write {}", target.display()))?;
            tracing::info!("Repackaged {test} into {destination}");
            written.push(target);
        }
    }

    Ok(written)
}
