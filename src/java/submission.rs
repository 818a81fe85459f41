#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};

use super::ProjectPaths;
use crate::{assignment::SubmissionConfig, constants::JAVA_EXTENSION};

/// Copies every configured file from the submission directory into its
/// package directory under the working source root.
///
/// Java files are checked for the expected `package` statement before they
/// are copied. Returns the installed paths.
pub fn install_submission(
    paths: &ProjectPaths,
    submission: &SubmissionConfig,
) -> Result<Vec<PathBuf>> {
    let package = submission.package();
    let dest_dir = paths.package_dir(package);
    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("Could not create {}", dest_dir.display()))?;

    let mut installed = Vec::with_capacity(submission.files().len());
    for file in submission.files() {
        let source = paths.submission_dir().join(file);
        if !source.is_file() {
            bail!("File {} not found.", source.display());
        }

        if source.extension().is_some_and(|ext| ext == JAVA_EXTENSION) {
            let contents = fs::read_to_string(&source)
                .with_context(|| format!("Could not read {}", source.display()))?;
            if !package.is_declared_in(&contents) {
                bail!(
                    "File {} does not contain the expected package declaration: {}",
                    source.display(),
                    package.declaration()
                );
            }
        }

        let name = source
            .file_name()
            .with_context(|| format!("{} does not name a file", source.display()))?;
        let target = dest_dir.join(name);
        fs::copy(&source, &target).with_context(|| {
            format!("Could not copy {} to {}", source.display(), target.display())
        })?;
        tracing::info!("Installed {}", target.display());
        installed.push(target);
    }

    Ok(installed)
}
