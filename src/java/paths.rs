#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::JavaPackage;
use crate::constants::{RESULTS_DIR, RESULTS_FILE, SOURCE_SUBDIR, SUBMISSION_DIR, WORKING_DIR};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Represents the directories a grading run reads from and writes to.
pub struct ProjectPaths {
    /// Directory holding the scaffold; everything else is relative to it.
    root_dir:       PathBuf,
    /// `submission/` directory containing the student files.
    submission_dir: PathBuf,
    /// `working/` directory rebuilt on every run.
    working_dir:    PathBuf,
    /// `working/src/main/java/` source root inside the working directory.
    source_dir:     PathBuf,
    /// `results/` directory used by the hosted environment.
    results_dir:    PathBuf,
}

impl ProjectPaths {
    /// Creates the standard layout rooted at `root_dir`.
    pub fn new(root_dir: PathBuf) -> Self {
        Self::build_with_defaults(root_dir, None, None, None)
    }

    /// Construct paths from optional overrides.
    pub fn from_parts(
        root_dir: PathBuf,
        submission_dir: Option<PathBuf>,
        working_dir: Option<PathBuf>,
        results_dir: Option<PathBuf>,
    ) -> Self {
        Self::build_with_defaults(root_dir, submission_dir, working_dir, results_dir)
    }

    /// Root directory holding the scaffold.
    pub fn root_dir(&self) -> &Path {
        self.root_dir.as_path()
    }

    /// Directory with the student files.
    pub fn submission_dir(&self) -> &Path {
        self.submission_dir.as_path()
    }

    /// Working directory the build runs in.
    pub fn working_dir(&self) -> &Path {
        self.working_dir.as_path()
    }

    /// Java source root inside the working directory.
    pub fn source_dir(&self) -> &Path {
        self.source_dir.as_path()
    }

    /// Directory holding the results file.
    pub fn results_dir(&self) -> &Path {
        self.results_dir.as_path()
    }

    /// Results file read by the hosted environment.
    pub fn results_file(&self) -> PathBuf {
        self.results_dir.join(RESULTS_FILE)
    }

    /// Directory of `package` inside the working source root.
    pub fn package_dir(&self, package: &JavaPackage) -> PathBuf {
        self.source_dir.join(package.relative_path())
    }

    /// Path of a scaffold entry, relative to the root.
    pub fn scaffold_path(&self, name: &str) -> PathBuf {
        self.root_dir.join(name)
    }
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl ProjectPaths {
    /// Centralized constructor that applies standard defaults when overrides
    /// are absent.
    fn build_with_defaults(
        root_dir: PathBuf,
        submission_dir: Option<PathBuf>,
        working_dir: Option<PathBuf>,
        results_dir: Option<PathBuf>,
    ) -> Self {
        let submission_dir = submission_dir.unwrap_or_else(|| root_dir.join(SUBMISSION_DIR));
        let working_dir = working_dir.unwrap_or_else(|| root_dir.join(WORKING_DIR));
        let results_dir = results_dir.unwrap_or_else(|| root_dir.join(RESULTS_DIR));
        let source_dir = SOURCE_SUBDIR
            .iter()
            .fold(working_dir.clone(), |dir, segment| dir.join(segment));

        Self {
            root_dir,
            submission_dir,
            working_dir,
            source_dir,
            results_dir,
        }
    }
}
