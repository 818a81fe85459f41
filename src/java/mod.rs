#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Duplicating test files into other packages.
pub mod crosstest;
/// Running the gradle build.
pub mod gradle;
/// Java package names and statements.
pub mod package;
/// Workspace path configuration helpers.
pub mod paths;
/// Installing student files into the working source tree.
pub mod submission;
/// Resetting and populating the working directory.
pub mod workspace;

pub use crosstest::LineFilter;
pub use gradle::GradleCommand;
pub use package::JavaPackage;
pub use paths::ProjectPaths;
