#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Name of the assignment configuration file.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Mandatory section describing the student submission.
pub const SUBMISSION_SECTION: &str = "submission";

/// Optional section describing cross-testing.
pub const CROSSTESTS_SECTION: &str = "crosstests";

/// Sections a configuration file may contain.
pub const CONFIG_SECTIONS: [&str; 2] = [SUBMISSION_SECTION, CROSSTESTS_SECTION];

/// Section whose keys are inherited by every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Package the submitted files are declared in.
pub const PACKAGE_KEY: &str = "package";

/// Bracketed list of submitted files.
pub const FILES_KEY: &str = "files";

/// Keys required (and allowed) in the submission section.
pub const SUBMISSION_KEYS: [&str; 2] = [PACKAGE_KEY, FILES_KEY];

/// Bracketed list of test files to cross-package.
pub const TESTS_KEY: &str = "tests";

/// Bracketed list of packages tests are duplicated into.
pub const PACKAGES_KEY: &str = "packages";

/// Keys required (and allowed) in the crosstests section.
pub const CROSSTESTS_KEYS: [&str; 2] = [TESTS_KEY, PACKAGES_KEY];

/// Path prefix of the hosted grading environment.
pub const DEFAULT_HOSTED_ROOT: &str = "/autograder";

/// Directory holding the student files.
pub const SUBMISSION_DIR: &str = "submission";

/// Directory rebuilt on every run.
pub const WORKING_DIR: &str = "working";

/// Directory holding the hosted results file.
pub const RESULTS_DIR: &str = "results";

/// File the hosted environment reads the result from.
pub const RESULTS_FILE: &str = "results.json";

/// Source root of a gradle project, relative to the project directory.
pub const SOURCE_SUBDIR: [&str; 3] = ["src", "main", "java"];

/// Extension of files whose package declaration is checked.
pub const JAVA_EXTENSION: &str = "java";

/// Gradle wrapper used on Windows.
pub const GRADLEW_WINDOWS: &str = "gradlew.bat";

/// Gradle wrapper used everywhere else.
pub const GRADLEW_UNIX: &str = "gradlew";

/// Executable looked up on `PATH` when the wrapper is missing.
pub const GRADLE_ON_PATH: &str = "gradle";

/// Arguments requesting a clean build and a quiet run.
pub const GRADLE_ARGS: [&str; 3] = ["clean", "run", "--quiet"];

/// Environment variable overriding [`DEFAULT_HOSTED_ROOT`].
pub const HOSTED_ROOT_ENV: &str = "GRADER_HOSTED_ROOT";

/// Environment variable forcing `local` or `hosted` mode.
pub const MODE_ENV: &str = "GRADER_MODE";

/// Environment variable selecting strict cross-test line filtering.
pub const STRICT_REPACKAGE_ENV: &str = "GRADER_STRICT_REPACKAGE";
