#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        CONFIG_SECTIONS, CROSSTESTS_KEYS, CROSSTESTS_SECTION, FILES_KEY, PACKAGE_KEY,
        PACKAGES_KEY, SUBMISSION_KEYS, SUBMISSION_SECTION, TESTS_KEY,
    },
    ini::{IniDocument, IniError},
    java::JavaPackage,
    parsers::parser,
    util::quoted_list,
};

/// An enum to represent the ways an assignment configuration can be invalid.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Unable to read configuration file {path}")]
    Unreadable {
        /// Path that was tried.
        path: String,
    },
    /// The file is not valid INI.
    #[error("Could not parse configuration file {path}: {reason}")]
    Malformed {
        /// Path of the file.
        path:   String,
        /// What went wrong, with the line number.
        reason: IniError,
    },
    /// A required section is absent.
    #[error("Did not find section '{section}' in {path}")]
    MissingSection {
        /// The missing section.
        section: String,
        /// Path of the file.
        path:    String,
    },
    /// Sections other than `submission` and `crosstests` are present.
    #[error("Unexpected section(s) in {path}: {}", quoted_list(.sections))]
    UnexpectedSections {
        /// Path of the file.
        path:     String,
        /// The unrecognized section names.
        sections: Vec<String>,
    },
    /// A required key is absent from a section.
    #[error("Did not find key '{key}' in section '{section}' of {path}")]
    MissingKey {
        /// The missing key.
        key:     String,
        /// The section it belongs in.
        section: String,
        /// Path of the file.
        path:    String,
    },
    /// A section holds keys it does not recognize.
    #[error("Unexpected key(s) in section '{section}' of {path}: {}", quoted_list(.keys))]
    UnexpectedKeys {
        /// The section holding them.
        section: String,
        /// The unrecognized keys.
        keys:    Vec<String>,
        /// Path of the file.
        path:    String,
    },
    /// A value that must be non-empty is empty.
    #[error("Key '{key}' in section '{section}' of {path} must not be empty")]
    EmptyValue {
        /// The key.
        key:     String,
        /// The section.
        section: String,
        /// Path of the file.
        path:    String,
    },
    /// A bracketed list value has an empty item, as in `[a,,b]` or `[a,]`.
    #[error("Empty item in {key} value '{value}' in '{path}'")]
    EmptyListItem {
        /// The key holding the list.
        key:   String,
        /// The raw value.
        value: String,
        /// Path of the file.
        path:  String,
    },
    /// A list value is not of the form `[item, item, ...]`.
    #[error("Could not parse {key} value '{value}' in '{path}'")]
    InvalidList {
        /// The key holding the list.
        key:   String,
        /// The raw value.
        value: String,
        /// Path of the file.
        path:  String,
    },
}

/// The `submission` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Package every submitted source file declares.
    package: JavaPackage,
    /// Files expected in the submission directory.
    files:   Vec<String>,
}

impl SubmissionConfig {
    /// Creates a submission section.
    pub fn new(package: impl Into<JavaPackage>, files: Vec<String>) -> Self {
        Self {
            package: package.into(),
            files,
        }
    }

    /// Package the files are declared in.
    pub fn package(&self) -> &JavaPackage {
        &self.package
    }

    /// Files to install.
    pub fn files(&self) -> &[String] {
        &self.files
    }
}

/// The optional `crosstests` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTestConfig {
    /// Test files to duplicate, relative to the submission package.
    tests:    Vec<String>,
    /// Packages the tests are duplicated into.
    packages: Vec<JavaPackage>,
}

impl CrossTestConfig {
    /// Creates a crosstests section.
    pub fn new(tests: Vec<String>, packages: Vec<JavaPackage>) -> Self {
        Self { tests, packages }
    }

    /// Test file names.
    pub fn tests(&self) -> &[String] {
        &self.tests
    }

    /// Destination packages.
    pub fn packages(&self) -> &[JavaPackage] {
        &self.packages
    }
}

/// A validated `config.ini`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentConfig {
    /// Mandatory submission settings.
    submission: SubmissionConfig,
    /// Cross-testing settings, if configured.
    crosstests: Option<CrossTestConfig>,
}

impl AssignmentConfig {
    /// Creates a configuration from its sections.
    pub fn new(submission: SubmissionConfig, crosstests: Option<CrossTestConfig>) -> Self {
        Self {
            submission,
            crosstests,
        }
    }

    /// Reads and validates the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            tracing::debug!("Reading {shown} failed: {err}");
            ConfigError::Unreadable {
                path: shown.clone(),
            }
        })?;
        tracing::debug!("Read configuration from {shown}");
        Self::parse(&contents, &shown)
    }

    /// Validates configuration `contents`; `path` is only used in messages.
    pub fn parse(contents: &str, path: &str) -> Result<Self, ConfigError> {
        let doc = IniDocument::parse(contents).map_err(|reason| ConfigError::Malformed {
            path: path.to_string(),
            reason,
        })?;
        let sections = doc.section_names();

        if !sections.contains(&SUBMISSION_SECTION) {
            return Err(ConfigError::MissingSection {
                section: SUBMISSION_SECTION.to_string(),
                path:    path.to_string(),
            });
        }

        let unexpected: Vec<String> = sections
            .iter()
            .filter(|name| !CONFIG_SECTIONS.contains(name))
            .map(|name| name.to_string())
            .collect();
        if !unexpected.is_empty() {
            return Err(ConfigError::UnexpectedSections {
                path:     path.to_string(),
                sections: unexpected,
            });
        }

        check_keys(&doc, SUBMISSION_SECTION, &SUBMISSION_KEYS, path)?;
        let package = required(&doc, SUBMISSION_SECTION, PACKAGE_KEY, path)?;
        if package.is_empty() {
            return Err(ConfigError::EmptyValue {
                key:     PACKAGE_KEY.to_string(),
                section: SUBMISSION_SECTION.to_string(),
                path:    path.to_string(),
            });
        }
        let files = list(&doc, SUBMISSION_SECTION, FILES_KEY, path)?;
        let submission = SubmissionConfig::new(package, files);

        let crosstests = if doc.section(CROSSTESTS_SECTION).is_some() {
            check_keys(&doc, CROSSTESTS_SECTION, &CROSSTESTS_KEYS, path)?;
            let tests = list(&doc, CROSSTESTS_SECTION, TESTS_KEY, path)?;
            let packages = list(&doc, CROSSTESTS_SECTION, PACKAGES_KEY, path)?
                .into_iter()
                .map(JavaPackage::new)
                .collect();
            Some(CrossTestConfig::new(tests, packages))
        } else {
            None
        };

        Ok(Self::new(submission, crosstests))
    }

    /// Submission settings.
    pub fn submission(&self) -> &SubmissionConfig {
        &self.submission
    }

    /// Cross-testing settings, if any.
    pub fn crosstests(&self) -> Option<&CrossTestConfig> {
        self.crosstests.as_ref()
    }
}

/// Ensures `section` holds every key in `allowed` and nothing else.
fn check_keys(
    doc: &IniDocument,
    section: &str,
    allowed: &[&str],
    path: &str,
) -> Result<(), ConfigError> {
    let present = doc.keys(section);

    if let Some(missing) = allowed.iter().find(|key| !present.contains(*key)) {
        return Err(ConfigError::MissingKey {
            key:     missing.to_string(),
            section: section.to_string(),
            path:    path.to_string(),
        });
    }

    let extra: Vec<String> = present
        .iter()
        .filter(|key| !allowed.contains(*key))
        .map(|key| key.to_string())
        .collect();
    if !extra.is_empty() {
        return Err(ConfigError::UnexpectedKeys {
            section: section.to_string(),
            keys: extra,
            path: path.to_string(),
        });
    }

    Ok(())
}

/// Value of a key that [`check_keys`] has already confirmed.
fn required<'a>(
    doc: &'a IniDocument,
    section: &str,
    key: &str,
    path: &str,
) -> Result<&'a str, ConfigError> {
    doc.get(section, key).ok_or_else(|| ConfigError::MissingKey {
        key:     key.to_string(),
        section: section.to_string(),
        path:    path.to_string(),
    })
}

/// Parses a bracketed list value.
fn list(doc: &IniDocument, section: &str, key: &str, path: &str) -> Result<Vec<String>, ConfigError> {
    let value = required(doc, section, key, path)?;
    let items = parser::list_items(value).map_err(|_| ConfigError::InvalidList {
        key:   key.to_string(),
        value: value.to_string(),
        path:  path.to_string(),
    })?;
    if items.iter().any(|item| item.is_empty()) {
        return Err(ConfigError::EmptyListItem {
            key:   key.to_string(),
            value: value.to_string(),
            path:  path.to_string(),
        });
    }
    Ok(items.into_iter().map(str::to_owned).collect())
}

/// Parses `[a, b, c]` into trimmed items, or `None` if the value is not a
/// bracketed list.
pub fn parse_list(value: &str) -> Option<Vec<String>> {
    parser::list(value).ok()
}
