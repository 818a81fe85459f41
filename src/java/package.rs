#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fmt::Display, path::PathBuf};

use serde::{Deserialize, Serialize};

/// A dotted Java package name such as `edu.course.hw1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JavaPackage(String);

impl JavaPackage {
    /// Wraps a package name as written in `package` statements.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The dotted name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The name with every `.` turned into a path separator.
    pub fn relative_path(&self) -> PathBuf {
        self.0.split('.').collect()
    }

    /// `package <name>;`
    pub fn declaration(&self) -> String {
        format!("package {};", self.0)
    }

    /// `package <name>` without the semicolon, as matched by the loose
    /// cross-test filter.
    pub fn declaration_prefix(&self) -> String {
        format!("package {}", self.0)
    }

    /// `import <name>.*;`
    pub fn wildcard_import(&self) -> String {
        format!("import {}.*;", self.0)
    }

    /// Whether `line`, ignoring indentation, is the declaration of this
    /// package. Trailing whitespace and a trailing comment are allowed.
    pub fn is_declared_by(&self, line: &str) -> bool {
        let declaration = self.declaration();
        match line.trim_start().strip_prefix(declaration.as_str()) {
            Some(rest) => {
                let rest = rest.trim();
                rest.is_empty() || rest.starts_with("//") || rest.starts_with("/*")
            }
            None => false,
        }
    }

    /// Whether any line of `source` declares this package.
    pub fn is_declared_in(&self, source: &str) -> bool {
        source.lines().any(|line| self.is_declared_by(line))
    }
}

impl Display for JavaPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JavaPackage {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
