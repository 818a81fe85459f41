#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::{
    constants::DEFAULT_SECTION,
    parsers::{IniLine, parser},
};

/// Why an INI document could not be read.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IniError {
    /// An entry appeared before the first section header.
    #[error("line {line} is not inside a section")]
    MissingSectionHeader {
        /// 1-based line number.
        line: usize,
    },
    /// A line is neither a header, an entry, a comment nor a continuation.
    #[error("line {line} could not be parsed: {reason}")]
    Syntax {
        /// 1-based line number.
        line:   usize,
        /// What the parser expected.
        reason: String,
    },
    /// The same section header appeared twice.
    #[error("section '{section}' appears more than once (line {line})")]
    DuplicateSection {
        /// The repeated section name.
        section: String,
        /// 1-based line number of the repetition.
        line:    usize,
    },
    /// The same key appeared twice in a section.
    #[error("key '{key}' appears more than once in section '{section}' (line {line})")]
    DuplicateKey {
        /// The section containing the key.
        section: String,
        /// The repeated key.
        key:     String,
        /// 1-based line number of the repetition.
        line:    usize,
    },
}

/// A named section with its entries in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniSection {
    /// Section name as written between the brackets.
    name:    String,
    /// Lowercased keys with their values.
    entries: Vec<(String, String)>,
}

impl IniSection {
    /// Creates an empty section.
    fn new(name: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            entries: Vec::new(),
        }
    }

    /// The section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of `key` in this section only.
    fn own(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Mutable value of the last entry, for continuation lines.
    fn last_value_mut(&mut self) -> Option<&mut String> {
        self.entries.last_mut().map(|(_, v)| v)
    }
}

/// A parsed INI document. Section names are case-sensitive, keys are
/// lowercased, and keys of `[DEFAULT]` are visible from every section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    /// Entries of the `[DEFAULT]` section.
    defaults: IniSection,
    /// All other sections in file order.
    sections: Vec<IniSection>,
}

impl IniDocument {
    /// Parses `contents`.
    pub fn parse(contents: &str) -> Result<Self, IniError> {
        let mut doc = IniDocument {
            defaults: IniSection::new(DEFAULT_SECTION),
            sections: Vec::new(),
        };
        // None until the first header; Some(None) selects DEFAULT.
        let mut current: Option<Option<usize>> = None;
        let mut in_value = false;

        for (index, raw) in contents.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                in_value = false;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with([' ', '\t']);
            if indented && in_value {
                if let Some(value) = current
                    .and_then(|target| doc.section_mut(target))
                    .and_then(IniSection::last_value_mut)
                {
                    value.push('\n');
                    value.push_str(trimmed);
                }
                continue;
            }

            match parser::ini_line(raw) {
                Ok(IniLine::Section(name)) => {
                    in_value = false;
                    if name == DEFAULT_SECTION {
                        current = Some(None);
                        continue;
                    }
                    if doc.section(name).is_some() {
                        return Err(IniError::DuplicateSection {
                            section: name.to_string(),
                            line,
                        });
                    }
                    doc.sections.push(IniSection::new(name));
                    current = Some(Some(doc.sections.len() - 1));
                }
                Ok(IniLine::Entry(key, value)) => {
                    let target = current.ok_or(IniError::MissingSectionHeader { line })?;
                    let key = key.to_lowercase();
                    let section = doc
                        .section_mut(target)
                        .ok_or(IniError::MissingSectionHeader { line })?;
                    if section.own(&key).is_some() {
                        return Err(IniError::DuplicateKey {
                            section: section.name.clone(),
                            key,
                            line,
                        });
                    }
                    section.entries.push((key, value.to_string()));
                    in_value = true;
                }
                Err(e) => {
                    if current.is_none() {
                        return Err(IniError::MissingSectionHeader { line });
                    }
                    return Err(IniError::Syntax {
                        line,
                        reason: format!("expected {}", e.expected),
                    });
                }
            }
        }

        Ok(doc)
    }

    /// Names of all sections except `[DEFAULT]`, in file order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(IniSection::name).collect()
    }

    /// Returns the named section.
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Value of `key` in `section`, falling back to `[DEFAULT]`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let section = self.section(section)?;
        let key = key.to_lowercase();
        section.own(&key).or_else(|| self.defaults.own(&key))
    }

    /// Keys visible from `section`: its own, then inherited defaults.
    pub fn keys(&self, section: &str) -> Vec<&str> {
        let Some(section) = self.section(section) else {
            return Vec::new();
        };
        let mut keys: Vec<&str> = section.entries.iter().map(|(k, _)| k.as_str()).collect();
        for (key, _) in &self.defaults.entries {
            if !keys.contains(&key.as_str()) {
                keys.push(key.as_str());
            }
        }
        keys
    }

    /// Section selected by the parser state.
    fn section_mut(&mut self, target: Option<usize>) -> Option<&mut IniSection> {
        match target {
            None => Some(&mut self.defaults),
            Some(i) => self.sections.get_mut(i),
        }
    }
}
