//! Placeholder tokens embedded in template files and directory names.

use std::fmt;

/// A literal token that the template carries in place of the project name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// Used by `package.json`.
    AppName,
    /// Used everywhere else, including the agent directory name.
    ProjectName,
}

impl Placeholder {
    pub const ALL: [Placeholder; 2] = [Placeholder::AppName, Placeholder::ProjectName];

    pub const fn token(self) -> &'static str {
        match self {
            Self::AppName => "__APP_NAME__",
            Self::ProjectName => "__PROJECT_NAME_REPLACE__",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Token → value pairs applied to a piece of text.
///
/// Every occurrence of each token is replaced verbatim. Entries apply in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(Placeholder, String)>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping with exactly one entry.
    pub fn single(placeholder: Placeholder, value: impl Into<String>) -> Self {
        Self::new().with(placeholder, value)
    }

    pub fn with(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.entries.push((placeholder, value.into()));
        self
    }

    /// Apply every entry to `input`.
    pub fn apply(&self, input: &str) -> String {
        self.entries
            .iter()
            .fold(input.to_owned(), |acc, (placeholder, value)| {
                acc.replace(placeholder.token(), value)
            })
    }

    /// Test-only view of the entries in insertion order.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Placeholder, &str)> {
        self.entries.iter().map(|(p, v)| (*p, v.as_str()))
    }
}
