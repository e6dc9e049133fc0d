//! Language identifiers and file classification.
//!
//! This module provides:
//! - `Language`: canonical, lower-case language identifier
//! - `Classifier`: extension/content based language detection
//! - Static lookup tables (extensions, file names, interpreters, aliases)

mod classify;
mod table;

pub use classify::{Classifier, SAMPLE_LEN};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when turning user input into a language identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("language name is empty")]
    Empty,
    #[error("invalid language name {0:?}")]
    Invalid(String),
}

/// Canonical language identifier (e.g., "python", "c++").
///
/// Construct one with `Language::resolve` (accepts aliases such as "cpp" or
/// "bash") or `str::parse`. The inner string is always lower-case and never an
/// alias of another known language.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// Resolve a user-supplied name or alias into its canonical identifier.
    ///
    /// Names that are not known aliases are kept verbatim (lower-cased) so
    /// drivers for languages outside the builtin tables can still be used.
    pub fn resolve(name: &str) -> Result<Self, LanguageError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(LanguageError::Empty);
        }
        if name.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
            return Err(LanguageError::Invalid(name));
        }
        match table::ALIASES.get(name.as_str()) {
            Some(canonical) => Ok(Language((*canonical).to_string())),
            None => Ok(Language(name)),
        }
    }

    /// Build a language from an identifier that is already canonical.
    pub(crate) fn canonical(id: &'static str) -> Self {
        Language(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::resolve(s)
    }
}

impl TryFrom<String> for Language {
    type Error = LanguageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::resolve(&value)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
