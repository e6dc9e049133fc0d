//! Driver version strings.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    static ref VERSION_RE: Regex =
        Regex::new(r"^v?(\d+)(\.\d+){0,2}([-+][0-9A-Za-z.-]+)?$").expect("valid regex");
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid driver version {0:?} (expected e.g. v1.2.3)")]
pub struct VersionError(pub String);

/// Semantic version of an installed driver, always rendered with a leading `v`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(String);

impl Version {
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let s = s.trim();
        if !VERSION_RE.is_match(s) {
            return Err(VersionError(s.to_string()));
        }
        if s.starts_with('v') {
            Ok(Version(s.to_string()))
        } else {
            Ok(Version(format!("v{}", s)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Version::parse(&value)
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_prefix() {
        assert_eq!(Version::parse("2.8.0").unwrap().as_str(), "v2.8.0");
        assert_eq!(Version::parse("v2.8.0").unwrap().as_str(), "v2.8.0");
        assert_eq!(Version::parse("v1").unwrap().as_str(), "v1");
        assert_eq!(Version::parse("v1.4.0-rc.1").unwrap().as_str(), "v1.4.0-rc.1");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Version::parse("latest").is_err());
        assert!(Version::parse("").is_err());
        assert!(Version::parse("v1.2.3.4").is_err());
        assert!(Version::parse("1.x").is_err());
    }
}
