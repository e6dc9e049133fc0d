//! Universal AST.
//!
//! This module provides:
//! - `Node`: the normalized tree unit every driver's output is reshaped into
//! - `Mode`: the three extraction modes (native, annotated, semantic)
//! - `Role`: the language-agnostic role vocabulary
//! - `normalize`: raw driver tree -> UAST for a given mode

mod normalize;
pub mod roles;

pub use normalize::{normalize, NormalizeError, MAX_DEPTH};
pub use roles::Role;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Extraction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Driver grammar tree, losslessly wrapped in the generic node shape.
    #[default]
    Native,
    /// Native tree plus roles from the per-language mapping table.
    Annotated,
    /// Language-agnostic tree using only the role vocabulary.
    Semantic,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Native, Mode::Annotated, Mode::Semantic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Native => "native",
            Mode::Annotated => "annotated",
            Mode::Semantic => "semantic",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" => Ok(Mode::Native),
            "annotated" => Ok(Mode::Annotated),
            "semantic" => Ok(Mode::Semantic),
            other => Err(format!(
                "invalid mode {:?}, must be 'native', 'annotated', or 'semantic'",
                other
            )),
        }
    }
}

/// A point in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Position {
    /// Byte offset from the start of the file
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column (1-indexed, in bytes)
    pub col: usize,
}

/// Source range covered by a node; `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn contains(&self, other: &Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }
}

/// A UAST node.
///
/// Properties live in a `BTreeMap` so serialization order never depends on
/// the driver's field order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Node {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "@role", default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(rename = "@pos", default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Span>,
    #[serde(rename = "@token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            roles: Vec::new(),
            pos: None,
            token: None,
            props: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
