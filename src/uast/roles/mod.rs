//! Role vocabulary and per-language mapping tables.
//!
//! Each language module provides a `ROLES` table from the driver's node kinds
//! to generic roles. The first role of an entry is the node's primary role,
//! used as its kind in semantic mode.

mod c;
mod cpp;
mod csharp;
mod go;
mod java;
mod javascript;
mod php;
mod python;
mod ruby;
mod rust_lang;
mod scala;
mod shell;
mod swift;
mod typescript;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lang::Language;

/// A role table: driver node kind -> roles (primary first).
pub type RoleTable = phf::Map<&'static str, &'static [Role]>;

/// Generic, language-independent node role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    File,
    Package,
    Import,
    Identifier,
    Type,
    Literal,
    String,
    Number,
    Boolean,
    Null,
    Comment,
    FunctionDeclaration,
    TypeDeclaration,
    VariableDeclaration,
    Parameter,
    Argument,
    Call,
    Assignment,
    Return,
    If,
    Loop,
    Switch,
    Try,
    Catch,
    Throw,
    Break,
    Continue,
    Block,
    Statement,
    Expression,
    Operator,
    Binary,
    Unary,
    Member,
    Lambda,
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::File => "file",
            Role::Package => "package",
            Role::Import => "import",
            Role::Identifier => "identifier",
            Role::Type => "type",
            Role::Literal => "literal",
            Role::String => "string",
            Role::Number => "number",
            Role::Boolean => "boolean",
            Role::Null => "null",
            Role::Comment => "comment",
            Role::FunctionDeclaration => "function-declaration",
            Role::TypeDeclaration => "type-declaration",
            Role::VariableDeclaration => "variable-declaration",
            Role::Parameter => "parameter",
            Role::Argument => "argument",
            Role::Call => "call",
            Role::Assignment => "assignment",
            Role::Return => "return",
            Role::If => "if",
            Role::Loop => "loop",
            Role::Switch => "switch",
            Role::Try => "try",
            Role::Catch => "catch",
            Role::Throw => "throw",
            Role::Break => "break",
            Role::Continue => "continue",
            Role::Block => "block",
            Role::Statement => "statement",
            Role::Expression => "expression",
            Role::Operator => "operator",
            Role::Binary => "binary",
            Role::Unary => "unary",
            Role::Member => "member",
            Role::Lambda => "lambda",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static C: &[&RoleTable] = &[&c::ROLES];
static CPP: &[&RoleTable] = &[&cpp::ROLES, &c::ROLES];
static CSHARP: &[&RoleTable] = &[&csharp::ROLES];
static GO: &[&RoleTable] = &[&go::ROLES];
static JAVA: &[&RoleTable] = &[&java::ROLES];
static JAVASCRIPT: &[&RoleTable] = &[&javascript::ROLES];
static PHP: &[&RoleTable] = &[&php::ROLES];
static PYTHON: &[&RoleTable] = &[&python::ROLES];
static RUBY: &[&RoleTable] = &[&ruby::ROLES];
static RUST: &[&RoleTable] = &[&rust_lang::ROLES];
static SCALA: &[&RoleTable] = &[&scala::ROLES];
static SHELL: &[&RoleTable] = &[&shell::ROLES];
static SWIFT: &[&RoleTable] = &[&swift::ROLES];
static TYPESCRIPT: &[&RoleTable] = &[&typescript::ROLES, &javascript::ROLES];

/// Tables consulted for a language, most specific first.
fn tables(language: &Language) -> &'static [&'static RoleTable] {
    match language.as_str() {
        "c" => C,
        "c++" => CPP,
        "c#" => CSHARP,
        "go" => GO,
        "java" => JAVA,
        "javascript" => JAVASCRIPT,
        "php" => PHP,
        "python" => PYTHON,
        "ruby" => RUBY,
        "rust" => RUST,
        "scala" => SCALA,
        "shell" => SHELL,
        "swift" => SWIFT,
        "typescript" => TYPESCRIPT,
        _ => &[],
    }
}

/// Roles for a driver node kind, or `None` when the kind is not covered.
pub fn lookup(language: &Language, kind: &str) -> Option<&'static [Role]> {
    tables(language)
        .iter()
        .find_map(|table| table.get(kind).copied())
}
