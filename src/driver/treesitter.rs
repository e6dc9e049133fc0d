//! Builtin tree-sitter drivers.
//!
//! Each bundled grammar is exposed as an in-process driver that produces the
//! same raw node shape out-of-process drivers send over the wire. Anonymous
//! tokens are kept (marked `"named": false`) so the native tree is lossless.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tree_sitter::{Language as Grammar, Node as TsNode, Parser as TsParser, Point, TreeCursor};

use super::{ClientError, Driver, RawTree};
use crate::lang::Language;
use crate::uast::MAX_DEPTH;

/// A grammar bundled with the binary.
pub struct BuiltinGrammar {
    /// Canonical language identifier.
    pub language: &'static str,
    /// Version reported for the driver.
    pub version: &'static str,
    grammar: fn() -> Grammar,
}

impl BuiltinGrammar {
    pub fn driver(&self) -> TreeSitterDriver {
        TreeSitterDriver {
            language: self.language,
            grammar: (self.grammar)(),
        }
    }
}

fn c() -> Grammar {
    tree_sitter_c::LANGUAGE.into()
}

fn cpp() -> Grammar {
    tree_sitter_cpp::LANGUAGE.into()
}

fn csharp() -> Grammar {
    tree_sitter_c_sharp::LANGUAGE.into()
}

fn go() -> Grammar {
    tree_sitter_go::LANGUAGE.into()
}

fn java() -> Grammar {
    tree_sitter_java::LANGUAGE.into()
}

fn javascript() -> Grammar {
    tree_sitter_javascript::LANGUAGE.into()
}

fn php() -> Grammar {
    tree_sitter_php::LANGUAGE_PHP.into()
}

fn python() -> Grammar {
    tree_sitter_python::LANGUAGE.into()
}

fn rust() -> Grammar {
    tree_sitter_rust::LANGUAGE.into()
}

fn scala() -> Grammar {
    tree_sitter_scala::LANGUAGE.into()
}

fn swift() -> Grammar {
    tree_sitter_swift::LANGUAGE.into()
}

fn typescript() -> Grammar {
    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
}

/// All bundled grammars, sorted by language.
pub static BUILTIN_GRAMMARS: &[BuiltinGrammar] = &[
    BuiltinGrammar { language: "c", version: "v0.23.0", grammar: c },
    BuiltinGrammar { language: "c#", version: "v0.23.0", grammar: csharp },
    BuiltinGrammar { language: "c++", version: "v0.23.0", grammar: cpp },
    BuiltinGrammar { language: "go", version: "v0.23.0", grammar: go },
    BuiltinGrammar { language: "java", version: "v0.23.0", grammar: java },
    BuiltinGrammar { language: "javascript", version: "v0.23.0", grammar: javascript },
    BuiltinGrammar { language: "php", version: "v0.23.0", grammar: php },
    BuiltinGrammar { language: "python", version: "v0.23.0", grammar: python },
    BuiltinGrammar { language: "rust", version: "v0.23.0", grammar: rust },
    BuiltinGrammar { language: "scala", version: "v0.23.0", grammar: scala },
    BuiltinGrammar { language: "swift", version: "v0.6.0", grammar: swift },
    BuiltinGrammar { language: "typescript", version: "v0.23.0", grammar: typescript },
];

/// Look up the bundled grammar for a language.
pub fn builtin(language: &Language) -> Option<&'static BuiltinGrammar> {
    BUILTIN_GRAMMARS
        .iter()
        .find(|g| g.language == language.as_str())
}

/// In-process driver backed by a tree-sitter grammar.
pub struct TreeSitterDriver {
    language: &'static str,
    grammar: Grammar,
}

impl TreeSitterDriver {
    /// Parse synchronously. Source with syntax errors is rejected.
    ///
    /// The parse stops early once `cancel` becomes non-zero.
    pub fn parse_sync(&self, content: &[u8], cancel: &AtomicUsize) -> Result<RawTree, ClientError> {
        let mut parser = TsParser::new();
        parser.set_language(&self.grammar).map_err(|e| {
            ClientError::Unavailable(format!("{} grammar cannot be loaded: {}", self.language, e))
        })?;
        // SAFETY: `cancel` outlives `parser`, which is dropped when this
        // function returns.
        unsafe { parser.set_cancellation_flag(Some(cancel)) };

        let tree = parser.parse(content, None);
        if cancel.load(Ordering::Relaxed) != 0 {
            return Err(ClientError::Unavailable("parse cancelled".to_string()));
        }
        let tree = tree.ok_or_else(|| ClientError::Unavailable("parser returned no tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ClientError::Rejected(describe_error(root)));
        }

        Ok(RawTree::new(to_raw(root, content)))
    }
}

/// Raises the cancellation flag of a blocking parse when the call that
/// started it is dropped.
struct CancelOnDrop(Arc<AtomicUsize>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl Driver for TreeSitterDriver {
    async fn parse(&self, content: &[u8], language: &Language) -> Result<RawTree, ClientError> {
        if language.as_str() != self.language {
            return Err(ClientError::Rejected(format!(
                "{} driver cannot parse {}",
                self.language, language
            )));
        }

        let driver = TreeSitterDriver {
            language: self.language,
            grammar: self.grammar.clone(),
        };
        let content = content.to_vec();
        let cancel = Arc::new(AtomicUsize::new(0));
        let _guard = CancelOnDrop(Arc::clone(&cancel));
        tokio::task::spawn_blocking(move || driver.parse_sync(&content, &cancel))
            .await
            .map_err(|e| ClientError::Unavailable(format!("parser task failed: {}", e)))?
    }

    async fn health_check(&self) -> Result<(), ClientError> {
        TsParser::new()
            .set_language(&self.grammar)
            .map_err(|e| ClientError::Unavailable(e.to_string()))
    }
}

/// Describe the first syntax error in document order.
fn describe_error(root: TsNode) -> String {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let p = node.start_position();
            let what = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                "syntax error".to_string()
            };
            return format!("{} at line {}, column {}", what, p.row + 1, p.column + 1);
        }
        // Descend only into subtrees that contain the error.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return "syntax error".to_string();
            }
        }
    }
}

fn position(offset: usize, point: Point) -> Value {
    json!({
        "offset": offset,
        "line": point.row + 1,
        "col": point.column + 1,
    })
}

/// A node whose children are still being converted.
struct Frame {
    obj: Map<String, Value>,
    children: Vec<Value>,
}

impl Frame {
    fn new(cursor: &TreeCursor, source: &[u8]) -> Self {
        let node = cursor.node();
        let mut obj = Map::new();
        obj.insert("type".into(), Value::String(node.kind().to_string()));
        obj.insert("start".into(), position(node.start_byte(), node.start_position()));
        obj.insert("end".into(), position(node.end_byte(), node.end_position()));
        if let Some(field) = cursor.field_name() {
            obj.insert("field".into(), Value::String(field.to_string()));
        }
        if !node.is_named() {
            obj.insert("named".into(), Value::Bool(false));
        }
        if node.is_extra() {
            obj.insert("extra".into(), Value::Bool(true));
        }
        if node.child_count() == 0 {
            let text = String::from_utf8_lossy(&source[node.byte_range()]);
            obj.insert("token".into(), Value::String(text.into_owned()));
        }
        Self {
            obj,
            children: Vec::new(),
        }
    }

    fn into_value(mut self) -> Value {
        if !self.children.is_empty() {
            self.obj.insert("children".into(), Value::Array(self.children));
        }
        Value::Object(self.obj)
    }
}

/// Convert a tree-sitter tree to the raw shape.
///
/// Nodes are kept down to one level past `MAX_DEPTH`, enough for the
/// normalizer to see that the tree is too deep; anything below is dropped.
fn to_raw(root: TsNode, source: &[u8]) -> Value {
    let mut cursor = root.walk();
    let mut open = vec![Frame::new(&cursor, source)];

    'walk: loop {
        if open.len() <= MAX_DEPTH && cursor.goto_first_child() {
            open.push(Frame::new(&cursor, source));
            continue;
        }
        // The node under the cursor is complete: attach it, then move on to
        // its next sibling or finish the parent.
        while let Some(frame) = open.pop() {
            let value = frame.into_value();
            let Some(parent) = open.last_mut() else {
                return value;
            };
            parent.children.push(value);
            if cursor.goto_next_sibling() {
                open.push(Frame::new(&cursor, source));
                continue 'walk;
            }
            cursor.goto_parent();
        }
        return Value::Null;
    }
}
