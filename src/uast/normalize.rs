//! Mode normalizer: raw driver tree -> UAST.
//!
//! One traversal serves all three modes; only the per-node rule differs.
//! Native and annotated are strict and refuse structurally malformed input.
//! Semantic degrades: it always produces a tree.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

use super::roles::{self, Role};
use super::{Mode, Node, Position, Span};
use crate::driver::RawTree;
use crate::lang::Language;

/// Maximum nesting accepted from a driver.
pub const MAX_DEPTH: usize = 1024;

/// Raw keys with a dedicated place in the generic node shape.
const RESERVED: [&str; 5] = ["type", "children", "token", "start", "end"];

const UNKNOWN_ROLES: &[Role] = &[Role::Unknown];

/// The raw tree could not be normalized in a strict mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("malformed node at {at}: {reason}")]
    Malformed { at: String, reason: String },
    #[error("tree nesting exceeds {limit} levels at {at}")]
    TooDeep { at: String, limit: usize },
}

/// Normalize a raw tree in the given mode.
///
/// Identical input always yields an identical tree. Semantic mode never
/// returns an error.
pub fn normalize(raw: &RawTree, mode: Mode, language: &Language) -> Result<Node, NormalizeError> {
    let walker = Walker { mode, language };
    let mut path = Vec::new();
    walker.node(raw.root(), 1, &mut path)
}

struct Walker<'a> {
    mode: Mode,
    language: &'a Language,
}

impl Walker<'_> {
    fn strict(&self) -> bool {
        self.mode != Mode::Semantic
    }

    /// In strict modes a malformation is an error; in semantic mode the
    /// offending part is dropped and `None` is returned.
    fn malformed<T>(&self, path: &[usize], reason: impl Into<String>) -> Result<Option<T>, NormalizeError> {
        if self.strict() {
            Err(NormalizeError::Malformed {
                at: location(path),
                reason: reason.into(),
            })
        } else {
            Ok(None)
        }
    }

    fn node(&self, raw: &Value, depth: usize, path: &mut Vec<usize>) -> Result<Node, NormalizeError> {
        let Some(obj) = raw.as_object() else {
            self.malformed::<()>(path, format!("expected an object, found {}", value_kind(raw)))?;
            return Ok(self.shape(None, &Map::new()));
        };

        let kind = match obj.get("type") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            Some(_) => self.malformed(path, "`type` must be a non-empty string")?,
            None => self.malformed(path, "missing `type`")?,
        };

        let mut node = self.shape(kind, obj);
        node.token = match obj.get("token") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => self.malformed(path, "`token` must be a string")?,
        };
        node.pos = self.span(obj, path)?;

        let raw_children = match obj.get("children") {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => self
                .malformed(path, "`children` must be an array")?
                .unwrap_or(&[][..]),
        };

        if !raw_children.is_empty() && depth >= MAX_DEPTH {
            if self.strict() {
                return Err(NormalizeError::TooDeep {
                    at: location(path),
                    limit: MAX_DEPTH,
                });
            }
            tracing::debug!(at = %location(path), "truncating tree at depth limit");
            return Ok(node);
        }

        node.children.reserve(raw_children.len());
        for (i, raw_child) in raw_children.iter().enumerate() {
            path.push(i);
            let child = self.node(raw_child, depth + 1, path)?;
            path.pop();
            node.children.push(child);
        }

        self.check_ranges(&mut node, path)?;
        Ok(node)
    }

    /// The mode-specific part: kind, roles and properties.
    fn shape(&self, kind: Option<&str>, obj: &Map<String, Value>) -> Node {
        let mapped = kind.and_then(|k| roles::lookup(self.language, k));
        match self.mode {
            Mode::Native | Mode::Annotated => {
                let mut node = Node::new(kind.unwrap_or(Role::Unknown.as_str()));
                if self.mode == Mode::Annotated {
                    node.roles = mapped.map(<[Role]>::to_vec).unwrap_or_default();
                }
                node.props = driver_fields(obj);
                node
            }
            Mode::Semantic => {
                let roles = mapped.unwrap_or(UNKNOWN_ROLES);
                let mut node = Node::new(roles[0].as_str());
                node.roles = roles.to_vec();
                node
            }
        }
    }

    fn span(&self, obj: &Map<String, Value>, path: &[usize]) -> Result<Option<Span>, NormalizeError> {
        let (start, end) = match (obj.get("start"), obj.get("end")) {
            (None, None) => return Ok(None),
            (Some(start), Some(end)) => (start, end),
            _ => return self.malformed(path, "position needs both `start` and `end`"),
        };
        let (Ok(start), Ok(end)) = (Position::deserialize(start), Position::deserialize(end)) else {
            return self.malformed(path, "positions must be {offset, line, col}");
        };
        if start.offset > end.offset || (start.line, start.col) > (end.line, end.col) {
            return self.malformed(path, "`start` is after `end`");
        }
        Ok(Some(Span { start, end }))
    }

    /// Children must sit inside their parent and must not overlap each other.
    fn check_ranges(&self, node: &mut Node, path: &mut Vec<usize>) -> Result<(), NormalizeError> {
        let parent = node.pos;
        let mut prev_end: Option<usize> = None;
        for (i, child) in node.children.iter_mut().enumerate() {
            let Some(span) = child.pos else { continue };
            let escapes = parent.map_or(false, |p| !p.contains(&span));
            let overlaps = prev_end.map_or(false, |end| span.start.offset < end);
            if escapes || overlaps {
                path.push(i);
                let reason = if escapes {
                    "child range escapes its parent"
                } else {
                    "child range overlaps its previous sibling"
                };
                self.malformed::<()>(path, reason)?;
                path.pop();
                child.pos = None;
                continue;
            }
            prev_end = Some(span.end.offset);
        }
        Ok(())
    }
}

fn driver_fields(obj: &Map<String, Value>) -> BTreeMap<String, Value> {
    obj.iter()
        .filter(|(k, _)| !RESERVED.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn location(path: &[usize]) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    path.iter().map(|i| format!("/{}", i)).collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn python() -> Language {
        Language::resolve("python").unwrap()
    }

    fn pos(offset: usize, col: usize) -> Value {
        json!({"offset": offset, "line": 1, "col": col})
    }

    /// `print(x)` as a python driver would report it.
    fn sample() -> RawTree {
        RawTree::new(json!({
            "type": "module",
            "start": pos(0, 1),
            "end": pos(8, 9),
            "children": [{
                "type": "expression_statement",
                "start": pos(0, 1),
                "end": pos(8, 9),
                "children": [{
                    "type": "call",
                    "start": pos(0, 1),
                    "end": pos(8, 9),
                    "children": [
                        {"type": "identifier", "field": "function", "token": "print",
                         "start": pos(0, 1), "end": pos(5, 6)},
                        {"type": "argument_list", "field": "arguments",
                         "start": pos(5, 6), "end": pos(8, 9),
                         "children": [
                            {"type": "(", "named": false, "token": "(", "start": pos(5, 6), "end": pos(6, 7)},
                            {"type": "decorator_xyz", "token": "x", "start": pos(6, 7), "end": pos(7, 8)},
                            {"type": ")", "named": false, "token": ")", "start": pos(7, 8), "end": pos(8, 9)}
                         ]}
                    ]
                }]
            }]
        }))
    }

    /// Every raw key must reappear somewhere in the native node.
    fn assert_lossless(raw: &Value, node: &Node) {
        let obj = raw.as_object().unwrap();
        for (key, value) in obj {
            match key.as_str() {
                "type" => assert_eq!(value, &json!(node.kind)),
                "token" => assert_eq!(value, &json!(node.token)),
                "start" => assert_eq!(value, &serde_json::to_value(node.pos.unwrap().start).unwrap()),
                "end" => assert_eq!(value, &serde_json::to_value(node.pos.unwrap().end).unwrap()),
                "children" => {
                    let children = value.as_array().unwrap();
                    assert_eq!(children.len(), node.children.len());
                    for (r, n) in children.iter().zip(&node.children) {
                        assert_lossless(r, n);
                    }
                }
                _ => assert_eq!(node.props.get(key), Some(value), "{}", key),
            }
        }
    }

    #[test]
    fn test_native_is_lossless() {
        let raw = sample();
        let node = normalize(&raw, Mode::Native, &python()).unwrap();
        assert_eq!(node.kind, "module");
        assert!(node.roles.is_empty());
        assert_lossless(raw.root(), &node);
    }

    #[test]
    fn test_annotated_adds_roles_only_where_mapped() {
        let node = normalize(&sample(), Mode::Annotated, &python()).unwrap();
        assert_eq!(node.roles, vec![Role::File]);
        let call = &node.children[0].children[0];
        assert_eq!(call.kind, "call");
        assert!(call.has_role(Role::Call));
        let args = &call.children[1];
        assert_eq!(args.props["field"], "arguments");
        // Unmapped kinds keep their native kind and get no role.
        let unmapped = &args.children[1];
        assert_eq!(unmapped.kind, "decorator_xyz");
        assert!(unmapped.roles.is_empty());
    }

    #[test]
    fn test_semantic_uses_role_vocabulary_only() {
        let node = normalize(&sample(), Mode::Semantic, &python()).unwrap();
        assert_eq!(node.kind, "file");
        for n in node.iter() {
            assert!(n.props.is_empty());
            assert!(!n.roles.is_empty());
            assert_eq!(n.kind, n.roles[0].as_str());
        }
        let args = &node.children[0].children[0].children[1];
        assert_eq!(args.kind, "argument");
        assert_eq!(args.children[1].kind, "unknown");
        assert_eq!(args.children[1].token.as_deref(), Some("x"));
    }

    #[test]
    fn test_output_is_deterministic() {
        for mode in Mode::ALL {
            let a = serde_json::to_vec(&normalize(&sample(), mode, &python()).unwrap()).unwrap();
            let b = serde_json::to_vec(&normalize(&sample(), mode, &python()).unwrap()).unwrap();
            assert_eq!(a, b, "{}", mode);
        }
    }

    #[test]
    fn test_strict_modes_reject_malformed_trees() {
        let cases = [
            json!(42),
            json!({"children": []}),
            json!({"type": "module", "children": {"type": "x"}}),
            json!({"type": "module", "token": 7}),
            json!({"type": "module", "start": pos(0, 1)}),
            json!({"type": "module", "start": pos(5, 6), "end": pos(1, 2)}),
            json!({"type": "module", "start": pos(0, 1), "end": pos(4, 5),
                   "children": [{"type": "x", "start": pos(2, 3), "end": pos(9, 10)}]}),
            json!({"type": "module", "start": pos(0, 1), "end": pos(9, 10),
                   "children": [{"type": "x", "start": pos(0, 1), "end": pos(5, 6)},
                                {"type": "y", "start": pos(3, 4), "end": pos(8, 9)}]}),
        ];
        for raw in cases {
            let raw = RawTree::new(raw);
            for mode in [Mode::Native, Mode::Annotated] {
                let err = normalize(&raw, mode, &python()).unwrap_err();
                assert!(matches!(err, NormalizeError::Malformed { .. }), "{:?}", raw);
            }
            assert!(normalize(&raw, Mode::Semantic, &python()).is_ok(), "{:?}", raw);
        }
    }

    #[test]
    fn test_error_reports_location() {
        let raw = RawTree::new(json!({"type": "module", "children": [{"type": "a"}, {"type": 1}]}));
        let err = normalize(&raw, Mode::Native, &python()).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::Malformed {
                at: "/1".to_string(),
                reason: "`type` must be a non-empty string".to_string()
            }
        );
    }

    #[test]
    fn test_semantic_degrades() {
        let raw = RawTree::new(json!({
            "type": "module",
            "start": pos(0, 1),
            "end": pos(4, 5),
            "children": [
                "garbage",
                {"type": "identifier", "token": "a", "start": pos(2, 3), "end": pos(9, 10)},
                {"type": "comment", "children": 3}
            ]
        }));
        let node = normalize(&raw, Mode::Semantic, &python()).unwrap();
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[0].kind, "unknown");
        assert_eq!(node.children[1].kind, "identifier");
        assert!(node.children[1].pos.is_none());
        assert_eq!(node.children[2].kind, "comment");
        assert!(node.children[2].children.is_empty());
    }

    #[test]
    fn test_unknown_language_in_semantic_mode() {
        let haskell = Language::resolve("haskell").unwrap();
        let node = normalize(&sample(), Mode::Semantic, &haskell).unwrap();
        assert!(node.iter().all(|n| n.kind == "unknown"));
    }

    fn nested(depth: usize) -> RawTree {
        let mut value = json!({"type": "leaf"});
        for _ in 1..depth {
            value = json!({"type": "block", "children": [value]});
        }
        RawTree::new(value)
    }

    #[test]
    fn test_depth_limit() {
        assert!(normalize(&nested(MAX_DEPTH), Mode::Native, &python()).is_ok());

        let too_deep = nested(MAX_DEPTH + 10);
        let err = normalize(&too_deep, Mode::Native, &python()).unwrap_err();
        assert!(matches!(err, NormalizeError::TooDeep { limit: MAX_DEPTH, .. }));

        let node = normalize(&too_deep, Mode::Semantic, &python()).unwrap();
        let mut depth = 1;
        let mut cur = &node;
        while let Some(child) = cur.children.first() {
            depth += 1;
            cur = child;
        }
        assert_eq!(depth, MAX_DEPTH);
    }
}
