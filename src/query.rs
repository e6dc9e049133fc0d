//! Structural path queries over a normalized tree.
//!
//! Syntax:
//! - `/` selects the root
//! - `/module/expression_statement` walks child steps from the root
//! - `//call` selects matching nodes at any depth
//! - `*` matches any kind
//! - `[@role='call']`, `[@token='print']`, `[@field='function']` and
//!   `[@field]` filter a step
//!
//! A relative path (`call/argument_list`) starts at the root's children.
//! Results come back in document order, without duplicates.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::uast::Node;

/// Malformed query syntax.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid query at offset {offset}: {message}")]
pub struct QueryError {
    /// Byte offset of the problem in the query text.
    pub offset: usize,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Has(String),
    Equals(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    /// `None` for the `*` wildcard.
    kind: Option<String>,
    predicates: Vec<Predicate>,
}

/// A parsed path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    source: String,
    absolute: bool,
    steps: Vec<Step>,
}

impl Query {
    pub fn parse(source: &str) -> Result<Self, QueryError> {
        let mut scanner = Scanner { src: source, pos: 0 };
        if source.trim().is_empty() {
            return Err(scanner.error("empty query"));
        }

        let absolute = source.starts_with('/');
        let mut steps = Vec::new();
        if source != "/" {
            while !scanner.at_end() {
                let axis = if scanner.eat("//") {
                    Axis::Descendant
                } else if scanner.eat("/") || (steps.is_empty() && !absolute) {
                    Axis::Child
                } else {
                    return Err(scanner.error("expected '/'"));
                };
                steps.push(scanner.step(axis)?);
            }
        }

        Ok(Self {
            source: source.to_string(),
            absolute,
            steps,
        })
    }

    /// Select the matching nodes under `root`.
    pub fn select<'a>(&self, root: &'a Node) -> Vec<&'a Node> {
        let order: HashMap<*const Node, usize> = root
            .iter()
            .enumerate()
            .map(|(i, n)| (n as *const Node, i))
            .collect();

        let mut current = vec![root];
        for (i, step) in self.steps.iter().enumerate() {
            let mut next: Vec<&'a Node> = Vec::new();
            if i == 0 && self.absolute {
                // The root is the only child of the (implicit) document.
                match step.axis {
                    Axis::Child => next.push(root),
                    Axis::Descendant => next.extend(root.iter()),
                }
            } else {
                for &n in &current {
                    match step.axis {
                        Axis::Child => next.extend(n.children.iter()),
                        Axis::Descendant => next.extend(n.iter().skip(1)),
                    }
                }
            }
            next.retain(|n| step.matches(n));
            next.sort_by_key(|n| order.get(&(*n as *const Node)).copied().unwrap_or(usize::MAX));
            next.dedup_by(|a, b| std::ptr::eq(*a, *b));
            current = next;
        }
        current
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Step {
    fn matches(&self, node: &Node) -> bool {
        if let Some(kind) = &self.kind {
            if node.kind != *kind {
                return false;
            }
        }
        self.predicates.iter().all(|p| p.matches(node))
    }
}

impl Predicate {
    fn matches(&self, node: &Node) -> bool {
        match self {
            Predicate::Has(name) => match name.as_str() {
                "role" => !node.roles.is_empty(),
                "token" => node.token.is_some(),
                prop => node.props.contains_key(prop),
            },
            Predicate::Equals(name, want) => match name.as_str() {
                "role" => node.roles.iter().any(|r| r.as_str() == want),
                "token" => node.token.as_deref() == Some(want.as_str()),
                prop => match node.props.get(prop) {
                    Some(serde_json::Value::String(s)) => s == want,
                    Some(other) => other.to_string() == *want,
                    None => false,
                },
            },
        }
    }
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn error(&self, message: impl Into<String>) -> QueryError {
        QueryError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.src[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !f(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn step(&mut self, axis: Axis) -> Result<Step, QueryError> {
        let name = self.take_while(|c| !matches!(c, '/' | '[' | ']') && !c.is_whitespace());
        if name.is_empty() {
            return Err(self.error("expected a node kind or '*'"));
        }
        let kind = (name != "*").then(|| name.to_string());

        let mut predicates = Vec::new();
        while self.eat("[") {
            predicates.push(self.predicate()?);
        }
        if !self.at_end() && self.peek() != Some('/') {
            return Err(self.error("unexpected character"));
        }

        Ok(Step {
            axis,
            kind,
            predicates,
        })
    }

    fn predicate(&mut self) -> Result<Predicate, QueryError> {
        self.skip_whitespace();
        if !self.eat("@") {
            return Err(self.error("expected '@'"));
        }
        let name = self.take_while(|c| c.is_alphanumeric() || c == '_' || c == '-');
        if name.is_empty() {
            return Err(self.error("expected an attribute name"));
        }
        self.skip_whitespace();

        let predicate = if self.eat("=") {
            self.skip_whitespace();
            let quote = match self.peek() {
                Some(q @ ('\'' | '"')) => q,
                _ => return Err(self.error("expected a quoted value")),
            };
            let open = self.pos;
            self.pos += 1;
            let value = self.take_while(|c| c != quote);
            if !self.eat(&quote.to_string()) {
                return Err(QueryError {
                    offset: open,
                    message: "unterminated string".to_string(),
                });
            }
            Predicate::Equals(name.to_string(), value.to_string())
        } else {
            Predicate::Has(name.to_string())
        };

        self.skip_whitespace();
        if !self.eat("]") {
            return Err(self.error("expected ']'"));
        }
        Ok(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uast::Role;

    fn leaf(kind: &str, token: &str) -> Node {
        let mut n = Node::new(kind);
        n.token = Some(token.to_string());
        n
    }

    /// module
    ///   expression_statement
    ///     call
    ///       identifier "print"   (field=function, role identifier)
    ///       argument_list
    ///         string "hi"
    ///   expression_statement
    ///     identifier "x"
    fn tree() -> Node {
        let mut ident = leaf("identifier", "print");
        ident.roles.push(Role::Identifier);
        ident.props.insert("field".into(), "function".into());

        let mut args = Node::new("argument_list");
        args.children.push(leaf("string", "hi"));

        let mut call = Node::new("call");
        call.roles.push(Role::Call);
        call.children.push(ident);
        call.children.push(args);

        let mut first = Node::new("expression_statement");
        first.children.push(call);
        let mut second = Node::new("expression_statement");
        second.children.push(leaf("identifier", "x"));

        let mut root = Node::new("module");
        root.children.push(first);
        root.children.push(second);
        root
    }

    fn kinds(query: &str, root: &Node) -> Vec<String> {
        Query::parse(query)
            .unwrap()
            .select(root)
            .into_iter()
            .map(|n| match &n.token {
                Some(t) => format!("{}:{}", n.kind, t),
                None => n.kind.clone(),
            })
            .collect()
    }

    #[test]
    fn test_root_and_child_steps() {
        let root = tree();
        assert_eq!(kinds("/", &root), vec!["module"]);
        assert_eq!(kinds("/module", &root), vec!["module"]);
        assert_eq!(kinds("/program", &root), Vec::<String>::new());
        assert_eq!(
            kinds("/module/expression_statement", &root),
            vec!["expression_statement", "expression_statement"]
        );
        assert_eq!(kinds("/*/*/call", &root), vec!["call"]);
    }

    #[test]
    fn test_relative_path_starts_at_root_children() {
        let root = tree();
        assert_eq!(kinds("expression_statement/identifier", &root), vec!["identifier:x"]);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let root = tree();
        assert_eq!(kinds("//identifier", &root), vec!["identifier:print", "identifier:x"]);
        // Overlapping contexts must not produce duplicates.
        assert_eq!(kinds("//*//string", &root), vec!["string:hi"]);
        assert_eq!(kinds("/module//argument_list/string", &root), vec!["string:hi"]);
    }

    #[test]
    fn test_predicates() {
        let root = tree();
        assert_eq!(kinds("//*[@role='call']", &root), vec!["call"]);
        assert_eq!(kinds("//identifier[@token=\"x\"]", &root), vec!["identifier:x"]);
        assert_eq!(kinds("//*[@field='function']", &root), vec!["identifier:print"]);
        assert_eq!(kinds("//*[@field]", &root), vec!["identifier:print"]);
        assert_eq!(kinds("//*[@role][@token]", &root), vec!["identifier:print"]);
        assert_eq!(kinds("//*[ @token = 'hi' ]", &root), vec!["string:hi"]);
    }

    #[test]
    fn test_syntax_errors_report_offset() {
        let cases = [
            ("", 0),
            ("/module/", 8),
            ("//call[", 7),
            ("//call[role='x']", 7),
            ("//call[@role='x", 13),
            ("//call[@role=x]", 13),
            ("//call[@role]x", 13),
            ("/a b", 2),
        ];
        for (query, offset) in cases {
            let err = Query::parse(query).unwrap_err();
            assert_eq!(err.offset, offset, "{:?}: {}", query, err);
        }
    }

    #[test]
    fn test_display_keeps_source() {
        let q: Query = "//call[@role='call']".parse().unwrap();
        assert_eq!(q.to_string(), "//call[@role='call']");
    }
}
