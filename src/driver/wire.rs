//! JSON messages exchanged with out-of-process drivers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::{ClientError, RawTree};
use crate::lang::Language;
use crate::uast::MAX_DEPTH;

/// Parse request sent to a driver.
#[derive(Debug, Serialize, Deserialize)]
pub struct WireRequest<'a> {
    pub language: Cow<'a, str>,
    /// Source text; invalid UTF-8 sequences are replaced.
    pub content: Cow<'a, str>,
}

impl<'a> WireRequest<'a> {
    pub fn new(language: &'a Language, content: &'a [u8]) -> Self {
        Self {
            language: Cow::Borrowed(language.as_str()),
            content: String::from_utf8_lossy(content),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ClientError> {
        serde_json::to_vec(self)
            .map_err(|e| ClientError::Protocol(format!("failed to encode request: {}", e)))
    }
}

/// Driver reply: `ok` with the tree, or `error` with the reasons the input
/// was refused.
#[derive(Debug, Serialize, Deserialize)]
pub struct WireResponse {
    pub status: WireStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireStatus {
    Ok,
    Error,
}

impl WireResponse {
    pub fn into_result(self) -> Result<RawTree, ClientError> {
        match (self.status, self.tree) {
            (WireStatus::Ok, Some(tree)) => Ok(RawTree::new(tree)),
            (WireStatus::Ok, None) => Err(ClientError::Protocol(
                "reply has status ok but no tree".to_string(),
            )),
            (WireStatus::Error, _) if self.errors.is_empty() => Err(ClientError::Rejected(
                "driver reported an error without details".to_string(),
            )),
            (WireStatus::Error, _) => Err(ClientError::Rejected(self.errors.join("; "))),
        }
    }
}

/// JSON nesting kept when decoding a reply. A raw node takes two levels (its
/// object and its `children` array) below the envelope, so this covers every
/// node down to one level past `MAX_DEPTH`.
const MAX_NESTING: usize = 2 * MAX_DEPTH + 2;

/// Decode a response body.
///
/// Values nested deeper than `MAX_NESTING` are replaced by `null` before
/// decoding. The normalizer never looks that far down: strict modes report
/// the tree as too deep and semantic mode truncates it. Decoding grows the
/// stack on demand, so deep replies are safe on small task stacks.
pub fn decode_response(body: &[u8]) -> Result<RawTree, ClientError> {
    let pruned = prune_nesting(body, MAX_NESTING);
    let mut de = serde_json::Deserializer::from_slice(pruned.as_deref().unwrap_or(body));
    de.disable_recursion_limit();
    let response = WireResponse::deserialize(serde_stacker::Deserializer::new(&mut de))
        .and_then(|response| de.end().map(|()| response))
        .map_err(|e| ClientError::Protocol(format!("{} (body: {})", e, snippet(body))))?;
    response.into_result()
}

/// Copy of `body` with every object or array opened below `limit` levels
/// replaced by `null`, or `None` when nothing is that deep. Malformed input
/// is passed through for the decoder to reject.
fn prune_nesting(body: &[u8], limit: usize) -> Option<Vec<u8>> {
    let mut out: Option<Vec<u8>> = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut skipping = false;

    for (i, &b) in body.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'{' | b'[' => {
                    depth += 1;
                    if depth == limit + 1 && !skipping {
                        let buf = out.get_or_insert_with(|| body[..i].to_vec());
                        buf.extend_from_slice(b"null");
                        skipping = true;
                        continue;
                    }
                }
                b'}' | b']' => {
                    depth = depth.saturating_sub(1);
                    if skipping && depth == limit {
                        skipping = false;
                        continue;
                    }
                }
                _ => {}
            }
        }
        if !skipping {
            if let Some(buf) = out.as_mut() {
                buf.push(b);
            }
        }
    }
    out
}

/// Short printable excerpt of a payload for error messages.
pub fn snippet(body: &[u8]) -> String {
    const MAX: usize = 120;
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}
