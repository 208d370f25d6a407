//! Structured comment content
//!
//! Comment bodies arrive as serialized rich-text documents (a JSON tree of
//! nodes such as `{"type":"doc","content":[...]}`) and are stored parsed.

use crate::error::{Result, WcError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed rich-text document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentContent(Value);

impl CommentContent {
    /// Parse serialized content
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map(CommentContent)
            .map_err(WcError::MalformedContent)
    }

    /// Wrap an already parsed document
    pub fn from_value(value: Value) -> Self {
        CommentContent(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Concatenated text leaves in document order
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.0, &mut out);
        out
    }
}

fn collect_text(node: &Value, out: &mut String) {
    match node {
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                out.push_str(text);
            }
            if let Some(children) = map.get("content") {
                collect_text(children, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_text(item, out);
            }
        }
        _ => {}
    }
}
