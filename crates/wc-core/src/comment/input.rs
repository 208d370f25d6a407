//! Request payloads accepted by the comment service

use crate::types::{CommentId, PageId};
use serde::{Deserialize, Serialize};

/// Payload for creating a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    /// Serialized rich-text document
    pub content: String,
    pub page_id: PageId,
    #[serde(default)]
    pub selection: Option<String>,
    #[serde(default)]
    pub parent_comment_id: Option<CommentId>,
}

impl CreateCommentInput {
    pub fn new(page_id: PageId, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            page_id,
            selection: None,
            parent_comment_id: None,
        }
    }

    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    pub fn reply_to(mut self, parent: CommentId) -> Self {
        self.parent_comment_id = Some(parent);
        self
    }
}

/// Payload for editing a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentInput {
    /// Serialized rich-text document
    pub content: String,
}

impl UpdateCommentInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_from_json() {
        let input: CreateCommentInput =
            serde_json::from_str(r#"{"content":"{\"type\":\"doc\"}","pageId":"P1"}"#).unwrap();
        assert_eq!(input.page_id, PageId::from("P1"));
        assert!(input.selection.is_none());
        assert!(input.parent_comment_id.is_none());
    }

    #[test]
    fn test_create_input_with_parent() {
        let parent = CommentId::new();
        let json = format!(
            r#"{{"content":"{{}}","pageId":"P1","selection":"abc","parentCommentId":"{}"}}"#,
            parent
        );
        let input: CreateCommentInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.parent_comment_id, Some(parent));
        assert_eq!(input.selection.as_deref(), Some("abc"));
    }
}
