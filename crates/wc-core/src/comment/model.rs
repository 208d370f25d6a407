//! Comment data models

use super::content::CommentContent;
use crate::types::{CommentId, PageId, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment attached to a page, optionally replying to a top-level comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Owning page
    pub page_id: PageId,
    /// Top-level comment this one replies to
    pub parent_comment_id: Option<CommentId>,
    /// Rich-text document
    pub content: CommentContent,
    /// Page text the comment is anchored to
    pub selection: Option<String>,
    #[serde(rename = "type")]
    pub comment_type: CommentType,
    pub creator_id: UserId,
    pub workspace_id: WorkspaceId,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the content was last edited
    pub edited_at: Option<DateTime<Utc>>,
    /// Creator relation, present when requested from the repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,
}

impl Comment {
    /// Whether this comment is a reply
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }

    /// Only top-level comments may be replied to
    pub fn accepts_replies(&self) -> bool {
        !self.is_reply()
    }

    /// Replace content and stamp the edit time
    pub fn apply_update(&mut self, update: &CommentUpdate) {
        self.content = update.content.clone();
        self.edited_at = Some(update.edited_at);
    }
}

/// Kind of comment. Only inline comments exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentType {
    /// Anchored to a text selection within the page
    #[default]
    Inline,
}

impl CommentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentType::Inline => "inline",
        }
    }
}

impl std::fmt::Display for CommentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public profile of a comment's author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Creator {
    /// A creator known only by id
    pub fn anonymous(id: UserId) -> Self {
        Self {
            id,
            name: None,
            avatar_url: None,
        }
    }

    /// Name for display, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Fields for a comment about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub page_id: PageId,
    pub parent_comment_id: Option<CommentId>,
    pub content: CommentContent,
    pub selection: Option<String>,
    pub comment_type: CommentType,
    pub creator_id: UserId,
    pub workspace_id: WorkspaceId,
}

impl NewComment {
    /// Materialize into a stored comment with a fresh id
    pub fn into_comment(self, created_at: DateTime<Utc>) -> Comment {
        Comment {
            id: CommentId::new(),
            page_id: self.page_id,
            parent_comment_id: self.parent_comment_id,
            content: self.content,
            selection: self.selection,
            comment_type: self.comment_type,
            creator_id: self.creator_id,
            workspace_id: self.workspace_id,
            created_at,
            edited_at: None,
            creator: None,
        }
    }
}

/// Mutable fields written by an edit
#[derive(Debug, Clone, PartialEq)]
pub struct CommentUpdate {
    pub content: CommentContent,
    pub edited_at: DateTime<Utc>,
}

/// Lookup options for [`CommentRepo::find_by_id`](super::CommentRepo::find_by_id)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Populate [`Comment::creator`]
    pub include_creator: bool,
}

impl FindOptions {
    pub fn with_creator() -> Self {
        Self {
            include_creator: true,
        }
    }
}
