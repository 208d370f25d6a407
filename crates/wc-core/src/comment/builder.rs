//! Builder for comment insert records

use super::content::CommentContent;
use super::model::{CommentType, NewComment};
use super::validator::CommentValidator;
use crate::error::{Result, WcError};
use crate::types::{CommentId, PageId, UserId, WorkspaceId};

/// Fluent builder for [`NewComment`]
///
/// Selections are truncated as they are set, so a built record always
/// satisfies the selection length limit.
pub struct CommentBuilder {
    page_id: PageId,
    creator_id: UserId,
    workspace_id: WorkspaceId,
    content: Option<CommentContent>,
    selection: Option<String>,
    parent_comment_id: Option<CommentId>,
}

impl CommentBuilder {
    /// Start a comment on `page_id` owned by `creator_id` in `workspace_id`
    pub fn new(page_id: PageId, creator_id: UserId, workspace_id: WorkspaceId) -> Self {
        Self {
            page_id,
            creator_id,
            workspace_id,
            content: None,
            selection: None,
            parent_comment_id: None,
        }
    }

    /// Set the parsed content
    pub fn content(mut self, content: CommentContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the anchored selection, truncated to the allowed length
    pub fn selection(mut self, selection: impl AsRef<str>) -> Self {
        self.selection = Some(CommentValidator::new().truncate_selection(selection.as_ref()));
        self
    }

    /// Make this comment a reply
    pub fn reply_to(mut self, parent: CommentId) -> Self {
        self.parent_comment_id = Some(parent);
        self
    }

    /// Build the insert record
    pub fn build(self) -> Result<NewComment> {
        let content = self.content.ok_or_else(|| {
            WcError::InvalidInput("Comment content is required".to_string())
        })?;

        Ok(NewComment {
            page_id: self.page_id,
            parent_comment_id: self.parent_comment_id,
            content,
            selection: self.selection,
            comment_type: CommentType::Inline,
            creator_id: self.creator_id,
            workspace_id: self.workspace_id,
        })
    }
}
