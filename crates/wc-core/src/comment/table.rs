//! Indexed in-memory comment table
//!
//! Backing collection for repository implementations. Deleting a top-level
//! comment also deletes its replies.

use super::index::CommentIndex;
use super::model::{Comment, CommentUpdate};
use crate::error::{Result, WcError};
use crate::pagination::{PaginationOptions, PaginationResult};
use crate::types::{CommentId, PageId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Comments by id with page and parent indexes
#[derive(Debug, Clone, Serialize)]
pub struct CommentTable {
    /// All comments by ID
    comments: HashMap<CommentId, Comment>,
    #[serde(skip)]
    index: CommentIndex,
}

impl CommentTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            comments: HashMap::new(),
            index: CommentIndex::new(),
        }
    }

    /// Insert a comment
    pub fn insert(&mut self, comment: Comment) -> Result<()> {
        if self.comments.contains_key(&comment.id) {
            return Err(WcError::Duplicate(format!(
                "Comment with ID {} already exists",
                comment.id
            )));
        }

        self.index.add(&comment);
        self.comments.insert(comment.id.clone(), comment);
        Ok(())
    }

    /// Get a comment by ID
    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.get(id)
    }

    /// Apply an edit
    pub fn update(&mut self, id: &CommentId, update: &CommentUpdate) -> Result<()> {
        let comment = self
            .comments
            .get_mut(id)
            .ok_or_else(WcError::comment_not_found)?;

        comment.apply_update(update);
        Ok(())
    }

    /// Delete a comment and its replies, returning everything removed
    pub fn delete(&mut self, id: &CommentId) -> Vec<Comment> {
        let mut removed = Vec::new();

        for reply_id in self.index.get_replies(id) {
            if let Some(reply) = self.comments.remove(&reply_id) {
                self.index.remove(&reply);
                removed.push(reply);
            }
        }

        if let Some(comment) = self.comments.remove(id) {
            self.index.remove(&comment);
            removed.push(comment);
        }

        removed
    }

    /// Delete all comments for a page
    pub fn delete_by_page(&mut self, page_id: &PageId) -> usize {
        let ids = self.index.get_by_page(page_id);
        let count = ids.len();

        for id in ids {
            if let Some(comment) = self.comments.remove(&id) {
                self.index.remove(&comment);
            }
        }

        count
    }

    /// Comments on a page, oldest first
    pub fn page_comments(&self, page_id: &PageId) -> Vec<&Comment> {
        let mut comments: Vec<_> = self
            .index
            .get_by_page(page_id)
            .iter()
            .filter_map(|id| self.comments.get(id))
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        comments
    }

    /// One page of a page's comments, oldest first
    pub fn paginate_page(
        &self,
        page_id: &PageId,
        pagination: &PaginationOptions,
    ) -> PaginationResult<Comment> {
        pagination.apply(self.page_comments(page_id).into_iter().cloned())
    }

    /// Number of comments on a page, replies included
    pub fn page_comment_count(&self, page_id: &PageId) -> usize {
        self.index.page_comment_count(page_id)
    }

    /// Get total comment count
    pub fn count(&self) -> usize {
        self.comments.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Rebuild index (after deserialization)
    pub fn rebuild_index(&mut self) {
        self.index.rebuild(self.comments.values());
    }
}

impl Default for CommentTable {
    fn default() -> Self {
        Self::new()
    }
}

// Custom deserialization to rebuild index
impl<'de> serde::de::Deserialize<'de> for CommentTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct CommentTableHelper {
            comments: HashMap<CommentId, Comment>,
        }

        let helper = CommentTableHelper::deserialize(deserializer)?;
        let mut table = Self {
            comments: helper.comments,
            index: CommentIndex::new(),
        };
        table.rebuild_index();
        Ok(table)
    }
}
