//! Comment indexing for fast lookup

use super::model::Comment;
use crate::types::{CommentId, PageId};
use std::collections::HashMap;

/// Secondary indexes over a comment collection
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    /// Index by owning page
    by_page: HashMap<PageId, Vec<CommentId>>,
    /// Replies keyed by their parent
    by_parent: HashMap<CommentId, Vec<CommentId>>,
}

impl CommentIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comment to the index
    pub fn add(&mut self, comment: &Comment) {
        self.by_page
            .entry(comment.page_id.clone())
            .or_default()
            .push(comment.id.clone());

        if let Some(parent) = &comment.parent_comment_id {
            self.by_parent
                .entry(parent.clone())
                .or_default()
                .push(comment.id.clone());
        }
    }

    /// Remove a comment from the index
    pub fn remove(&mut self, comment: &Comment) {
        if let Some(ids) = self.by_page.get_mut(&comment.page_id) {
            ids.retain(|id| id != &comment.id);
            if ids.is_empty() {
                self.by_page.remove(&comment.page_id);
            }
        }

        if let Some(parent) = &comment.parent_comment_id {
            if let Some(ids) = self.by_parent.get_mut(parent) {
                ids.retain(|id| id != &comment.id);
                if ids.is_empty() {
                    self.by_parent.remove(parent);
                }
            }
        }

        self.by_parent.remove(&comment.id);
    }

    /// Get comments on a page, in insertion order
    pub fn get_by_page(&self, page_id: &PageId) -> Vec<CommentId> {
        self.by_page.get(page_id).cloned().unwrap_or_default()
    }

    /// Get direct replies to a comment
    pub fn get_replies(&self, parent: &CommentId) -> Vec<CommentId> {
        self.by_parent.get(parent).cloned().unwrap_or_default()
    }

    /// Get comment count for a page
    pub fn page_comment_count(&self, page_id: &PageId) -> usize {
        self.by_page.get(page_id).map(|ids| ids.len()).unwrap_or(0)
    }

    /// Clear the entire index
    pub fn clear(&mut self) {
        self.by_page.clear();
        self.by_parent.clear();
    }

    /// Rebuild index from a collection of comments
    pub fn rebuild(&mut self, comments: impl IntoIterator<Item = impl std::borrow::Borrow<Comment>>) {
        self.clear();
        for comment in comments {
            self.add(comment.borrow());
        }
    }
}
