//! Comment repository trait and abstractions

use super::model::{Comment, CommentUpdate, FindOptions, NewComment};
use crate::error::Result;
use crate::pagination::{PaginationOptions, PaginationResult};
use crate::types::{CommentId, PageId};
use async_trait::async_trait;

/// Persistence operations for comments
#[async_trait]
pub trait CommentRepo: Send + Sync {
    /// Find a comment by ID
    async fn find_by_id(&self, id: &CommentId, options: FindOptions) -> Result<Option<Comment>>;

    /// One page of a page's comments, oldest first
    async fn find_page_comments(
        &self,
        page_id: &PageId,
        pagination: &PaginationOptions,
    ) -> Result<PaginationResult<Comment>>;

    /// Insert a comment, returning the stored record
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment>;

    /// Write an edit to an existing comment
    async fn update_comment(&self, update: CommentUpdate, id: &CommentId) -> Result<()>;

    /// Delete a comment. Missing ids are not an error.
    async fn delete_comment(&self, id: &CommentId) -> Result<()>;
}

/// In-memory storage for testing
#[cfg(test)]
pub mod memory {
    use super::*;
    use crate::comment::model::Creator;
    use crate::comment::table::CommentTable;
    use crate::page::{Page, PageService};
    use crate::types::UserId;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// In-memory comment and page storage for testing
    pub struct MemoryStore {
        comments: RwLock<CommentTable>,
        pages: RwLock<HashMap<PageId, Page>>,
        users: RwLock<HashMap<UserId, Creator>>,
    }

    impl MemoryStore {
        /// Create a new in-memory store
        pub fn new() -> Self {
            Self {
                comments: RwLock::new(CommentTable::new()),
                pages: RwLock::new(HashMap::new()),
                users: RwLock::new(HashMap::new()),
            }
        }

        pub fn add_page(&self, page: Page) {
            self.pages.write().unwrap().insert(page.id.clone(), page);
        }

        pub fn add_user(&self, user: Creator) {
            self.users.write().unwrap().insert(user.id.clone(), user);
        }

        /// Insert a comment as-is, bypassing service validation
        pub fn seed_comment(&self, comment: Comment) {
            self.comments.write().unwrap().insert(comment).unwrap();
        }

        pub fn comment_count(&self) -> usize {
            self.comments.read().unwrap().count()
        }
    }

    impl Default for MemoryStore {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CommentRepo for MemoryStore {
        async fn find_by_id(
            &self,
            id: &CommentId,
            options: FindOptions,
        ) -> Result<Option<Comment>> {
            let comments = self.comments.read().unwrap();
            let Some(mut comment) = comments.get(id).cloned() else {
                return Ok(None);
            };

            if options.include_creator {
                let users = self.users.read().unwrap();
                comment.creator = Some(
                    users
                        .get(&comment.creator_id)
                        .cloned()
                        .unwrap_or_else(|| Creator::anonymous(comment.creator_id.clone())),
                );
            }
            Ok(Some(comment))
        }

        async fn find_page_comments(
            &self,
            page_id: &PageId,
            pagination: &PaginationOptions,
        ) -> Result<PaginationResult<Comment>> {
            Ok(self.comments.read().unwrap().paginate_page(page_id, pagination))
        }

        async fn insert_comment(&self, comment: NewComment) -> Result<Comment> {
            let comment = comment.into_comment(Utc::now());
            self.comments.write().unwrap().insert(comment.clone())?;
            Ok(comment)
        }

        async fn update_comment(&self, update: CommentUpdate, id: &CommentId) -> Result<()> {
            self.comments.write().unwrap().update(id, &update)
        }

        async fn delete_comment(&self, id: &CommentId) -> Result<()> {
            self.comments.write().unwrap().delete(id);
            Ok(())
        }
    }

    #[async_trait]
    impl PageService for MemoryStore {
        async fn find_by_id(&self, id: &PageId) -> Result<Option<Page>> {
            Ok(self.pages.read().unwrap().get(id).cloned())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::comment::content::CommentContent;
        use crate::comment::model::CommentType;
        use crate::types::WorkspaceId;

        fn new_comment() -> NewComment {
            NewComment {
                page_id: PageId::from("P1"),
                parent_comment_id: None,
                content: CommentContent::from_value(serde_json::json!({"type": "doc"})),
                selection: None,
                comment_type: CommentType::Inline,
                creator_id: UserId::from("u1"),
                workspace_id: WorkspaceId::from("ws1"),
            }
        }

        #[tokio::test]
        async fn test_memory_store_insert_find() {
            let store = MemoryStore::new();
            let inserted = store.insert_comment(new_comment()).await.unwrap();

            let found = CommentRepo::find_by_id(&store, &inserted.id, FindOptions::default())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(found.id, inserted.id);
            assert!(found.creator.is_none());
        }

        #[tokio::test]
        async fn test_memory_store_creator_fallback() {
            let store = MemoryStore::new();
            let inserted = store.insert_comment(new_comment()).await.unwrap();

            let found = CommentRepo::find_by_id(&store, &inserted.id, FindOptions::with_creator())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(found.creator, Some(Creator::anonymous(UserId::from("u1"))));
        }

        #[tokio::test]
        async fn test_memory_store_delete_missing_ok() {
            let store = MemoryStore::new();
            assert!(store.delete_comment(&CommentId::new()).await.is_ok());
        }
    }
}
