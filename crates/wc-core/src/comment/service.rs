//! Comment service: validation in front of the comment repository

use super::builder::CommentBuilder;
use super::content::CommentContent;
use super::input::{CreateCommentInput, UpdateCommentInput};
use super::model::{Comment, CommentUpdate, FindOptions};
use super::repo::CommentRepo;
use super::validator::CommentValidator;
use crate::error::{Result, WcError};
use crate::page::{Page, PageService};
use crate::pagination::{PaginationOptions, PaginationResult};
use crate::types::{CommentId, PageId, UserId, WorkspaceId};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Create, read, edit and delete comments on pages
///
/// Holds no state of its own beyond the injected collaborators, so a single
/// instance can serve concurrent requests.
pub struct CommentService {
    comments: Arc<dyn CommentRepo>,
    pages: Arc<dyn PageService>,
    validator: CommentValidator,
}

impl CommentService {
    /// Create a service over a comment repository and a page lookup
    pub fn new(comments: Arc<dyn CommentRepo>, pages: Arc<dyn PageService>) -> Self {
        Self {
            comments,
            pages,
            validator: CommentValidator::new(),
        }
    }

    /// Fetch a comment with its creator populated
    pub async fn find_by_id(&self, comment_id: &CommentId) -> Result<Comment> {
        self.comments
            .find_by_id(comment_id, FindOptions::with_creator())
            .await?
            .ok_or_else(WcError::comment_not_found)
    }

    /// Create a comment, or a reply to a top-level comment
    pub async fn create(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
        input: CreateCommentInput,
    ) -> Result<Comment> {
        let content = CommentContent::parse(&input.content)?;

        self.ensure_page(&input.page_id).await?;

        let mut builder = CommentBuilder::new(
            input.page_id,
            user_id.clone(),
            workspace_id.clone(),
        )
        .content(content);

        if let Some(parent_id) = input.parent_comment_id {
            let parent = self
                .comments
                .find_by_id(&parent_id, FindOptions::default())
                .await?;
            self.validator.validate_parent(parent.as_ref())?;
            builder = builder.reply_to(parent_id);
        }

        if let Some(selection) = input.selection {
            builder = builder.selection(selection);
        }

        let created = self.comments.insert_comment(builder.build()?).await?;
        info!(
            "Created comment {} on page {} by {}",
            created.id, created.page_id, created.creator_id
        );

        self.find_by_id(&created.id).await
    }

    /// List a page's comments
    pub async fn find_by_page_id(
        &self,
        page_id: &PageId,
        pagination: &PaginationOptions,
    ) -> Result<PaginationResult<Comment>> {
        self.ensure_page(page_id).await?;

        let result = self.comments.find_page_comments(page_id, pagination).await?;
        debug!(
            "Page {} comments: {} items (page {})",
            page_id,
            result.items.len(),
            result.meta.page
        );
        Ok(result)
    }

    /// Replace a comment's content and stamp its edit time
    ///
    /// The returned comment is read back after the write.
    pub async fn update(&self, comment_id: &CommentId, input: UpdateCommentInput) -> Result<Comment> {
        let content = CommentContent::parse(&input.content)?;

        self.comments
            .find_by_id(comment_id, FindOptions::default())
            .await?
            .ok_or_else(WcError::comment_not_found)?;

        let update = CommentUpdate {
            content,
            edited_at: Utc::now(),
        };
        self.comments.update_comment(update, comment_id).await?;
        info!("Updated comment {}", comment_id);

        self.find_by_id(comment_id).await
    }

    /// Delete a comment. Reply handling is up to the repository.
    pub async fn remove(&self, comment_id: &CommentId) -> Result<()> {
        self.comments.delete_comment(comment_id).await?;
        info!("Deleted comment {}", comment_id);
        Ok(())
    }

    async fn ensure_page(&self, page_id: &PageId) -> Result<Page> {
        self.pages
            .find_by_id(page_id)
            .await?
            .ok_or_else(WcError::page_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::model::{CommentType, Creator, NewComment};
    use crate::comment::repo::memory::MemoryStore;
    use crate::comment::validator::MAX_SELECTION_LENGTH;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const DOC: &str = r#"{"type":"doc"}"#;

    fn setup() -> (CommentService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store.add_page(Page::new(PageId::from("P1"), "Welcome", WorkspaceId::from("ws1")));
        let service = CommentService::new(store.clone(), store.clone());
        (service, store)
    }

    fn user() -> UserId {
        UserId::from("u1")
    }

    fn workspace() -> WorkspaceId {
        WorkspaceId::from("ws1")
    }

    async fn create_top_level(service: &CommentService) -> Comment {
        service
            .create(&user(), &workspace(), CreateCommentInput::new(PageId::from("P1"), DOC))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_top_level() {
        let (service, _store) = setup();

        let comment = create_top_level(&service).await;

        assert_eq!(comment.comment_type, CommentType::Inline);
        assert_eq!(comment.parent_comment_id, None);
        assert_eq!(comment.content.as_value(), &json!({"type": "doc"}));
        assert_eq!(comment.creator_id, user());
        assert_eq!(comment.workspace_id, workspace());
        assert!(comment.creator.is_some());
        assert!(comment.edited_at.is_none());
    }

    #[tokio::test]
    async fn test_create_populates_known_creator() {
        let (service, store) = setup();
        store.add_user(Creator {
            id: user(),
            name: Some("Ada".to_string()),
            avatar_url: None,
        });

        let comment = create_top_level(&service).await;
        assert_eq!(comment.creator.unwrap().name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_create_truncates_selection() {
        let (service, _store) = setup();
        let selection: String = ('a'..='z').cycle().take(MAX_SELECTION_LENGTH + 17).collect();

        let comment = service
            .create(
                &user(),
                &workspace(),
                CreateCommentInput::new(PageId::from("P1"), DOC).with_selection(selection.clone()),
            )
            .await
            .unwrap();

        let expected: String = selection.chars().take(MAX_SELECTION_LENGTH).collect();
        assert_eq!(comment.selection, Some(expected));
    }

    #[tokio::test]
    async fn test_create_missing_page() {
        let (service, store) = setup();

        let err = service
            .create(&user(), &workspace(), CreateCommentInput::new(PageId::from("nope"), DOC))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "Page not found");
        assert_eq!(store.comment_count(), 0);
    }

    #[tokio::test]
    async fn test_create_malformed_content_checked_first() {
        let (service, store) = setup();

        let err = service
            .create(
                &user(),
                &workspace(),
                CreateCommentInput::new(PageId::from("nope"), "{not json"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedContent);
        assert_eq!(store.comment_count(), 0);
    }

    #[tokio::test]
    async fn test_create_reply() {
        let (service, _store) = setup();
        let parent = create_top_level(&service).await;

        let reply = service
            .create(
                &user(),
                &workspace(),
                CreateCommentInput::new(PageId::from("P1"), DOC).reply_to(parent.id.clone()),
            )
            .await
            .unwrap();

        assert_eq!(reply.parent_comment_id, Some(parent.id));
    }

    #[tokio::test]
    async fn test_create_reply_to_missing_parent() {
        let (service, store) = setup();

        let err = service
            .create(
                &user(),
                &workspace(),
                CreateCommentInput::new(PageId::from("P1"), DOC).reply_to(CommentId::new()),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "Parent comment not found");
        assert_eq!(store.comment_count(), 0);
    }

    #[tokio::test]
    async fn test_create_reply_to_reply_rejected() {
        let (service, store) = setup();

        // C1 replies to C0; replying to C1 must fail
        let c0 = NewComment {
            page_id: PageId::from("P1"),
            parent_comment_id: None,
            content: CommentContent::from_value(json!({"type": "doc"})),
            selection: None,
            comment_type: CommentType::Inline,
            creator_id: user(),
            workspace_id: workspace(),
        }
        .into_comment(Utc::now());
        let mut c1 = c0.clone();
        c1.id = CommentId::new();
        c1.parent_comment_id = Some(c0.id.clone());
        let c1_id = c1.id.clone();
        store.seed_comment(c0);
        store.seed_comment(c1);

        let err = service
            .create(
                &user(),
                &workspace(),
                CreateCommentInput::new(PageId::from("P1"), DOC).reply_to(c1_id),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "You cannot reply to a reply");
        assert_eq!(store.comment_count(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let (service, _store) = setup();
        let created = create_top_level(&service).await;

        let found = service.find_by_id(&created.id).await.unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.creator, Some(Creator::anonymous(user())));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let (service, _store) = setup();
        let err = service.find_by_id(&CommentId::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_find_by_page_id() {
        let (service, _store) = setup();
        for _ in 0..3 {
            create_top_level(&service).await;
        }

        let opts = PaginationOptions::new(1, 2).unwrap();
        let result = service
            .find_by_page_id(&PageId::from("P1"), &opts)
            .await
            .unwrap();

        assert_eq!(result.items.len(), 2);
        assert!(result.meta.has_next_page);
        assert!(!result.meta.has_prev_page);
    }

    #[tokio::test]
    async fn test_find_by_page_id_missing_page() {
        let (service, _store) = setup();
        let err = service
            .find_by_page_id(&PageId::from("nope"), &PaginationOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_update() {
        let (service, _store) = setup();
        let created = create_top_level(&service).await;
        let before = Utc::now();

        let updated = service
            .update(
                &created.id,
                UpdateCommentInput::new(r#"{"type":"doc","content":[{"type":"paragraph"}]}"#),
            )
            .await
            .unwrap();

        assert_eq!(
            updated.content.as_value(),
            &json!({"type": "doc", "content": [{"type": "paragraph"}]})
        );
        let edited_at = updated.edited_at.expect("edited_at set");
        assert!(edited_at >= before);
        assert_eq!(updated.selection, created.selection);
        assert!(updated.creator.is_some());

        let reread = service.find_by_id(&created.id).await.unwrap();
        assert_eq!(reread.content, updated.content);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let (service, _store) = setup();
        let err = service
            .update(&CommentId::new(), UpdateCommentInput::new(DOC))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_malformed() {
        let (service, _store) = setup();
        let created = create_top_level(&service).await;

        let err = service
            .update(&created.id, UpdateCommentInput::new("nope"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedContent);

        let unchanged = service.find_by_id(&created.id).await.unwrap();
        assert!(unchanged.edited_at.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let (service, store) = setup();
        let created = create_top_level(&service).await;

        service.remove(&created.id).await.unwrap();
        assert_eq!(store.comment_count(), 0);

        // Unknown ids are not an error
        service.remove(&CommentId::new()).await.unwrap();
    }
}
