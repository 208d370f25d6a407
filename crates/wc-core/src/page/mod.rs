//! Pages that own comments
//!
//! The comment service only needs to know whether a page exists, so the
//! page side is a small model plus the [`PageService`] lookup seam.

use crate::error::Result;
use crate::types::{PageId, WorkspaceId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub workspace_id: WorkspaceId,
    pub created_at: DateTime<Utc>,
}

impl Page {
    /// Create a page stamped with the current time
    pub fn new(id: PageId, title: impl Into<String>, workspace_id: WorkspaceId) -> Self {
        Self {
            id,
            title: title.into(),
            workspace_id,
            created_at: Utc::now(),
        }
    }
}

/// Page lookup used for existence checks
#[async_trait]
pub trait PageService: Send + Sync {
    /// Find a page by id
    async fn find_by_id(&self, id: &PageId) -> Result<Option<Page>>;
}
