//! File system storage for pages, users and comments

use crate::migration::{StoreFile, StoreMigrator, CURRENT_SCHEMA_VERSION};
use async_trait::async_trait;
use chrono::Utc;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};
use wc_core::comment::{Comment, CommentRepo, CommentUpdate, Creator, FindOptions, NewComment};
use wc_core::error::{Result, WcError};
use wc_core::page::{Page, PageService};
use wc_core::pagination::{PaginationOptions, PaginationResult};
use wc_core::types::{CommentId, PageId, UserId};

/// Name of the store document inside the data directory
pub const STORE_FILE: &str = "store.json";

/// Store backed by a single JSON document
///
/// Every mutation is applied to a copy of the state, written atomically, and
/// only then made visible. Writers are serialized by the state lock.
pub struct FileStore {
    /// Directory holding the store document
    data_dir: PathBuf,
    pretty: bool,
    state: RwLock<StoreFile>,
}

impl FileStore {
    /// Open (or create) a store in `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        Self::ensure_dir(&data_dir)?;

        let path = data_dir.join(STORE_FILE);
        let state = if path.exists() {
            Self::read_store(&path)?
        } else {
            debug!("No store at {:?}, starting empty", path);
            StoreFile::new()
        };

        Ok(Self {
            data_dir,
            pretty: true,
            state: RwLock::new(state),
        })
    }

    /// Platform data directory for the store
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "wiki-comments", "wiki-comments")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".wiki-comments")
            })
    }

    /// Toggle pretty-printed output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Get data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the store document
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    fn temp_path(&self) -> PathBuf {
        self.data_dir.join(format!(".{}.tmp", STORE_FILE))
    }

    fn ensure_dir(dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                WcError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create data directory: {}", e),
                ))
            })?;
            debug!("Created data directory: {:?}", dir);
        }
        Ok(())
    }

    fn read_store(path: &Path) -> Result<StoreFile> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        let store: StoreFile = serde_json::from_reader(reader)
            .map_err(|e| WcError::Serde(e).with_context(format!("Failed to read {:?}", path)))?;

        if StoreMigrator::needs_migration(&store) {
            info!(
                "Migrating store from version {} to {}",
                store.schema_version, CURRENT_SCHEMA_VERSION
            );
            return StoreMigrator::migrate(store);
        }
        Ok(store)
    }

    /// Serialize and write the document off the async runtime
    async fn persist(&self, store: &StoreFile) -> Result<()> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(store)?
        } else {
            serde_json::to_vec(store)?
        };
        let temp_path = self.temp_path();
        let final_path = self.store_path();

        tokio::task::spawn_blocking(move || Self::atomic_write(&temp_path, &final_path, &bytes))
            .await
            .map_err(|e| WcError::Io(std::io::Error::other(e)))?
    }

    /// Write bytes atomically (write to temp, then rename)
    fn atomic_write(temp_path: &Path, final_path: &Path, bytes: &[u8]) -> Result<()> {
        let temp_file = fs::File::create(temp_path).map_err(|e| {
            WcError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        writer.write_all(bytes)?;
        writer.flush()?;

        fs::rename(temp_path, final_path).map_err(|e| {
            let _ = fs::remove_file(temp_path);
            WcError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved store to {:?}", final_path);
        Ok(())
    }

    /// Apply `f` to a copy of the state, persist it, then publish it
    ///
    /// The write lock is held across the file write so writers stay ordered.
    async fn mutate<T>(&self, f: impl FnOnce(&mut StoreFile) -> Result<T>) -> Result<T> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let out = f(&mut next)?;
        self.persist(&next).await?;
        *state = next;
        Ok(out)
    }

    /// Persist the current state, creating the store document if missing
    pub async fn flush(&self) -> Result<()> {
        let state = self.state.read().await;
        self.persist(&state).await
    }

    /// Register a page
    pub async fn insert_page(&self, page: Page) -> Result<()> {
        self.mutate(|store| {
            if store.pages.contains_key(&page.id) {
                return Err(WcError::Duplicate(format!(
                    "Page with ID {} already exists",
                    page.id
                )));
            }
            info!("Added page {}", page.id);
            store.pages.insert(page.id.clone(), page);
            Ok(())
        })
        .await
    }

    /// All pages, oldest first
    pub async fn list_pages(&self) -> Vec<Page> {
        let state = self.state.read().await;
        let mut pages: Vec<_> = state.pages.values().cloned().collect();
        pages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        pages
    }

    /// Number of comments on a page
    pub async fn page_comment_count(&self, page_id: &PageId) -> usize {
        self.state.read().await.comments.page_comment_count(page_id)
    }

    /// Remove a page and every comment on it, returning the comment count removed
    pub async fn delete_page(&self, page_id: &PageId) -> Result<usize> {
        self.mutate(|store| {
            if store.pages.remove(page_id).is_none() {
                return Err(WcError::NotFound(format!("Page not found: {}", page_id)));
            }
            let removed = store.comments.delete_by_page(page_id);
            info!("Deleted page {} and {} comments", page_id, removed);
            Ok(removed)
        })
        .await
    }

    /// Insert or replace a user profile
    pub async fn upsert_user(&self, user: Creator) -> Result<()> {
        self.mutate(|store| {
            store.users.insert(user.id.clone(), user);
            Ok(())
        })
        .await
    }

    /// Look up a user profile
    pub async fn get_user(&self, id: &UserId) -> Option<Creator> {
        self.state.read().await.users.get(id).cloned()
    }
}

#[async_trait]
impl CommentRepo for FileStore {
    async fn find_by_id(&self, id: &CommentId, options: FindOptions) -> Result<Option<Comment>> {
        let state = self.state.read().await;
        let Some(mut comment) = state.comments.get(id).cloned() else {
            return Ok(None);
        };

        if options.include_creator {
            let creator = state
                .users
                .get(&comment.creator_id)
                .cloned()
                .unwrap_or_else(|| Creator::anonymous(comment.creator_id.clone()));
            comment.creator = Some(creator);
        }
        Ok(Some(comment))
    }

    async fn find_page_comments(
        &self,
        page_id: &PageId,
        pagination: &PaginationOptions,
    ) -> Result<PaginationResult<Comment>> {
        let state = self.state.read().await;
        Ok(state.comments.paginate_page(page_id, pagination))
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment> {
        let comment = comment.into_comment(Utc::now());
        self.mutate(|store| store.comments.insert(comment.clone()))
            .await?;
        debug!("Stored comment {}", comment.id);
        Ok(comment)
    }

    async fn update_comment(&self, update: CommentUpdate, id: &CommentId) -> Result<()> {
        self.mutate(|store| store.comments.update(id, &update)).await
    }

    async fn delete_comment(&self, id: &CommentId) -> Result<()> {
        let removed = self
            .mutate(|store| Ok(store.comments.delete(id).len()))
            .await?;
        debug!("Deleted comment {} ({} rows with replies)", id, removed);
        Ok(())
    }
}

#[async_trait]
impl PageService for FileStore {
    async fn find_by_id(&self, id: &PageId) -> Result<Option<Page>> {
        Ok(self.state.read().await.pages.get(id).cloned())
    }
}
