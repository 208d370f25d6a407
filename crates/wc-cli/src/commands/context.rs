//! Shared command context
//!
//! Resolves config, data directory and caller identity from global flags.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wc_core::comment::CommentService;
use wc_core::config::{Config, PROJECT_DIR};
use wc_core::pagination::PaginationOptions;
use wc_core::types::{UserId, WorkspaceId};
use wc_storage::FileStore;

use super::GlobalArgs;

/// Directory under [`PROJECT_DIR`] holding the store
pub const DATA_SUBDIR: &str = "data";

/// Everything a command needs to reach the store
pub struct AppContext {
    pub config: Config,
    data_dir: PathBuf,
    user: Option<String>,
    workspace: Option<String>,
}

impl AppContext {
    /// Build the context from global flags, rooted at the current directory
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let root = std::env::current_dir().context("Failed to read current directory")?;
        Self::load_from(&root, global)
    }

    pub fn load_from(root: &Path, global: &GlobalArgs) -> Result<Self> {
        let config_path = resolve_config_path(root, global);
        let config = Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let data_dir = resolve_data_dir(root, global, &config);
        tracing::debug!("Using data directory {:?}", data_dir);

        let user = global
            .user
            .clone()
            .or_else(|| config.identity.user_id.clone());
        let workspace = global
            .workspace
            .clone()
            .or_else(|| config.identity.workspace_id.clone());

        Ok(Self {
            config,
            data_dir,
            user,
            workspace,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Open the file store
    pub fn open_store(&self) -> Result<Arc<FileStore>> {
        let store = FileStore::open(&self.data_dir)
            .with_context(|| format!("Failed to open store in {}", self.data_dir.display()))?
            .with_pretty(self.config.storage.pretty);
        Ok(Arc::new(store))
    }

    /// Comment service wired to a single store for both collaborators
    pub fn service(&self, store: &Arc<FileStore>) -> CommentService {
        CommentService::new(store.clone(), store.clone())
    }

    /// Acting user, required for writes
    pub fn user_id(&self) -> Result<UserId> {
        match &self.user {
            Some(id) => Ok(UserId::from_string(id.as_str())),
            None => bail!(
                "No user configured. Pass --user, set WIKI_COMMENTS_USER, or set identity.user_id in config"
            ),
        }
    }

    /// Acting workspace, required for writes
    pub fn workspace_id(&self) -> Result<WorkspaceId> {
        match &self.workspace {
            Some(id) => Ok(WorkspaceId::from_string(id.as_str())),
            None => bail!(
                "No workspace configured. Pass --workspace, set WIKI_COMMENTS_WORKSPACE, or set identity.workspace_id in config"
            ),
        }
    }

    /// Pagination options, defaulting the limit from config
    pub fn pagination(&self, page: u32, limit: Option<u32>) -> Result<PaginationOptions> {
        let limit = limit.unwrap_or(self.config.pagination.default_limit);
        Ok(PaginationOptions::new(page, limit)?)
    }
}

fn resolve_config_path(root: &Path, global: &GlobalArgs) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(|| Config::project_path(root))
}

/// `--data-dir`, then `storage.data_dir`, then the project directory, then the platform default
fn resolve_data_dir(root: &Path, global: &GlobalArgs, config: &Config) -> PathBuf {
    if let Some(dir) = &global.data_dir {
        return dir.clone();
    }
    if let Some(dir) = &config.storage.data_dir {
        return if dir.is_absolute() {
            dir.clone()
        } else {
            root.join(dir)
        };
    }
    let project_dir = root.join(PROJECT_DIR);
    if project_dir.is_dir() {
        return project_dir.join(DATA_SUBDIR);
    }
    FileStore::default_dir()
}
