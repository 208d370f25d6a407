//! Store file format and schema migration

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use wc_core::comment::{CommentTable, Creator};
use wc_core::error::{Result, WcError};
use wc_core::page::Page;
use wc_core::types::{PageId, UserId};

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// On-disk store document with schema version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    /// Schema version for migration
    pub schema_version: String,
    #[serde(default)]
    pub pages: BTreeMap<PageId, Page>,
    /// User directory used to populate comment creators
    #[serde(default)]
    pub users: BTreeMap<UserId, Creator>,
    #[serde(default)]
    pub comments: CommentTable,
    /// Extra fields for forward compatibility
    #[serde(flatten, default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl StoreFile {
    /// Create an empty store document at the current schema version
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            pages: BTreeMap::new(),
            users: BTreeMap::new(),
            comments: CommentTable::new(),
            extra: HashMap::new(),
        }
    }

    /// Parse schema version as (major, minor)
    pub fn parse_version(&self) -> Option<(u32, u32)> {
        let (major, minor) = self.schema_version.split_once('.')?;
        Some((major.parse().ok()?, minor.parse().ok()?))
    }
}

impl Default for StoreFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Store schema migrator
pub struct StoreMigrator;

impl StoreMigrator {
    /// Migrate a store document to the current schema version
    pub fn migrate(mut file: StoreFile) -> Result<StoreFile> {
        let (major, _minor) = file.parse_version().ok_or_else(|| {
            WcError::UnsupportedSchemaVersion(format!(
                "invalid version format '{}'",
                file.schema_version
            ))
        })?;

        let current_major = Self::current_major();
        if major != current_major {
            return Err(WcError::UnsupportedSchemaVersion(format!(
                "{} (expected {}.x)",
                file.schema_version, current_major
            )));
        }

        // Minor versions only add defaulted fields
        file.schema_version = CURRENT_SCHEMA_VERSION.to_string();
        Ok(file)
    }

    /// Check if a file needs migration
    pub fn needs_migration(file: &StoreFile) -> bool {
        file.schema_version != CURRENT_SCHEMA_VERSION
    }

    fn current_major() -> u32 {
        CURRENT_SCHEMA_VERSION
            .split('.')
            .next()
            .and_then(|major| major.parse().ok())
            .unwrap_or(1)
    }
}
