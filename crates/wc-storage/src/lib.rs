//! wc-storage - Storage library for wiki-comments
//!
//! This crate provides a file-backed store implementing the comment
//! repository and page lookup traits from `wc-core`.

mod file_store;
pub mod migration;

pub use file_store::{FileStore, STORE_FILE};
pub use migration::{StoreFile, StoreMigrator, CURRENT_SCHEMA_VERSION};
