//! wc-core - Core library for wiki-comments
//!
//! This crate provides the business logic for threaded page comments,
//! including the comment service, its storage and page-lookup seams,
//! pagination, content parsing and configuration.

pub mod error;
pub mod types;
pub mod config;
pub mod pagination;
pub mod page;
pub mod comment;

pub use error::{ErrorKind, Result, WcError};
pub use types::*;
