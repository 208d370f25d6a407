//! Comment system module
//!
//! Handles the comment service, its repository seam, indexing and validation.

pub mod model;
pub mod content;
pub mod input;
pub mod repo;
pub mod service;
pub mod table;
pub mod index;
pub mod validator;
pub mod builder;

pub use model::*;
pub use content::CommentContent;
pub use input::{CreateCommentInput, UpdateCommentInput};
pub use repo::CommentRepo;
pub use service::CommentService;
pub use table::CommentTable;
pub use index::CommentIndex;
pub use validator::{CommentValidator, MAX_SELECTION_LENGTH};
pub use builder::CommentBuilder;
