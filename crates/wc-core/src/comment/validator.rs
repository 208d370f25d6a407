//! Comment validation

use super::model::Comment;
use crate::error::{Result, WcError};

/// Maximum stored selection length, in characters
pub const MAX_SELECTION_LENGTH: usize = 250;

/// Validator for comment creation rules
pub struct CommentValidator {
    max_selection_length: usize,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_selection_length: MAX_SELECTION_LENGTH,
        }
    }

    /// Cut a selection down to its first `max_selection_length` characters
    pub fn truncate_selection(&self, selection: &str) -> String {
        match selection.char_indices().nth(self.max_selection_length) {
            Some((byte_idx, _)) => selection[..byte_idx].to_string(),
            None => selection.to_string(),
        }
    }

    /// Check that a looked-up parent exists and is itself top-level
    pub fn validate_parent(&self, parent: Option<&Comment>) -> Result<()> {
        let parent = parent.ok_or_else(|| {
            WcError::InvalidInput("Parent comment not found".to_string())
        })?;

        if !parent.accepts_replies() {
            return Err(WcError::InvalidInput(
                "You cannot reply to a reply".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}
