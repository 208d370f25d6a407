//! Error types for wiki-comments

use thiserror::Error;

/// Main error type for wiki-comments
#[derive(Debug, Error)]
pub enum WcError {
    /// Requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Caller supplied input that fails a precondition
    #[error("{0}")]
    InvalidInput(String),

    /// Comment content is not a well-formed document
    #[error("Malformed comment content: {0}")]
    MalformedContent(serde_json::Error),

    /// Entity with the same identifier already stored
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error for stored documents
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<WcError>,
    },
}

/// Coarse classification used by transports to pick a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    MalformedContent,
    Internal,
}

impl WcError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        WcError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Classify the error, looking through any added context
    pub fn kind(&self) -> ErrorKind {
        match self {
            WcError::NotFound(_) => ErrorKind::NotFound,
            WcError::InvalidInput(_) => ErrorKind::InvalidInput,
            WcError::MalformedContent(_) => ErrorKind::MalformedContent,
            WcError::WithContext { source, .. } => source.kind(),
            _ => ErrorKind::Internal,
        }
    }

    /// Comment lookup miss
    pub fn comment_not_found() -> Self {
        WcError::NotFound("Comment not found".to_string())
    }

    /// Page lookup miss, surfaced as invalid input
    pub fn page_not_found() -> Self {
        WcError::InvalidInput("Page not found".to_string())
    }
}

impl From<toml::de::Error> for WcError {
    fn from(err: toml::de::Error) -> Self {
        WcError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for WcError {
    fn from(err: toml::ser::Error) -> Self {
        WcError::Toml(err.to_string())
    }
}

/// Result type alias for wiki-comments
pub type Result<T> = std::result::Result<T, WcError>;
