use serde::Serialize;
use std::fmt;

/// Machine-readable error codes shared by the core and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ContentLoadFailed,
    DuplicateContentId,
    InvalidContentField,
    ArticleNotFound,
    DirectoryItemNotFound,
    EmptyCommentBody,
    StorageUnavailable,
    StorageQuotaExceeded,
    StorageCorrupt,
    LockContention,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::ContentLoadFailed => "E1002",
            Self::DuplicateContentId => "E1003",
            Self::InvalidContentField => "E1004",
            Self::ArticleNotFound => "E2001",
            Self::DirectoryItemNotFound => "E2002",
            Self::EmptyCommentBody => "E2003",
            Self::StorageUnavailable => "E5001",
            Self::StorageQuotaExceeded => "E5002",
            Self::StorageCorrupt => "E5003",
            Self::LockContention => "E5004",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ContentLoadFailed => "Content catalog could not be loaded",
            Self::DuplicateContentId => "Duplicate content id",
            Self::InvalidContentField => "Invalid content field",
            Self::ArticleNotFound => "Article not found",
            Self::DirectoryItemNotFound => "Directory item not found",
            Self::EmptyCommentBody => "Comment body is empty",
            Self::StorageUnavailable => "Local storage unavailable",
            Self::StorageQuotaExceeded => "Local storage quota exceeded",
            Self::StorageCorrupt => "Local storage file is corrupt",
            Self::LockContention => "Lock contention",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .gridsphere/config.toml and retry."),
            Self::ContentLoadFailed => {
                Some("Check the [content] path in .gridsphere/config.toml.")
            }
            Self::DuplicateContentId => Some("Give every article and directory item a unique id."),
            Self::InvalidContentField => {
                Some("Ids must be non-empty and prices finite and non-negative.")
            }
            Self::ArticleNotFound => Some("Go back to the blog with `gs articles`."),
            Self::DirectoryItemNotFound => Some("Go back to the directory with `gs directory`."),
            Self::EmptyCommentBody => Some("Write some text before posting a comment."),
            Self::StorageUnavailable => Some("Check write permissions for the storage file."),
            Self::StorageQuotaExceeded => {
                Some("Delete old comments or raise storage.quota_bytes.")
            }
            Self::StorageCorrupt => Some("Remove the storage file; it is recreated on write."),
            Self::LockContention => Some("Retry after the other `gs` process finishes."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Kind of content a lookup was performed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Article,
    DirectoryItem,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Article => f.write_str("article"),
            Self::DirectoryItem => f.write_str("directory item"),
        }
    }
}

/// An id lookup with no exact match. This is a page state, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind} '{id}' not found")]
pub struct NotFound {
    pub kind: ContentKind,
    pub id: String,
}

impl NotFound {
    #[must_use]
    pub fn article(id: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Article,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn directory_item(id: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::DirectoryItem,
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self.kind {
            ContentKind::Article => ErrorCode::ArticleNotFound,
            ContentKind::DirectoryItem => ErrorCode::DirectoryItemNotFound,
        }
    }
}

/// Rejected comment submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("comment body must not be empty")]
    EmptyBody,
}

impl ValidationError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyBody => ErrorCode::EmptyCommentBody,
        }
    }
}
