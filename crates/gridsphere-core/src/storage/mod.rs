//! Local key-value storage: the browser-local-storage seam.
//!
//! Values are opaque strings. Backends report failures through
//! [`StorageError`]; callers decide whether to surface or swallow them.

pub mod file;
pub mod lock;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::ErrorCode;
use std::path::PathBuf;
use std::time::Duration;

/// Failures raised by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage quota exceeded: need {needed} bytes, limit is {limit}")]
    QuotaExceeded { needed: u64, limit: u64 },
    #[error("storage lock timed out after {waited:?} at {}", path.display())]
    LockTimeout { path: PathBuf, waited: Duration },
}

impl StorageError {
    /// Machine-readable code associated with this storage error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::StorageUnavailable,
            Self::Serialization(_) => ErrorCode::StorageCorrupt,
            Self::QuotaExceeded { .. } => ErrorCode::StorageQuotaExceeded,
            Self::LockTimeout { .. } => ErrorCode::LockContention,
        }
    }
}

/// A string-to-string store with local-storage semantics.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails or exceeds the quota.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Bytes an entry counts against a quota.
pub(crate) fn entry_size(key: &str, value: &str) -> u64 {
    u64::try_from(key.len() + value.len()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_storage_codes() {
        let quota = StorageError::QuotaExceeded {
            needed: 10,
            limit: 5,
        };
        assert_eq!(quota.code(), ErrorCode::StorageQuotaExceeded);
        assert_eq!(
            quota.to_string(),
            "storage quota exceeded: need 10 bytes, limit is 5"
        );

        let io = StorageError::from(std::io::Error::other("disk gone"));
        assert_eq!(io.code(), ErrorCode::StorageUnavailable);

        let timeout = StorageError::LockTimeout {
            path: PathBuf::from("/tmp/x.lock"),
            waited: Duration::from_millis(10),
        };
        assert_eq!(timeout.code(), ErrorCode::LockContention);
        assert!(timeout.code().hint().is_some());
    }

    #[test]
    fn entry_size_counts_key_and_value() {
        assert_eq!(entry_size("ab", "cde"), 5);
    }
}
