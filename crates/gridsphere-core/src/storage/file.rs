use super::lock::{StorageReadLock, StorageWriteLock};
use super::{KeyValueStore, StorageError, entry_size};
use crate::error::ErrorCode;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

/// Storage backend persisted as one JSON object (`key -> string value`).
///
/// Every call re-reads the file so concurrent `gs` processes see each other's
/// writes; writes hold an exclusive lock on `<file>.lock` and replace the file
/// through a temp-file rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    quota_bytes: Option<u64>,
    lock_timeout: Duration,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);
        Self {
            path,
            lock_path,
            quota_bytes: None,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_quota(mut self, limit: Option<u64>) -> Self {
        self.quota_bytes = limit;
        self
    }

    #[must_use]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry. A missing file is empty; so is one that does not
    /// parse as a string map.
    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    code = %ErrorCode::StorageCorrupt,
                    error = %err,
                    "storage file is corrupt; treating as empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let json = serde_json::to_string_pretty(entries)?;
        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);
        {
            let mut tmp = fs::File::create(&tmp_path)?;
            tmp.write_all(json.as_bytes())?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn check_quota(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let Some(limit) = self.quota_bytes else {
            return Ok(());
        };
        let needed: u64 = entries.iter().map(|(k, v)| entry_size(k, v)).sum();
        if needed > limit {
            return Err(StorageError::QuotaExceeded { needed, limit });
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _lock = StorageReadLock::acquire(&self.lock_path, self.lock_timeout)?;
        let mut entries = self.read_entries()?;
        debug!(key, path = %self.path.display(), "storage read");
        Ok(entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let _lock = StorageWriteLock::acquire(&self.lock_path, self.lock_timeout)?;
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.check_quota(&entries)?;
        self.write_entries(&entries)?;
        debug!(key, bytes = value.len(), path = %self.path.display(), "storage write");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let _lock = StorageWriteLock::acquire(&self.lock_path, self.lock_timeout)?;
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested/local-storage.json"))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        assert_eq!(store.get("comments:a").expect("get"), None);
    }

    #[test]
    fn values_persist_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        store.set("comments:a", "[]").expect("set");
        store.set("comments:b", "[1]").expect("set");

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("comments:a").expect("get").as_deref(), Some("[]"));
        assert_eq!(reopened.get("comments:b").expect("get").as_deref(), Some("[1]"));
    }

    #[test]
    fn remove_deletes_only_that_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        store.set("a", "1").expect("set");
        store.set("b", "2").expect("set");
        store.remove("a").expect("remove");
        store.remove("missing").expect("remove absent");
        assert_eq!(store.get("a").expect("get"), None);
        assert_eq!(store.get("b").expect("get").as_deref(), Some("2"));
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        fs::write(store.path(), "{not json").expect("write garbage");

        assert_eq!(store.get("k").expect("get"), None);
        store.set("k", "v").expect("set over garbage");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v"));
    }

    #[test]
    fn quota_exceeded_leaves_file_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir).with_quota(Some(10));
        store.set("k", "small").expect("fits");
        let err = store.set("k", "much too large value").expect_err("over quota");
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(store.get("k").expect("get").as_deref(), Some("small"));
    }

    #[test]
    fn held_write_lock_times_out_writers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir).with_lock_timeout(Duration::from_millis(20));
        let lock_path = dir.path().join("nested/local-storage.json.lock");
        let _held =
            StorageWriteLock::acquire(&lock_path, Duration::from_millis(50)).expect("hold lock");
        let err = store.set("k", "v").expect_err("lock contention");
        assert!(matches!(err, StorageError::LockTimeout { .. }));
    }
}
