use super::{KeyValueStore, StorageError, entry_size};
use std::collections::BTreeMap;

/// In-process storage backend, optionally capped at a byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<u64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once keys plus values exceed `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: u64) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota_bytes: Some(limit),
        }
    }

    /// Bytes currently used by all entries.
    #[must_use]
    pub fn used_bytes(&self) -> u64 {
        self.entries.iter().map(|(k, v)| entry_size(k, v)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota_bytes {
            let existing = self.entries.get(key).map_or(0, |v| entry_size(key, v));
            let needed = self.used_bytes() - existing + entry_size(key, value);
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").expect("get"), None);
        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v"));
        store.remove("k").expect("remove");
        store.remove("k").expect("remove absent");
        assert!(store.is_empty());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let mut store = MemoryStore::with_quota(8);
        store.set("k", "1234").expect("fits");
        let err = store.set("k", "123456789").expect_err("too big");
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 8, .. }));
        assert_eq!(store.get("k").expect("get").as_deref(), Some("1234"));
    }

    #[test]
    fn quota_counts_replacement_not_addition() {
        let mut store = MemoryStore::with_quota(6);
        store.set("k", "12345").expect("fits");
        store.set("k", "54321").expect("replacement fits");
        assert_eq!(store.used_bytes(), 6);
        assert_eq!(store.len(), 1);
    }
}
