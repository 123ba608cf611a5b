//! Per-article comment threads persisted to local storage.
//!
//! Each article's thread lives under `comments:<articleId>` as a JSON array,
//! newest first. Storage is best effort: read failures and malformed payloads
//! load as an empty thread, write failures are logged and dropped, and the
//! in-memory thread stays authoritative for the session. A thread emptied by
//! deletes drops its key.

use crate::error::ValidationError;
use crate::model::Comment;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Namespace prefix of every comment key.
pub const KEY_PREFIX: &str = "comments:";

/// Storage key holding the thread for `article_id`.
#[must_use]
pub fn storage_key(article_id: &str) -> String {
    format!("{KEY_PREFIX}{article_id}")
}

/// Session view over comment threads, backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct CommentStore<S> {
    storage: S,
    threads: HashMap<String, Vec<Comment>>,
}

impl<S: KeyValueStore> CommentStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            threads: HashMap::new(),
        }
    }

    /// The thread for `article_id`, newest first.
    ///
    /// Storage is consulted only the first time an article is loaded in this
    /// session.
    pub fn load_comments(&mut self, article_id: &str) -> &[Comment] {
        self.thread_mut(article_id)
    }

    /// Post a comment with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyBody`] when `body` is blank; nothing is
    /// recorded in that case.
    pub fn add_comment(
        &mut self,
        article_id: &str,
        author: &str,
        body: &str,
    ) -> Result<Comment, ValidationError> {
        self.add_comment_at(article_id, author, body, Utc::now())
    }

    /// Post a comment stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyBody`] when `body` is blank.
    pub fn add_comment_at(
        &mut self,
        article_id: &str,
        author: &str,
        body: &str,
        now: DateTime<Utc>,
    ) -> Result<Comment, ValidationError> {
        let comment = Comment::compose(author, body, now).ok_or(ValidationError::EmptyBody)?;
        self.thread_mut(article_id).insert(0, comment.clone());
        debug!(article_id, comment_id = %comment.id, "comment added");
        self.persist(article_id);
        Ok(comment)
    }

    /// Remove `comment_id` from the article's thread.
    ///
    /// Returns `false` (and writes nothing) when no such comment exists.
    pub fn delete_comment(&mut self, article_id: &str, comment_id: &str) -> bool {
        let thread = self.thread_mut(article_id);
        let before = thread.len();
        thread.retain(|c| c.id != comment_id);
        if thread.len() == before {
            debug!(article_id, comment_id, "delete of unknown comment ignored");
            return false;
        }
        debug!(article_id, comment_id, "comment deleted");
        self.persist(article_id);
        true
    }

    /// Hand back the storage backend, discarding session state.
    pub fn into_storage(self) -> S {
        self.storage
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn thread_mut(&mut self, article_id: &str) -> &mut Vec<Comment> {
        if !self.threads.contains_key(article_id) {
            let loaded = read_thread(&self.storage, article_id);
            self.threads.insert(article_id.to_string(), loaded);
        }
        self.threads.entry(article_id.to_string()).or_default()
    }

    fn persist(&mut self, article_id: &str) {
        let Some(thread) = self.threads.get(article_id) else {
            return;
        };
        let key = storage_key(article_id);
        let result = if thread.is_empty() {
            self.storage.remove(&key)
        } else {
            serde_json::to_string(thread)
                .map_err(crate::storage::StorageError::from)
                .and_then(|payload| self.storage.set(&key, &payload))
        };
        if let Err(err) = result {
            warn!(
                key = %key,
                code = %err.code(),
                error = %err,
                "failed to persist comments; keeping in-memory copy"
            );
        }
    }
}

fn read_thread<S: KeyValueStore>(storage: &S, article_id: &str) -> Vec<Comment> {
    let key = storage_key(article_id);
    let raw = match storage.get(&key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(key = %key, code = %err.code(), error = %err, "failed to read comments; treating as empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(thread) => thread,
        Err(err) => {
            warn!(key = %key, error = %err, "malformed comment payload; treating as empty");
            Vec::new()
        }
    }
}
