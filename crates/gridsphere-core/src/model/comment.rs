use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author name recorded when a comment is posted without one.
pub const ANONYMOUS: &str = "Anonymous";

/// A reader comment on one article.
///
/// The serialized shape (`id`, `name`, `text`, `date`, all strings) is the
/// local storage format and has no version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub text: String,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub date: String,
}

impl Comment {
    /// Build a comment from raw form input.
    ///
    /// Returns `None` when the body is empty after trimming. A blank author
    /// becomes [`ANONYMOUS`].
    #[must_use]
    pub fn compose(author: &str, body: &str, now: DateTime<Utc>) -> Option<Self> {
        let text = body.trim();
        if text.is_empty() {
            return None;
        }
        let name = match author.trim() {
            "" => ANONYMOUS,
            trimmed => trimmed,
        };
        Some(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            text: text.to_string(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// Parsed creation time, if the stored date is well-formed.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}
