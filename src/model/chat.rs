//! Chat domain: comments, the users who post them, and the records that
//! carry both into the viewer.

use super::identifiers::{CommentId, PlatformId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a record changes the collection it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateVariation {
    /// New entries at the end.
    #[default]
    Append,
    /// Replace an existing entry in place.
    Update,
    /// Remove an existing entry.
    Delete,
}

/// A single live comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Sequence number assigned by the platform.
    pub no: u64,
    /// Author.
    pub user_id: UserId,
    /// Platform the comment was posted on.
    pub platform_id: PlatformId,
    /// Time the comment was posted.
    pub posted_at: DateTime<Utc>,
    /// Comment body. May be empty.
    pub text: String,
}

/// A commenting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Platform the user belongs to.
    pub platform_id: PlatformId,
    /// Display name.
    pub name: String,
    /// Avatar URL, if the platform provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Payload of a [`ChatRecord`], tagged by `"type"` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatPayload {
    /// User metadata.
    User(User),
    /// A comment.
    Comment(Comment),
}

/// One ingestion record, as read from a JSONL line or produced by a live
/// platform.
///
/// ```
/// # use lcv::model::{ChatPayload, ChatRecord, UpdateVariation};
/// let line = r#"{"type":"user","id":"u1","platform_id":"demo","name":"Alice"}"#;
/// let record: ChatRecord = serde_json::from_str(line).unwrap();
/// assert_eq!(record.variation, UpdateVariation::Append);
/// assert!(matches!(record.payload, ChatPayload::User(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Change kind. Absent on the wire means append.
    #[serde(default)]
    pub variation: UpdateVariation,
    /// The user or comment itself.
    #[serde(flatten)]
    pub payload: ChatPayload,
}

impl ChatRecord {
    /// Append record for a user.
    pub fn user(user: User) -> Self {
        Self {
            variation: UpdateVariation::Append,
            payload: ChatPayload::User(user),
        }
    }

    /// Append record for a comment.
    pub fn comment(comment: Comment) -> Self {
        Self {
            variation: UpdateVariation::Append,
            payload: ChatPayload::Comment(comment),
        }
    }

    /// Same record with a different variation.
    pub fn with_variation(mut self, variation: UpdateVariation) -> Self {
        self.variation = variation;
        self
    }
}
