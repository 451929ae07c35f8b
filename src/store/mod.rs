//! Chat store: the comments and users the viewer knows about.
//!
//! [`ChatStore`] is an owned value; whoever runs the viewer constructs one and
//! passes it where it is needed. Comments are rows of the layout engine, so
//! only appends are accepted for them.

pub mod comments;
pub mod users;

pub use comments::CommentCollection;
pub use users::UserCollection;

use crate::model::{ChatPayload, ChatRecord, Comment, CommentId, UpdateVariation};
use thiserror::Error;
use tracing::{debug, warn};

/// Which collection a record targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// User metadata.
    User,
    /// Comment rows.
    Comment,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Comment => f.write_str("comment"),
        }
    }
}

/// A record the store refused. Nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The variation cannot be applied to this kind of record.
    #[error("{variation:?} is not supported for {kind} records")]
    UnsupportedVariation {
        /// Requested variation.
        variation: UpdateVariation,
        /// Targeted collection.
        kind: RecordKind,
    },

    /// A comment with the same id was already appended.
    #[error("comment {0} was already received")]
    DuplicateComment(CommentId),
}

/// Effect of an accepted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A user was inserted (`inserted == true`) or replaced.
    User {
        /// True if the user id was new.
        inserted: bool,
    },
    /// A comment was appended at `index`.
    Comment {
        /// Row index of the new comment.
        index: usize,
    },
}

impl Applied {
    /// Check if the record added a row.
    pub fn adds_row(&self) -> bool {
        matches!(self, Self::Comment { .. })
    }
}

/// Comments and users received so far.
#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    comments: CommentCollection,
    users: UserCollection,
}

impl ChatStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Comments in arrival order.
    pub fn comments(&self) -> &CommentCollection {
        &self.comments
    }

    /// Known users.
    pub fn users(&self) -> &UserCollection {
        &self.users
    }

    /// Apply one record.
    ///
    /// - user append/update: upsert
    /// - user delete: rejected, comments keep referring to their author
    /// - comment append: pushed at the end
    /// - comment update/delete: rejected, rows cannot be rewritten
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] for rejected records, leaving the store unchanged.
    pub fn apply(&mut self, record: ChatRecord) -> Result<Applied, StoreError> {
        let variation = record.variation;
        match (record.payload, variation) {
            (ChatPayload::User(user), UpdateVariation::Append | UpdateVariation::Update) => {
                let inserted = self.users.upsert(user);
                Ok(Applied::User { inserted })
            }
            (ChatPayload::Comment(comment), UpdateVariation::Append) => {
                if self.users.get(&comment.user_id).is_none() {
                    debug!(user = %comment.user_id, comment = %comment.id, "comment from unknown user");
                }
                match self.comments.push(comment) {
                    Ok(index) => Ok(Applied::Comment { index }),
                    Err(duplicate) => {
                        warn!(comment = %duplicate.id, "duplicate comment dropped");
                        Err(StoreError::DuplicateComment(duplicate.id))
                    }
                }
            }
            (payload, variation) => {
                let kind = match payload {
                    ChatPayload::User(_) => RecordKind::User,
                    ChatPayload::Comment(_) => RecordKind::Comment,
                };
                warn!(?variation, %kind, "record variation rejected");
                Err(StoreError::UnsupportedVariation { variation, kind })
            }
        }
    }

    /// Name to show for a comment's author. Falls back to the raw user id.
    pub fn author_name<'a>(&'a self, comment: &'a Comment) -> &'a str {
        self.users
            .get(&comment.user_id)
            .map_or(comment.user_id.as_str(), |u| u.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlatformId, User, UserId};
    use chrono::Utc;

    fn user(id: &str, name: &str) -> ChatRecord {
        ChatRecord::user(User {
            id: UserId::new(id).unwrap(),
            platform_id: PlatformId::new("demo").unwrap(),
            name: name.to_string(),
            icon_url: None,
        })
    }

    fn comment(id: &str, user: &str) -> ChatRecord {
        ChatRecord::comment(Comment {
            id: CommentId::new(id).unwrap(),
            no: 1,
            user_id: UserId::new(user).unwrap(),
            platform_id: PlatformId::new("demo").unwrap(),
            posted_at: Utc::now(),
            text: "hi".to_string(),
        })
    }

    #[test]
    fn append_comment_returns_row_index() {
        let mut store = ChatStore::new();
        store.apply(user("u1", "Alice")).unwrap();

        assert_eq!(store.apply(comment("c1", "u1")), Ok(Applied::Comment { index: 0 }));
        assert_eq!(store.apply(comment("c2", "u1")), Ok(Applied::Comment { index: 1 }));
        assert_eq!(store.comments().len(), 2);
    }

    #[test]
    fn user_update_is_upsert() {
        let mut store = ChatStore::new();
        assert_eq!(store.apply(user("u1", "Alice")), Ok(Applied::User { inserted: true }));

        let renamed = user("u1", "Alicia").with_variation(UpdateVariation::Update);
        assert_eq!(store.apply(renamed), Ok(Applied::User { inserted: false }));
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn comment_update_and_delete_are_rejected() {
        let mut store = ChatStore::new();
        store.apply(comment("c1", "u1")).unwrap();

        for variation in [UpdateVariation::Update, UpdateVariation::Delete] {
            let result = store.apply(comment("c1", "u1").with_variation(variation));
            assert_eq!(
                result,
                Err(StoreError::UnsupportedVariation {
                    variation,
                    kind: RecordKind::Comment
                })
            );
        }
        assert_eq!(store.comments().len(), 1);
    }

    #[test]
    fn user_delete_is_rejected() {
        let mut store = ChatStore::new();
        store.apply(user("u1", "Alice")).unwrap();

        let result = store.apply(user("u1", "Alice").with_variation(UpdateVariation::Delete));

        assert!(matches!(
            result,
            Err(StoreError::UnsupportedVariation {
                kind: RecordKind::User,
                ..
            })
        ));
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn duplicate_comment_is_rejected() {
        let mut store = ChatStore::new();
        store.apply(comment("c1", "u1")).unwrap();

        let result = store.apply(comment("c1", "u1"));

        assert_eq!(
            result,
            Err(StoreError::DuplicateComment(CommentId::new("c1").unwrap()))
        );
        assert_eq!(store.comments().len(), 1);
    }

    #[test]
    fn author_name_falls_back_to_user_id() {
        let mut store = ChatStore::new();
        store.apply(user("u1", "Alice")).unwrap();
        store.apply(comment("c1", "u1")).unwrap();
        store.apply(comment("c2", "ghost")).unwrap();

        let names: Vec<_> = store
            .comments()
            .iter()
            .map(|c| store.author_name(c))
            .collect();
        assert_eq!(names, vec!["Alice", "ghost"]);
    }

    #[test]
    fn separate_stores_are_independent() {
        let mut first = ChatStore::new();
        let second = ChatStore::new();
        first.apply(comment("c1", "u1")).unwrap();

        assert_eq!(first.comments().len(), 1);
        assert!(second.comments().is_empty());
    }
}
