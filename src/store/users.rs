//! User collection keyed by user id.

use crate::model::{User, UserId};
use std::collections::HashMap;

/// Known users. No ordering guarantee.
#[derive(Debug, Clone, Default)]
pub struct UserCollection {
    users: HashMap<UserId, User>,
}

impl UserCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user. Returns true if the id was new.
    pub fn upsert(&mut self, user: User) -> bool {
        self.users.insert(user.id.clone(), user).is_none()
    }

    /// User with the given id.
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if no user is known.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Known user ids.
    pub fn keys(&self) -> impl Iterator<Item = &UserId> {
        self.users.keys()
    }

    /// New collection holding the matching users.
    pub fn filter(&self, mut predicate: impl FnMut(&User) -> bool) -> UserCollection {
        UserCollection {
            users: self
                .users
                .iter()
                .filter(|(_, user)| predicate(user))
                .map(|(id, user)| (id.clone(), user.clone()))
                .collect(),
        }
    }

    /// Some user matching the predicate.
    pub fn find(&self, mut predicate: impl FnMut(&User) -> bool) -> Option<&User> {
        self.users.values().find(|u| predicate(u))
    }
}
