//! Insertion-ordered comment collection keyed by comment id.

use crate::model::{Comment, CommentId};
use std::collections::HashMap;

/// Comments in arrival order, with lookup by id.
///
/// The position of a comment is its row index in the layout engine, so
/// positions never change once assigned.
#[derive(Debug, Clone, Default)]
pub struct CommentCollection {
    comments: Vec<Comment>,
    by_id: HashMap<CommentId, usize>,
}

impl CommentCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment. Returns its position, or gives the comment back if
    /// its id is already present.
    pub fn push(&mut self, comment: Comment) -> Result<usize, Comment> {
        if self.by_id.contains_key(&comment.id) {
            return Err(comment);
        }
        let index = self.comments.len();
        self.by_id.insert(comment.id.clone(), index);
        self.comments.push(comment);
        Ok(index)
    }

    /// Comment with the given id.
    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.by_id.get(id).and_then(|&i| self.comments.get(i))
    }

    /// Comment at a position.
    pub fn at(&self, index: usize) -> Option<&Comment> {
        self.comments.get(index)
    }

    /// Position of the comment with the given id.
    pub fn position(&self, id: &CommentId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Number of comments.
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Check if no comment has arrived yet.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Comments in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.comments.iter()
    }

    /// New collection holding the matching comments, in the same order.
    pub fn filter(&self, mut predicate: impl FnMut(&Comment) -> bool) -> CommentCollection {
        let mut filtered = CommentCollection::new();
        for comment in self.comments.iter().filter(|c| predicate(c)) {
            // Ids are unique in self, so push cannot fail.
            let _ = filtered.push(comment.clone());
        }
        filtered
    }

    /// First comment matching the predicate.
    pub fn find(&self, mut predicate: impl FnMut(&Comment) -> bool) -> Option<&Comment> {
        self.comments.iter().find(|c| predicate(c))
    }
}

impl<'a> IntoIterator for &'a CommentCollection {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
