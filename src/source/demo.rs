//! Demo live platform.
//!
//! Emits synthetic comments from five demo users, a fixed number per poll.
//! A user's metadata record is emitted right before that user's first
//! comment. Output is deterministic apart from the generated ids and the
//! posting time.

use crate::model::{ChatRecord, Comment, CommentId, PlatformId, User, UserId};
use chrono::Utc;

const DEMO_USER_NAMES: [&str; 5] = ["デモ　Ａ", "デモ　Ｂ", "デモ　Ｃ", "デモ　Ｄ", "デモ　Ｅ"];
const DEMO_TEXT: &str = "テストテキストです";
const MAX_REPEATS: u64 = 10;

/// Synthetic live platform.
#[derive(Debug)]
pub struct DemoPlatform {
    rate: u32,
    emitted: u64,
    platform_id: PlatformId,
    users: [Option<UserId>; DEMO_USER_NAMES.len()],
}

impl DemoPlatform {
    /// Create a platform emitting `rate` comments per poll.
    pub fn new(rate: u32) -> Self {
        Self {
            rate,
            emitted: 0,
            platform_id: PlatformId::demo(),
            users: Default::default(),
        }
    }

    /// Comments emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Produce the records for one tick.
    pub fn poll(&mut self) -> Vec<ChatRecord> {
        let mut records = Vec::with_capacity(self.rate as usize);
        for _ in 0..self.rate {
            self.emitted += 1;
            let (user_id, new_user) = self.user_for(self.emitted);
            if let Some(user) = new_user {
                records.push(ChatRecord::user(user));
            }
            records.push(ChatRecord::comment(Comment {
                id: CommentId::generate(),
                no: self.emitted,
                user_id,
                platform_id: self.platform_id.clone(),
                posted_at: Utc::now(),
                text: demo_text(self.emitted),
            }));
        }
        records
    }

    /// Author of the `n`th comment, plus its metadata the first time it
    /// appears.
    fn user_for(&mut self, n: u64) -> (UserId, Option<User>) {
        let slot = ((n * 3) % DEMO_USER_NAMES.len() as u64) as usize;
        if let Some(id) = &self.users[slot] {
            return (id.clone(), None);
        }

        let id = UserId::generate();
        self.users[slot] = Some(id.clone());
        let user = User {
            id: id.clone(),
            platform_id: self.platform_id.clone(),
            name: DEMO_USER_NAMES[slot].to_string(),
            icon_url: None,
        };
        (id, Some(user))
    }
}

/// Body of the `n`th demo comment: the demo text repeated 0 to 9 times.
pub fn demo_text(n: u64) -> String {
    DEMO_TEXT.repeat(((n * 7 + 3) % MAX_REPEATS) as usize)
}
