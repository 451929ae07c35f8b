//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod chat;
pub mod error;
pub mod identifiers;
pub mod key_action;

// Re-export for convenience
pub use chat::{ChatPayload, ChatRecord, Comment, UpdateVariation, User};
pub use error::{AppError, InputError, ParseError};
pub use identifiers::{
    CommentId, InvalidCommentId, InvalidPlatformId, InvalidUserId, PlatformId, UserId,
};
pub use key_action::KeyAction;
