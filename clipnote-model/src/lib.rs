//! Core data model definitions shared across clipnote crates.
#![allow(missing_docs)]

pub mod comment;
pub mod credentials;
pub mod ids;

// Intentionally curated re-exports for downstream consumers.
pub use comment::{Comment, CommentPage, EditComment, NewComment};
pub use credentials::{AuthToken, SavedCredentials};
pub use ids::{CommentId, VideoCode};
