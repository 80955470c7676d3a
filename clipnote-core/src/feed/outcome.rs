//! Outcomes reported by comment submission

use clipnote_model::Comment;

use crate::error::ApiError;

/// Result of a comment submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    /// Comment accepted by the server and merged into the feed
    Posted(Comment),
    /// Missing video code or blank text; nothing happened
    Ignored,
    /// No session; nothing was sent
    AuthRequired,
    /// The submission failed in transit or on the server
    Failed(ApiError),
}

impl PostOutcome {
    /// Whether the caller should clear its input field
    ///
    /// Only an accepted submission clears the draft; a failed one stays
    /// editable so the user can retry.
    pub fn should_clear_input(&self) -> bool {
        matches!(self, PostOutcome::Posted(_))
    }
}
