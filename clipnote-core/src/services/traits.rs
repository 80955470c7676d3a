//! Service traits the stores depend on
//!
//! Stores hold these behind `Arc<dyn Trait>` so production wiring and test
//! stubs are interchangeable.

use std::fmt::Debug;

use async_trait::async_trait;
use clipnote_model::{AuthToken, Comment, CommentPage, NewComment, SavedCredentials};

use crate::error::{ApiError, StorageError};
use crate::services::notify::Notice;

/// Authentication endpoints
#[async_trait]
pub trait AuthApi: Send + Sync + Debug {
    /// Create an account and return its session token
    ///
    /// The confirmation password travels to the server as-is; matching the
    /// two is server-side validation.
    async fn register(
        &self,
        username: &str,
        password: &str,
        password_verify: &str,
    ) -> Result<AuthToken, ApiError>;

    /// Exchange credentials for a session token
    async fn login(&self, username: &str, password: &str) -> Result<AuthToken, ApiError>;

    /// Invalidate the current session token on the server
    async fn logout(&self) -> Result<(), ApiError>;

    /// Install or clear the token used to authorize later requests
    fn set_session_token(&self, token: Option<AuthToken>);
}

/// Comment feed endpoints
#[async_trait]
pub trait CommentApi: Send + Sync + Debug {
    /// Fetch one page of comments for a video
    async fn fetch_comments(&self, video_code: &str, page: u32) -> Result<CommentPage, ApiError>;

    /// Fetch a subsequent page by its absolute cursor URL
    async fn fetch_comments_page(&self, url: &str) -> Result<CommentPage, ApiError>;

    /// Submit a new comment
    async fn post_comment(&self, comment: &NewComment) -> Result<Comment, ApiError>;
}

/// Persistence for the session between runs
pub trait CredentialStore: Send + Sync + Debug {
    /// Load previously saved credentials, `Ok(None)` when none exist
    fn load(&self) -> Result<Option<SavedCredentials>, StorageError>;

    /// Persist credentials for the next run
    fn save(&self, credentials: &SavedCredentials) -> Result<(), StorageError>;

    /// Remove any saved credentials
    fn clear(&self) -> Result<(), StorageError>;
}

/// Rewrite plain text into renderable markup
pub trait RewriteLinks: Send + Sync + Debug {
    /// Rewrite URLs in `text` into anchor markup
    fn rewrite(&self, text: &str) -> String;
}

/// Sink for user-facing notices
pub trait Notify: Send + Sync + Debug {
    /// Surface a notice to the user
    fn notify(&self, notice: Notice);
}
