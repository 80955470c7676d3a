//! # Clipnote Core
//!
//! Client-side state for the clipnote video commenting application: the
//! authenticated session and the per-video comment feed, kept behind
//! watch channels so any number of frontends can observe them.
//!
//! ## Overview
//!
//! `clipnote-core` gives a frontend everything between the widgets and the
//! wire:
//!
//! - **Session**: registration, login, logout, and startup recovery of a
//!   persisted session token
//! - **Comment Feed**: paginated fetching with id-based deduplication, an
//!   author allow-list filter, and optimistic submission gated on the
//!   session
//! - **Typed Failures**: server and transport failures classified into
//!   outcome types carrying the exact user-facing message to display
//! - **Service Seams**: the network, persistence, link rewriting, and
//!   notification sinks are traits, with HTTP and filesystem
//!   implementations included
//!
//! ## Architecture
//!
//! - [`session`]: session state, the [`SessionStore`] orchestrator, and
//!   auth outcome types
//! - [`feed`]: feed state, the [`CommentFeedStore`] orchestrator, and the
//!   submission outcome type
//! - [`services`]: collaborator traits plus the production implementations
//! - [`error`]: the error taxonomy shared by both stores
//! - [`testing`]: in-memory doubles for driving the stores in tests
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use clipnote_core::config::Config;
//! use clipnote_core::feed::CommentFeedStore;
//! use clipnote_core::model::VideoCode;
//! use clipnote_core::services::{FileCredentialStore, HttpApi, LogNotifier, UrlLinkifier};
//! use clipnote_core::session::SessionStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load();
//!     let api = Arc::new(HttpApi::new(config.server_url.clone()));
//!
//!     let session = SessionStore::new(api.clone(), Arc::new(FileCredentialStore::new()?));
//!     session.recover_session();
//!
//!     let feed = CommentFeedStore::new(
//!         api,
//!         session.subscribe(),
//!         Arc::new(UrlLinkifier::new()),
//!         Arc::new(LogNotifier),
//!     );
//!
//!     feed.fetch_first_page(&VideoCode::new("dQw4w9WgXcQ"), 1).await?;
//!     println!("{} comments", feed.total_comment_count());
//!     Ok(())
//! }
//! ```

// Core exposes its state types publicly; docs tightened before 0.1.0
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod feed;
pub mod services;
pub mod session;
pub mod testing;

pub use clipnote_model as model;

// Intentionally curated re-exports for downstream consumers.
pub use config::Config;
pub use error::{ApiError, FeedError, FeedResult, StorageError};
pub use feed::{CommentFeedStore, FeedState, FeedStateStore, Paging, PostOutcome};
pub use services::{
    AuthApi, CommentApi, CredentialStore, FileCredentialStore, HttpApi, LogNotifier, Notice,
    NoticeLevel, Notify, RewriteLinks, UrlLinkifier,
};
pub use session::{
    AuthFailure, CredentialIssue, LoginOutcome, RegisterOutcome, Session, SessionStateStore,
    SessionStore,
};
