//! Collaborator services behind the stores

pub mod credentials;
pub mod http;
pub mod linkify;
pub mod notify;
pub mod traits;

pub use credentials::FileCredentialStore;
pub use http::HttpApi;
pub use linkify::UrlLinkifier;
pub use notify::{LogNotifier, Notice, NoticeLevel, NOTICE_GROUP};
pub use traits::{AuthApi, CommentApi, CredentialStore, Notify, RewriteLinks};
