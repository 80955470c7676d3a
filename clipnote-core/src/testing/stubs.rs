//! In-memory service doubles
//!
//! Each double records the calls it receives and returns whatever response
//! was configured, so tests can drive the stores without a server.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use clipnote_model::{
    AuthToken, Comment, CommentId, CommentPage, NewComment, SavedCredentials, VideoCode,
};

use crate::error::{ApiError, StorageError};
use crate::services::notify::Notice;
use crate::services::traits::{AuthApi, CommentApi, CredentialStore, Notify, RewriteLinks};

/// Auth service double with scripted responses
#[derive(Debug, Clone)]
pub struct TestAuthApi {
    inner: Arc<RwLock<InnerAuthState>>,
}

#[derive(Debug, Default)]
struct InnerAuthState {
    register_response: Option<Result<AuthToken, ApiError>>,
    login_response: Option<Result<AuthToken, ApiError>>,
    logout_response: Option<Result<(), ApiError>>,
    register_calls: usize,
    login_calls: usize,
    logout_calls: usize,
    session_tokens: Vec<Option<AuthToken>>,
}

impl Default for TestAuthApi {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAuthApi {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(InnerAuthState::default())),
        }
    }

    pub fn set_register_response(&self, response: Result<AuthToken, ApiError>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.register_response = Some(response);
        }
    }

    pub fn set_login_response(&self, response: Result<AuthToken, ApiError>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.login_response = Some(response);
        }
    }

    pub fn set_logout_response(&self, response: Result<(), ApiError>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.logout_response = Some(response);
        }
    }

    pub fn register_calls(&self) -> usize {
        self.inner.read().expect("lock poisoned").register_calls
    }

    pub fn login_calls(&self) -> usize {
        self.inner.read().expect("lock poisoned").login_calls
    }

    pub fn logout_calls(&self) -> usize {
        self.inner.read().expect("lock poisoned").logout_calls
    }

    /// Every token installed or cleared, in call order
    pub fn session_tokens(&self) -> Vec<Option<AuthToken>> {
        self.inner
            .read()
            .expect("lock poisoned")
            .session_tokens
            .clone()
    }

    /// The most recently installed token
    pub fn current_token(&self) -> Option<AuthToken> {
        self.inner
            .read()
            .expect("lock poisoned")
            .session_tokens
            .last()
            .cloned()
            .flatten()
    }
}

#[async_trait]
impl AuthApi for TestAuthApi {
    async fn register(
        &self,
        _username: &str,
        _password: &str,
        _password_verify: &str,
    ) -> Result<AuthToken, ApiError> {
        let mut guard = self.inner.write().expect("lock poisoned");
        guard.register_calls += 1;
        guard.register_response.clone().unwrap_or_else(|| {
            Err(ApiError::Network(
                "TestAuthApi::register not configured".to_string(),
            ))
        })
    }

    async fn login(&self, _username: &str, _password: &str) -> Result<AuthToken, ApiError> {
        let mut guard = self.inner.write().expect("lock poisoned");
        guard.login_calls += 1;
        guard.login_response.clone().unwrap_or_else(|| {
            Err(ApiError::Network(
                "TestAuthApi::login not configured".to_string(),
            ))
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let mut guard = self.inner.write().expect("lock poisoned");
        guard.logout_calls += 1;
        guard.logout_response.clone().unwrap_or(Ok(()))
    }

    fn set_session_token(&self, token: Option<AuthToken>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.session_tokens.push(token);
        }
    }
}

/// Comment service double with scripted pages
#[derive(Debug, Clone)]
pub struct TestCommentApi {
    inner: Arc<RwLock<InnerCommentState>>,
}

#[derive(Debug, Default)]
struct InnerCommentState {
    pages: HashMap<(String, u32), Result<CommentPage, ApiError>>,
    pages_by_url: HashMap<String, Result<CommentPage, ApiError>>,
    post_response: Option<Result<Comment, ApiError>>,
    page_fetches: Vec<(String, u32)>,
    url_fetches: Vec<String>,
    posted: Vec<NewComment>,
}

impl Default for TestCommentApi {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCommentApi {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(InnerCommentState::default())),
        }
    }

    pub fn set_page(&self, video: &str, page: u32, response: Result<CommentPage, ApiError>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.pages.insert((video.to_string(), page), response);
        }
    }

    pub fn set_page_url(&self, url: &str, response: Result<CommentPage, ApiError>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.pages_by_url.insert(url.to_string(), response);
        }
    }

    pub fn set_post_response(&self, response: Result<Comment, ApiError>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.post_response = Some(response);
        }
    }

    pub fn page_fetches(&self) -> Vec<(String, u32)> {
        self.inner.read().expect("lock poisoned").page_fetches.clone()
    }

    pub fn url_fetches(&self) -> Vec<String> {
        self.inner.read().expect("lock poisoned").url_fetches.clone()
    }

    /// Every submission request received, in call order
    pub fn posted(&self) -> Vec<NewComment> {
        self.inner.read().expect("lock poisoned").posted.clone()
    }
}

// Responses resolve after a yield so overlapping calls interleave the way
// real network calls do.
#[async_trait]
impl CommentApi for TestCommentApi {
    async fn fetch_comments(&self, video_code: &str, page: u32) -> Result<CommentPage, ApiError> {
        tokio::task::yield_now().await;
        let mut guard = self.inner.write().expect("lock poisoned");
        guard.page_fetches.push((video_code.to_string(), page));
        guard
            .pages
            .get(&(video_code.to_string(), page))
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Network(format!(
                    "TestCommentApi: no page {page} configured for {video_code}"
                )))
            })
    }

    async fn fetch_comments_page(&self, url: &str) -> Result<CommentPage, ApiError> {
        tokio::task::yield_now().await;
        let mut guard = self.inner.write().expect("lock poisoned");
        guard.url_fetches.push(url.to_string());
        guard.pages_by_url.get(url).cloned().unwrap_or_else(|| {
            Err(ApiError::Network(format!(
                "TestCommentApi: no page configured for {url}"
            )))
        })
    }

    async fn post_comment(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        tokio::task::yield_now().await;
        let mut guard = self.inner.write().expect("lock poisoned");
        guard.posted.push(comment.clone());
        guard.post_response.clone().unwrap_or_else(|| {
            Err(ApiError::Network(
                "TestCommentApi::post_comment not configured".to_string(),
            ))
        })
    }
}

/// Credential storage double backed by memory
#[derive(Debug, Clone)]
pub struct TestCredentialStore {
    inner: Arc<RwLock<InnerCredentialState>>,
}

#[derive(Debug, Default)]
struct InnerCredentialState {
    saved: Option<SavedCredentials>,
    fail_reads: bool,
}

impl Default for TestCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCredentialStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(InnerCredentialState::default())),
        }
    }

    /// A store that already holds credentials from a previous run
    pub fn with_saved(credentials: SavedCredentials) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.inner.write() {
            guard.saved = Some(credentials);
        }
        store
    }

    /// A store whose reads always fail
    pub fn failing() -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.inner.write() {
            guard.fail_reads = true;
        }
        store
    }

    /// What is currently persisted, if anything
    pub fn stored(&self) -> Option<SavedCredentials> {
        self.inner.read().expect("lock poisoned").saved.clone()
    }
}

impl CredentialStore for TestCredentialStore {
    fn load(&self) -> Result<Option<SavedCredentials>, StorageError> {
        let guard = self.inner.read().expect("lock poisoned");
        if guard.fail_reads {
            return Err(StorageError::CorruptedData);
        }
        Ok(guard.saved.clone())
    }

    fn save(&self, credentials: &SavedCredentials) -> Result<(), StorageError> {
        let mut guard = self.inner.write().expect("lock poisoned");
        guard.saved = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.inner.write().expect("lock poisoned");
        guard.saved = None;
        Ok(())
    }
}

/// Link rewriter that passes text through unchanged
#[derive(Debug, Default, Clone)]
pub struct TestLinkifier;

impl RewriteLinks for TestLinkifier {
    fn rewrite(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Notice sink that records everything it receives
#[derive(Debug, Default, Clone)]
pub struct TestNotifier {
    inner: Arc<RwLock<Vec<Notice>>>,
}

impl TestNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.inner.read().expect("lock poisoned").clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.inner
            .read()
            .expect("lock poisoned")
            .iter()
            .map(|notice| notice.title.clone())
            .collect()
    }
}

impl Notify for TestNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut guard) = self.inner.write() {
            guard.push(notice);
        }
    }
}

/// A comment with the given identity and defaults elsewhere
pub fn sample_comment(id: i64, video: &str, author: &str, text: &str) -> Comment {
    Comment {
        id: CommentId::new(id),
        video_code: VideoCode::new(video),
        author: author.to_string(),
        text: text.to_string(),
        time: None,
        created_at: None,
    }
}

/// A page envelope wrapping the given comments
pub fn sample_page(results: Vec<Comment>, next: Option<&str>, count: u64) -> CommentPage {
    CommentPage {
        results,
        next: next.map(str::to_string),
        count,
    }
}
