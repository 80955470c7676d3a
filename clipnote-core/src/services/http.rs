//! HTTP implementation of the auth and comment APIs
//!
//! Talks to the clipnote server's REST endpoints. The client holds the
//! session token in a slot that [`SessionStore`](crate::session::SessionStore)
//! keeps in sync with the session state, so authorized requests pick it up
//! automatically.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use clipnote_model::{AuthToken, Comment, CommentPage, NewComment};
use log::debug;
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::services::traits::{AuthApi, CommentApi};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    password_verify: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// HTTP client for the clipnote REST API
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: RwLock<Option<AuthToken>>,
}

impl HttpApi {
    /// Create a client for the given server
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    /// Resolve a path against the base URL
    ///
    /// Absolute URLs pass through untouched so pagination cursors from the
    /// server can be followed directly.
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }

    /// Attach the session token header when one is installed
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().as_ref() {
            Some(token) => builder.header("Authorization", format!("Token {}", token.as_str())),
            None => builder,
        }
    }

    /// Parse a success body, or classify the failure status
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    async fn status_error(status: StatusCode, response: Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        ApiError::Status {
            status: status.as_u16(),
            message: extract_message(&body),
        }
    }
}

/// Pull a human-readable message out of an error body
///
/// The server reports failures as a bare JSON string or as an object with
/// a `detail` field. Anything else is passed through as raw text.
fn extract_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(s) = value.as_str() {
            return Some(s.to_string());
        }
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return Some(detail.to_string());
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpApi")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.read().is_some())
            .finish()
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn register(
        &self,
        username: &str,
        password: &str,
        password_verify: &str,
    ) -> Result<AuthToken, ApiError> {
        let url = self.build_url("users/");
        debug!("[HttpApi] POST {} (register)", url);

        let response = self
            .client
            .post(&url)
            .json(&RegisterRequest {
                username,
                password,
                password_verify,
            })
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let body: TokenResponse = Self::read_json(response).await?;
        Ok(AuthToken::new(body.token))
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthToken, ApiError> {
        let url = self.build_url("api-token-auth/");
        debug!("[HttpApi] POST {} (login)", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let body: TokenResponse = Self::read_json(response).await?;
        Ok(AuthToken::new(body.token))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.build_url("logout/");
        debug!("[HttpApi] POST {} (logout)", url);

        let response = self
            .authorized(self.client.post(&url))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    fn set_session_token(&self, token: Option<AuthToken>) {
        *self.token.write() = token;
    }
}

#[async_trait]
impl CommentApi for HttpApi {
    async fn fetch_comments(&self, video_code: &str, page: u32) -> Result<CommentPage, ApiError> {
        let url = self.build_url(&format!("comments/?video={video_code}&page={page}"));
        debug!("[HttpApi] GET {}", url);

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::read_json(response).await
    }

    async fn fetch_comments_page(&self, url: &str) -> Result<CommentPage, ApiError> {
        let url = self.build_url(url);
        debug!("[HttpApi] GET {} (page)", url);

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::read_json(response).await
    }

    async fn post_comment(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        let url = self.build_url("comments/");
        debug!("[HttpApi] POST {} (comment)", url);

        let response = self
            .authorized(self.client.post(&url).json(comment))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_relative_paths() {
        let api = HttpApi::new("http://localhost:8000");
        assert_eq!(
            api.build_url("comments/?video=abc&page=1"),
            "http://localhost:8000/comments/?video=abc&page=1"
        );
    }

    #[test]
    fn build_url_handles_slash_mismatches() {
        let api = HttpApi::new("http://localhost:8000/");
        assert_eq!(api.build_url("/users/"), "http://localhost:8000/users/");
    }

    #[test]
    fn build_url_passes_absolute_urls_through() {
        let api = HttpApi::new("http://localhost:8000");
        let next = "http://localhost:8000/comments/?video=abc&page=2";
        assert_eq!(api.build_url(next), next);
    }

    #[test]
    fn extract_message_unwraps_json_string() {
        assert_eq!(
            extract_message("\"username taken\""),
            Some("username taken".to_string())
        );
    }

    #[test]
    fn extract_message_reads_detail_field() {
        assert_eq!(
            extract_message(r#"{"detail": "Invalid token."}"#),
            Some("Invalid token.".to_string())
        );
    }

    #[test]
    fn extract_message_passes_plain_text_through() {
        assert_eq!(extract_message("  gateway timeout  "), Some("gateway timeout".to_string()));
        assert_eq!(extract_message(""), None);
    }

    #[test]
    fn debug_redacts_token() {
        let api = HttpApi::new("http://localhost:8000");
        api.set_session_token(Some(AuthToken::new("secret")));

        let rendered = format!("{:?}", api);
        assert!(rendered.contains("has_token: true"));
        assert!(!rendered.contains("secret"));
    }
}
