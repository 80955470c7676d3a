//! Session orchestration
//!
//! [`SessionStore`] owns the session lifecycle: recovery at startup,
//! registration, login, and logout. All server traffic goes through the
//! [`AuthApi`] collaborator and all persistence through [`CredentialStore`],
//! so the store itself never touches the network or the filesystem.

use std::sync::Arc;

use clipnote_model::{AuthToken, SavedCredentials};
use log::{debug, info, warn};
use tokio::sync::watch;

use crate::services::traits::{AuthApi, CredentialStore};
use crate::session::outcome::{AuthFailure, CredentialIssue, LoginOutcome, RegisterOutcome};
use crate::session::state::{Session, SessionStateStore};

/// Longest username the server accepts
pub const MAX_USERNAME_LENGTH: usize = 15;

/// Shortest password the server accepts
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Owns the current session and orchestrates auth operations
#[derive(Debug, Clone)]
pub struct SessionStore {
    state: SessionStateStore,
    api: Arc<dyn AuthApi>,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn AuthApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            state: SessionStateStore::new(),
            api,
            credentials,
        }
    }

    /// Get the current username, if authenticated
    pub fn username(&self) -> Option<String> {
        self.state.username()
    }

    /// Check whether a session token is held
    pub fn is_authed(&self) -> bool {
        self.state.is_authed()
    }

    /// Get a snapshot of the current session
    pub fn current(&self) -> Session {
        self.state.current()
    }

    /// Subscribe to session changes
    ///
    /// The receiver is a read-only view; other components use it to gate
    /// their own operations on authentication.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Restore a persisted session at startup
    ///
    /// A load failure leaves the session anonymous; the user can always
    /// log in again.
    pub fn recover_session(&self) {
        match self.credentials.load() {
            Ok(Some(saved)) => {
                info!("Recovered session for {}", saved.username);
                self.api.set_session_token(Some(saved.token.clone()));
                self.state.authenticate(saved.token, saved.username);
            }
            Ok(None) => {
                debug!("No saved session found");
            }
            Err(e) => {
                warn!("Failed to load saved session: {}", e);
            }
        }
    }

    /// Create an account and commit the resulting session
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        password_verify: &str,
    ) -> RegisterOutcome {
        if let Some(issue) = validate_registration(username, password, password_verify) {
            return RegisterOutcome::Invalid(issue);
        }

        match self.api.register(username, password, password_verify).await {
            Ok(token) => {
                info!("Registered new user {}", username);
                self.commit_session(token, username.to_string());
                RegisterOutcome::Registered
            }
            Err(e) => {
                debug!("Registration failed: {}", e);
                RegisterOutcome::Failed(AuthFailure::from(e))
            }
        }
    }

    /// Exchange credentials for a session and commit it
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        match self.api.login(username, password).await {
            Ok(token) => {
                info!("Logged in as {}", username);
                self.commit_session(token, username.to_string());
                LoginOutcome::LoggedIn
            }
            Err(e) => {
                debug!("Login failed: {}", e);
                LoginOutcome::Failed(AuthFailure::from(e))
            }
        }
    }

    /// End the session
    ///
    /// The server call is best-effort; the local session is cleared even
    /// when it fails, so logout never strands the user authenticated.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            warn!("Logout request failed: {}", e);
        }

        self.api.set_session_token(None);
        self.state.clear();

        if let Err(e) = self.credentials.clear() {
            warn!("Failed to clear saved session: {}", e);
        }
    }

    fn commit_session(&self, token: AuthToken, username: String) {
        // Arm the API client before anything reads the new session
        self.api.set_session_token(Some(token.clone()));
        self.state.authenticate(token.clone(), username.clone());

        let saved = SavedCredentials { token, username };
        if let Err(e) = self.credentials.save(&saved) {
            warn!("Failed to save session: {}", e);
        }
    }
}

/// Check registration input before any network call
fn validate_registration(
    username: &str,
    password: &str,
    password_verify: &str,
) -> Option<CredentialIssue> {
    if username.is_empty() || password.is_empty() || password_verify.is_empty() {
        return Some(CredentialIssue::MissingFields);
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Some(CredentialIssue::UsernameTooLong);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(CredentialIssue::PasswordTooShort);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_passes_good_input() {
        assert_eq!(validate_registration("bob", "longenough", "longenough"), None);
    }

    #[test]
    fn validation_requires_all_fields() {
        assert_eq!(
            validate_registration("", "longenough", "longenough"),
            Some(CredentialIssue::MissingFields)
        );
        assert_eq!(
            validate_registration("bob", "", "longenough"),
            Some(CredentialIssue::MissingFields)
        );
        assert_eq!(
            validate_registration("bob", "longenough", ""),
            Some(CredentialIssue::MissingFields)
        );
    }

    #[test]
    fn validation_bounds_username_length() {
        assert_eq!(
            validate_registration("exactly15chars!", "longenough", "longenough"),
            None
        );
        assert_eq!(
            validate_registration("sixteen-chars-xx", "longenough", "longenough"),
            Some(CredentialIssue::UsernameTooLong)
        );
    }

    #[test]
    fn validation_bounds_password_length() {
        assert_eq!(validate_registration("bob", "12345678", "12345678"), None);
        assert_eq!(
            validate_registration("bob", "1234567", "1234567"),
            Some(CredentialIssue::PasswordTooShort)
        );
    }

    #[test]
    fn missing_fields_wins_over_length_checks() {
        // Short password but empty verify field: the emptiness check runs first
        assert_eq!(
            validate_registration("bob", "short", ""),
            Some(CredentialIssue::MissingFields)
        );
    }
}
