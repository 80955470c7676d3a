//! Outcomes reported by session operations
//!
//! Each operation returns a value the caller can render however it likes.
//! The message strings live here so every frontend reports failures the
//! same way.

use crate::error::ApiError;

/// Notice title shown after a successful login
pub const LOGGED_IN_MESSAGE: &str = "Logged in";

/// Why a set of credentials was rejected before reaching the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialIssue {
    /// Username or password missing
    MissingFields,
    /// Username exceeds the length limit
    UsernameTooLong,
    /// Password below the minimum length
    PasswordTooShort,
}

impl CredentialIssue {
    /// Short title for the issue
    pub fn title(&self) -> &'static str {
        match self {
            CredentialIssue::MissingFields => "Registration Incomplete",
            CredentialIssue::UsernameTooLong => "Username too long",
            CredentialIssue::PasswordTooShort => "Password too short",
        }
    }

    /// Detailed description for the issue
    pub fn detail(&self) -> &'static str {
        match self {
            CredentialIssue::MissingFields => "Username and password are required",
            CredentialIssue::UsernameTooLong => {
                "Usernames should be 15 or fewer characters."
            }
            CredentialIssue::PasswordTooShort => {
                "Password should be 8 or more characters"
            }
        }
    }
}

/// Server-side failure of a login or registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// The server rejected the credentials
    Rejected(Option<String>),
    /// The server could not be reached
    Unreachable,
    /// Some other transport error
    Offline,
    /// The server answered with an unexpected status
    Unexpected(u16),
}

impl AuthFailure {
    /// Message to show when registration fails this way
    ///
    /// Rejections echo the server's explanation when it sent one, since
    /// registration failures (name taken, banned characters) are
    /// actionable.
    pub fn register_message(&self) -> String {
        match self {
            AuthFailure::Rejected(Some(detail)) => detail.clone(),
            AuthFailure::Rejected(None) => "Invalid username or password".to_string(),
            AuthFailure::Unreachable => "Could not connect to server".to_string(),
            AuthFailure::Offline => "No internet connection".to_string(),
            AuthFailure::Unexpected(_) => "Unexpected server error".to_string(),
        }
    }

    /// Message to show when login fails this way
    pub fn login_message(&self) -> String {
        match self {
            AuthFailure::Rejected(_) => "Wrong username/password".to_string(),
            AuthFailure::Unreachable => "Could not connect to server".to_string(),
            AuthFailure::Offline => "No internet connection".to_string(),
            AuthFailure::Unexpected(_) => "Unexpected server error".to_string(),
        }
    }
}

impl From<ApiError> for AuthFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 400, message } => AuthFailure::Rejected(message),
            ApiError::Status { status, .. } => AuthFailure::Unexpected(status),
            ApiError::Unreachable => AuthFailure::Unreachable,
            ApiError::Network(_) => AuthFailure::Offline,
        }
    }
}

/// Result of a registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Account created and session committed
    Registered,
    /// Credentials rejected locally, no request sent
    Invalid(CredentialIssue),
    /// The server rejected the attempt
    Failed(AuthFailure),
}

impl RegisterOutcome {
    /// Notice to surface after a successful attempt
    ///
    /// Registration commits a session, so it reports the same notice as a
    /// login.
    pub fn success_notice(&self) -> Option<&'static str> {
        match self {
            RegisterOutcome::Registered => Some(LOGGED_IN_MESSAGE),
            RegisterOutcome::Invalid(_) | RegisterOutcome::Failed(_) => None,
        }
    }

    /// Notice to surface for a failed attempt, `(title, detail)`
    pub fn error_notice(&self) -> Option<(&'static str, String)> {
        match self {
            RegisterOutcome::Registered => None,
            RegisterOutcome::Invalid(issue) => {
                Some((issue.title(), issue.detail().to_string()))
            }
            RegisterOutcome::Failed(failure) => {
                Some(("Registration error", failure.register_message()))
            }
        }
    }
}

/// Result of a login attempt
///
/// Login performs no local credential validation; empty or malformed
/// credentials go to the server and come back as a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session committed
    LoggedIn,
    /// The server rejected the attempt
    Failed(AuthFailure),
}

impl LoginOutcome {
    /// Notice to surface after a successful attempt
    pub fn success_notice(&self) -> Option<&'static str> {
        match self {
            LoginOutcome::LoggedIn => Some(LOGGED_IN_MESSAGE),
            LoginOutcome::Failed(_) => None,
        }
    }

    /// Notice to surface for a failed attempt, `(title, detail)`
    pub fn error_notice(&self) -> Option<(&'static str, String)> {
        match self {
            LoginOutcome::LoggedIn => None,
            LoginOutcome::Failed(failure) => {
                Some(("Could not login", failure.login_message()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_registration_uses_server_detail() {
        let failure = AuthFailure::Rejected(Some("username taken".to_string()));
        assert_eq!(failure.register_message(), "username taken");
    }

    #[test]
    fn rejected_registration_without_detail_falls_back() {
        let failure = AuthFailure::Rejected(None);
        assert_eq!(failure.register_message(), "Invalid username or password");
    }

    #[test]
    fn rejected_login_never_echoes_server_detail() {
        let failure = AuthFailure::Rejected(Some("no such user".to_string()));
        assert_eq!(failure.login_message(), "Wrong username/password");
    }

    #[test]
    fn unexpected_status_maps_to_generic_message() {
        let failure = AuthFailure::from(ApiError::Status {
            status: 500,
            message: Some("boom".to_string()),
        });
        assert_eq!(failure, AuthFailure::Unexpected(500));
        assert_eq!(failure.login_message(), "Unexpected server error");
        assert_eq!(failure.register_message(), "Unexpected server error");
    }

    #[test]
    fn transport_errors_classify_by_kind() {
        assert_eq!(
            AuthFailure::from(ApiError::Unreachable),
            AuthFailure::Unreachable
        );
        assert_eq!(
            AuthFailure::from(ApiError::Network("dns".to_string())),
            AuthFailure::Offline
        );
    }

    #[test]
    fn login_notice_pairs_title_with_message() {
        let outcome = LoginOutcome::Failed(AuthFailure::Unreachable);
        assert_eq!(
            outcome.error_notice(),
            Some(("Could not login", "Could not connect to server".to_string()))
        );
        assert_eq!(LoginOutcome::LoggedIn.error_notice(), None);
    }

    #[test]
    fn both_successful_outcomes_report_logged_in() {
        assert_eq!(LoginOutcome::LoggedIn.success_notice(), Some(LOGGED_IN_MESSAGE));
        assert_eq!(
            RegisterOutcome::Registered.success_notice(),
            Some(LOGGED_IN_MESSAGE)
        );
        assert_eq!(
            LoginOutcome::Failed(AuthFailure::Unreachable).success_notice(),
            None
        );
        assert_eq!(
            RegisterOutcome::Invalid(CredentialIssue::MissingFields).success_notice(),
            None
        );
    }

    #[test]
    fn invalid_notice_uses_issue_title() {
        let outcome = RegisterOutcome::Invalid(CredentialIssue::UsernameTooLong);
        assert_eq!(
            outcome.error_notice(),
            Some((
                "Username too long",
                "Usernames should be 15 or fewer characters.".to_string()
            ))
        );
    }
}
