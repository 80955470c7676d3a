//! Session token and persisted credential types
//!
//! The comment server issues an opaque token on login or registration.
//! Clients present it as `Authorization: Token <value>` on authenticated
//! requests and may persist it locally, paired with the username it was
//! issued for, to recover the session on the next launch.

/// Opaque session token issued by the comment server
///
/// The token value never appears in `Debug` output so it cannot leak into
/// logs.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        AuthToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        AuthToken(token)
    }
}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        AuthToken(token.to_string())
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("has_value", &!self.0.is_empty())
            .finish()
    }
}

/// A persisted `{token, username}` pair
///
/// Written after a successful login or registration and read back on the
/// next launch to recover the session without a network round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedCredentials {
    /// Session token issued for `username`
    pub token: AuthToken,
    /// Username the token belongs to
    pub username: String,
}
