//! Session state and its store
//!
//! The session is a two-state machine: anonymous or authenticated. Token
//! and username always travel together; there is no state carrying one
//! without the other.

use std::sync::Arc;

use clipnote_model::AuthToken;
use tokio::sync::watch;

/// Current session identity
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// No authenticated user
    Anonymous,

    /// User holds a session token issued by the server
    Authenticated {
        token: AuthToken,
        username: String,
    },
}

impl Session {
    /// Check if the session carries a token
    pub fn is_authed(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Get the current username if authenticated
    pub fn username(&self) -> Option<&str> {
        match self {
            Session::Authenticated { username, .. } => Some(username),
            Session::Anonymous => None,
        }
    }

    /// Get the current token if authenticated
    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }
}

/// Thread-safe session store using a watch channel
///
/// Reads are lock-free snapshots; writers go through the commit methods so
/// the session is only ever replaced wholesale.
#[derive(Clone, Debug)]
pub struct SessionStateStore {
    sender: Arc<watch::Sender<Session>>,
    receiver: watch::Receiver<Session>,
}

impl SessionStateStore {
    /// Create a new store in the anonymous state
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(Session::Anonymous);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Get the current session
    pub fn current(&self) -> Session {
        self.receiver.borrow().clone()
    }

    /// Check authentication without cloning
    pub fn is_authed(&self) -> bool {
        self.receiver.borrow().is_authed()
    }

    /// Get the current username, if any
    pub fn username(&self) -> Option<String> {
        self.receiver.borrow().username().map(str::to_string)
    }

    /// Access state without cloning
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        f(&self.receiver.borrow())
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.receiver.clone()
    }

    /// Replace the session wholesale
    pub fn set(&self, session: Session) {
        // Ignore send errors (no receivers)
        let _ = self.sender.send(session);
    }

    /// Commit an authenticated session
    ///
    /// An empty token can only come out of corrupted recovery data; it
    /// commits as anonymous so `is_authed` stays equivalent to token
    /// presence.
    pub fn authenticate(&self, token: AuthToken, username: String) {
        if token.is_empty() {
            self.set(Session::Anonymous);
        } else {
            self.set(Session::Authenticated { token, username });
        }
    }

    /// Clear the session
    pub fn clear(&self) {
        self.set(Session::Anonymous);
    }
}

impl Default for SessionStateStore {
    fn default() -> Self {
        Self::new()
    }
}
