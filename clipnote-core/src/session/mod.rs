//! Session identity and auth orchestration

pub mod outcome;
pub mod state;
pub mod store;

pub use outcome::{
    AuthFailure, CredentialIssue, LoginOutcome, RegisterOutcome, LOGGED_IN_MESSAGE,
};
pub use state::{Session, SessionStateStore};
pub use store::{SessionStore, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH};
