//! Test doubles and fixtures
//!
//! Compiled into the library so integration tests and downstream crates
//! can drive the stores without a running server.

pub mod stubs;

pub use stubs::{
    sample_comment, sample_page, TestAuthApi, TestCommentApi, TestCredentialStore, TestLinkifier,
    TestNotifier,
};

/// Initialize logging for a test, once per process
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
