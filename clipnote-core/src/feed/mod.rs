//! Comment feed state and orchestration

pub mod outcome;
pub mod state;
pub mod store;

pub use outcome::PostOutcome;
pub use state::{FeedState, FeedStateStore, Paging};
pub use store::CommentFeedStore;
