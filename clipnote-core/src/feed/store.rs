//! Comment feed orchestration
//!
//! [`CommentFeedStore`] owns the feed for the currently viewed video:
//! fetching pages, merging them into state, and submitting new comments.
//! It never checks credentials itself; authorization is a read-only view
//! of the session obtained from
//! [`SessionStore::subscribe`](crate::session::SessionStore::subscribe).

use std::sync::Arc;

use clipnote_model::{Comment, CommentId, EditComment, NewComment, VideoCode};
use log::{debug, error};
use tokio::sync::watch;

use crate::error::{FeedError, FeedResult};
use crate::feed::outcome::PostOutcome;
use crate::feed::state::{FeedState, FeedStateStore, Paging};
use crate::services::notify::Notice;
use crate::services::traits::{CommentApi, Notify, RewriteLinks};
use crate::session::state::Session;

/// Owns the comment feed and orchestrates fetches and submissions
#[derive(Debug, Clone)]
pub struct CommentFeedStore {
    state: FeedStateStore,
    api: Arc<dyn CommentApi>,
    session: watch::Receiver<Session>,
    linkify: Arc<dyn RewriteLinks>,
    notifier: Arc<dyn Notify>,
}

impl CommentFeedStore {
    pub fn new(
        api: Arc<dyn CommentApi>,
        session: watch::Receiver<Session>,
        linkify: Arc<dyn RewriteLinks>,
        notifier: Arc<dyn Notify>,
    ) -> Self {
        Self {
            state: FeedStateStore::new(),
            api,
            session,
            linkify,
            notifier,
        }
    }

    /// Comments for one video, respecting the author filter
    pub fn video_comments(&self, video_code: &str) -> Vec<Comment> {
        self.state.with_state(|s| s.video_comments(video_code))
    }

    /// Cursor to the next page, if one exists
    pub fn next_page_url(&self) -> Option<String> {
        self.state.with_state(|s| s.next_page_url().map(str::to_string))
    }

    /// Total comment count reported by the last fetch
    pub fn total_comment_count(&self) -> u64 {
        self.state.with_state(|s| s.total_comment_count())
    }

    /// The author filter as a plain collection
    pub fn authors_to_show(&self) -> Vec<String> {
        self.state.with_state(|s| s.authors_to_show())
    }

    /// Get a snapshot of the current feed
    pub fn current(&self) -> FeedState {
        self.state.current()
    }

    /// Subscribe to feed changes
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Merge one comment into the feed
    ///
    /// The body is canonicalized on the way in: trimmed, then run through
    /// the link rewriter. Comments already in the feed went through the
    /// same transform, so re-merging a duplicate id is harmless.
    pub fn add_comment(&self, mut comment: Comment) {
        comment.text = self.linkify.rewrite(comment.text.trim());
        self.state.insert_comment(comment);
    }

    /// Merge a batch of comments into the feed
    pub fn add_comments(&self, comments: Vec<Comment>) {
        let canonicalized = comments
            .into_iter()
            .map(|mut comment| {
                comment.text = self.linkify.rewrite(comment.text.trim());
                comment
            })
            .collect();
        self.state.insert_comments(canonicalized);
    }

    /// Replace the author filter with lower-cased entries
    ///
    /// `None` leaves the filter untouched.
    pub fn set_authors_to_show(&self, usernames: Option<Vec<String>>) {
        self.state.set_authors_to_show(usernames);
    }

    /// Remove one author from the filter, case-insensitively
    pub fn remove_author_to_show(&self, username: &str) {
        self.state.remove_author_to_show(username);
    }

    /// Empty the author filter, lifting all restrictions
    pub fn clear_author_filter(&self) {
        self.state.clear_author_filter();
    }

    /// Drop all comments, paging, and the author filter when the viewed
    /// video changes
    pub fn reset(&self) {
        self.state.reset();
    }

    /// Fetch one page of a video's comments and merge it
    ///
    /// Comments are merged before the paging envelope is replaced, so a
    /// reader reacting to the paging change already sees the new comments.
    pub async fn fetch_first_page(&self, video_code: &VideoCode, page: u32) -> FeedResult<()> {
        let fetched = self
            .api
            .fetch_comments(video_code.as_str(), page)
            .await
            .map_err(|e| {
                error!("Failed to fetch comments for {}: {}", video_code, e);
                FeedError::from(e)
            })?;

        debug!(
            "Fetched {} of {} comments for {}",
            fetched.results.len(),
            fetched.count,
            video_code
        );

        let paging = Paging::from(&fetched);
        self.add_comments(fetched.results);
        self.state.set_paging(paging);
        Ok(())
    }

    /// Follow the stored next-page cursor and merge the result
    ///
    /// A missing cursor means the feed is complete; that is a no-op, not
    /// an error. Two overlapping calls both read the cursor they started
    /// with; the id merge absorbs the duplicate page.
    pub async fn fetch_next_page(&self) -> FeedResult<()> {
        let Some(url) = self.next_page_url() else {
            return Ok(());
        };

        let fetched = self.api.fetch_comments_page(&url).await.map_err(|e| {
            error!("Failed to fetch comment page {}: {}", url, e);
            FeedError::from(e)
        })?;

        self.state.set_paging(Paging::from(&fetched));
        self.add_comments(fetched.results);
        Ok(())
    }

    /// Submit a new comment
    ///
    /// Blank submissions are ignored outright. Submission requires a
    /// session; without one a notice is emitted and nothing is sent. On
    /// acceptance the server's copy of the comment is merged into the
    /// feed.
    pub async fn post(&self, new_comment: NewComment) -> PostOutcome {
        let trimmed = new_comment.text.trim().to_string();
        if new_comment.video_code.is_empty() || trimmed.is_empty() {
            return PostOutcome::Ignored;
        }

        let authed = self.session.borrow().is_authed();
        if !authed {
            self.notifier
                .notify(Notice::error("You must be logged in to comment"));
            return PostOutcome::AuthRequired;
        }

        let request = NewComment {
            text: trimmed,
            ..new_comment
        };

        match self.api.post_comment(&request).await {
            Ok(comment) => {
                self.add_comment(comment.clone());
                self.notifier.notify(Notice::success("Comment Submitted"));
                PostOutcome::Posted(comment)
            }
            Err(e) => {
                error!("Comment submission failed: {}", e);
                self.notifier
                    .notify(Notice::error("Failed to submit comment"));
                PostOutcome::Failed(e)
            }
        }
    }

    /// Delete a comment the user owns
    pub fn delete(&self, _comment_id: CommentId) -> FeedResult<()> {
        // TODO wire up DELETE comments/<id>/ once the server grows the endpoint
        self.notifier.notify(Notice::error("TODO delete comment"));
        Err(FeedError::Unimplemented("comment deletion"))
    }

    /// Edit a comment the user owns
    pub fn edit(&self, _edit: EditComment) -> FeedResult<()> {
        // TODO wire up PATCH comments/<id>/ once the server grows the endpoint
        self.notifier.notify(Notice::error("TODO edit comment"));
        Err(FeedError::Unimplemented("comment editing"))
    }
}
