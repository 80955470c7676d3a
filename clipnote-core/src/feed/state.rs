//! Comment feed state and its store
//!
//! The feed holds every comment fetched or posted this run, keyed by id.
//! Storage is unordered; presentation decides how to sort. The author
//! filter is an allow-list of lower-cased usernames, empty meaning
//! unrestricted.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use clipnote_model::{Comment, CommentId, CommentPage};
use tokio::sync::watch;

/// Pagination envelope from the most recent fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paging {
    /// Absolute URL of the next page, absent on the last page
    pub next: Option<String>,
    /// Total comment count for the current video
    pub count: u64,
}

impl From<&CommentPage> for Paging {
    fn from(page: &CommentPage) -> Self {
        Self {
            next: page.next.clone(),
            count: page.count,
        }
    }
}

/// Feed contents for the currently viewed video
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    comments: HashMap<CommentId, Comment>,
    paging: Paging,
    authors_to_show: HashSet<String>,
}

impl FeedState {
    /// Comments for one video, respecting the author filter
    ///
    /// No ordering is guaranteed; callers sort for display.
    pub fn video_comments(&self, video_code: &str) -> Vec<Comment> {
        self.comments
            .values()
            .filter(|c| c.video_code.as_str() == video_code)
            .filter(|c| {
                self.authors_to_show.is_empty()
                    || self.authors_to_show.contains(&c.author.to_lowercase())
            })
            .cloned()
            .collect()
    }

    /// Cursor to the next page, if one exists
    pub fn next_page_url(&self) -> Option<&str> {
        self.paging.next.as_deref()
    }

    /// Total comment count reported by the last fetch
    pub fn total_comment_count(&self) -> u64 {
        self.paging.count
    }

    /// The author filter as a plain collection
    pub fn authors_to_show(&self) -> Vec<String> {
        self.authors_to_show.iter().cloned().collect()
    }

    /// Look up one comment by id
    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.get(&id)
    }

    /// Number of comments held locally, across all videos
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Whether any comments are held locally
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Thread-safe feed store using a watch channel
///
/// Mutations go through the primitives below; each one commits a single
/// complete change, so readers never observe a half-applied merge.
#[derive(Clone, Debug)]
pub struct FeedStateStore {
    sender: Arc<watch::Sender<FeedState>>,
    receiver: watch::Receiver<FeedState>,
}

impl FeedStateStore {
    /// Create an empty feed store
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(FeedState::default());
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Get a snapshot of the current state
    pub fn current(&self) -> FeedState {
        self.receiver.borrow().clone()
    }

    /// Access state without cloning
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FeedState) -> R,
    {
        f(&self.receiver.borrow())
    }

    /// Subscribe to feed changes
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.receiver.clone()
    }

    /// Merge one comment, replacing any existing entry with the same id
    pub fn insert_comment(&self, comment: Comment) {
        self.sender.send_modify(|state| {
            state.comments.insert(comment.id, comment);
        });
    }

    /// Merge a batch of comments, deduplicating by id
    ///
    /// Equivalent to inserting each comment in turn; later entries for an
    /// id win.
    pub fn insert_comments(&self, comments: Vec<Comment>) {
        self.sender.send_modify(|state| {
            for comment in comments {
                state.comments.insert(comment.id, comment);
            }
        });
    }

    /// Replace the paging envelope
    pub fn set_paging(&self, paging: Paging) {
        self.sender.send_modify(|state| {
            state.paging = paging;
        });
    }

    /// Replace the author filter with lower-cased entries
    ///
    /// `None` leaves the filter untouched; clearing is its own operation,
    /// [`clear_author_filter`](Self::clear_author_filter).
    pub fn set_authors_to_show(&self, usernames: Option<Vec<String>>) {
        let Some(usernames) = usernames else {
            return;
        };
        self.sender.send_modify(|state| {
            state.authors_to_show = usernames.iter().map(|u| u.to_lowercase()).collect();
        });
    }

    /// Remove one author from the filter
    ///
    /// The name is lower-cased before removal so it matches however the
    /// filter entry was spelled at insertion.
    pub fn remove_author_to_show(&self, username: &str) {
        self.sender.send_modify(|state| {
            state.authors_to_show.remove(&username.to_lowercase());
        });
    }

    /// Empty the author filter, lifting all restrictions
    pub fn clear_author_filter(&self) {
        self.sender.send_modify(|state| {
            state.authors_to_show.clear();
        });
    }

    /// Drop all comments, paging, and the author filter in one commit
    ///
    /// Called when the viewed video changes so feeds never accumulate
    /// across videos and a filter set for one video never hides another
    /// video's comments.
    pub fn reset(&self) {
        self.sender.send_modify(|state| {
            state.comments.clear();
            state.paging = Paging::default();
            state.authors_to_show.clear();
        });
    }
}

impl Default for FeedStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipnote_model::VideoCode;

    fn comment(id: i64, video: &str, author: &str) -> Comment {
        Comment {
            id: CommentId::new(id),
            video_code: VideoCode::new(video),
            author: author.to_string(),
            text: format!("comment {id}"),
            time: None,
            created_at: None,
        }
    }

    #[test]
    fn inserting_same_id_twice_keeps_one_entry() {
        let store = FeedStateStore::new();
        store.insert_comment(comment(1, "v1", "alice"));

        let mut updated = comment(1, "v1", "alice");
        updated.text = "edited".to_string();
        store.insert_comment(updated);

        let state = store.current();
        assert_eq!(state.len(), 1);
        assert_eq!(state.comment(CommentId::new(1)).map(|c| c.text.as_str()), Some("edited"));
    }

    #[test]
    fn batch_insert_deduplicates_against_existing() {
        let store = FeedStateStore::new();
        store.insert_comments(vec![comment(1, "v1", "alice"), comment(2, "v1", "bob")]);
        store.insert_comments(vec![comment(2, "v1", "bob"), comment(3, "v1", "carol")]);

        assert_eq!(store.current().len(), 3);
    }

    #[test]
    fn video_comments_filters_by_video() {
        let store = FeedStateStore::new();
        store.insert_comment(comment(1, "v1", "alice"));
        store.insert_comment(comment(2, "v2", "alice"));

        let state = store.current();
        assert_eq!(state.video_comments("v1").len(), 1);
        assert_eq!(state.video_comments("v1")[0].id, CommentId::new(1));
    }

    #[test]
    fn empty_author_filter_shows_everyone() {
        let store = FeedStateStore::new();
        store.insert_comment(comment(1, "v1", "Alice"));
        store.insert_comment(comment(2, "v1", "Bob"));

        assert_eq!(store.current().video_comments("v1").len(), 2);
    }

    #[test]
    fn author_filter_matches_case_insensitively() {
        let store = FeedStateStore::new();
        store.insert_comment(comment(1, "v1", "Alice"));
        store.insert_comment(comment(2, "v1", "Bob"));
        store.set_authors_to_show(Some(vec!["ALICE".to_string()]));

        let shown = store.current().video_comments("v1");
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].author, "Alice");
    }

    #[test]
    fn setting_no_filter_leaves_existing_filter() {
        let store = FeedStateStore::new();
        store.set_authors_to_show(Some(vec!["alice".to_string()]));
        store.set_authors_to_show(None);

        assert_eq!(store.current().authors_to_show(), vec!["alice".to_string()]);
    }

    #[test]
    fn filter_entries_are_stored_lowercase() {
        let store = FeedStateStore::new();
        store.set_authors_to_show(Some(vec!["A".to_string(), "B".to_string()]));

        let mut authors = store.current().authors_to_show();
        authors.sort();
        assert_eq!(authors, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn remove_author_normalizes_case() {
        let store = FeedStateStore::new();
        store.set_authors_to_show(Some(vec!["Alice".to_string()]));
        store.remove_author_to_show("ALICE");

        assert!(store.current().authors_to_show().is_empty());
    }

    #[test]
    fn clear_author_filter_lifts_restrictions() {
        let store = FeedStateStore::new();
        store.insert_comment(comment(1, "v1", "Alice"));
        store.set_authors_to_show(Some(vec!["bob".to_string()]));
        assert!(store.current().video_comments("v1").is_empty());

        store.clear_author_filter();
        assert_eq!(store.current().video_comments("v1").len(), 1);
    }

    #[test]
    fn reset_drops_comments_paging_and_filter() {
        let store = FeedStateStore::new();
        store.insert_comment(comment(1, "v1", "alice"));
        store.set_paging(Paging {
            next: Some("http://localhost:8000/comments/?video=v1&page=2".to_string()),
            count: 10,
        });
        store.set_authors_to_show(Some(vec!["Alice".to_string()]));

        store.reset();

        let state = store.current();
        assert!(state.is_empty());
        assert_eq!(state.next_page_url(), None);
        assert_eq!(state.total_comment_count(), 0);
        assert!(state.authors_to_show().is_empty());
    }

    #[test]
    fn paging_from_page_copies_cursor_and_count() {
        let page = CommentPage {
            results: vec![],
            next: Some("url2".to_string()),
            count: 5,
        };
        let paging = Paging::from(&page);
        assert_eq!(paging.next.as_deref(), Some("url2"));
        assert_eq!(paging.count, 5);
    }
}
