//! Comment and pagination types
//!
//! These mirror the wire shapes of the comment server: individual comments,
//! the paginated envelope returned by list endpoints, and the submission
//! payloads for creating and editing comments.
//!
//! ## Pagination
//!
//! List endpoints return a page envelope with an absolute `next` URL. A
//! client follows `next` until it is absent; `count` is the total number of
//! comments for the queried video, not the page size.
//!
//! ## Example
//!
//! ```
//! use clipnote_model::{NewComment, VideoCode};
//!
//! let new_comment = NewComment {
//!     video_code: VideoCode::new("dQw4w9WgXcQ"),
//!     time: Some(61.5),
//!     text: "nice transition here".to_string(),
//! };
//! ```

use chrono::{DateTime, Utc};

use crate::ids::{CommentId, VideoCode};

/// A single comment as stored in the feed
///
/// Identity is carried by `id`; merging pages deduplicates on it. The body
/// text may differ from what the author typed: it is trimmed and has plain
/// URLs rewritten to anchor markup when the comment enters the feed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    /// Server-assigned identifier, the deduplication key
    pub id: CommentId,
    /// Code of the video this comment belongs to
    #[cfg_attr(feature = "serde", serde(rename = "video"))]
    pub video_code: VideoCode,
    /// Username of the comment author
    pub author: String,
    /// Comment body, canonicalized on entry into the feed
    pub text: String,
    /// Optional offset into the video, in seconds
    #[cfg_attr(feature = "serde", serde(default))]
    pub time: Option<f32>,
    /// Server-side creation timestamp
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of comments as returned by the server
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommentPage {
    /// Comments on this page
    pub results: Vec<Comment>,
    /// Absolute URL of the next page, absent on the last page
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub next: Option<String>,
    /// Total comment count for the queried video
    pub count: u64,
}

/// Payload for submitting a new comment
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewComment {
    /// Code of the video being commented on
    #[cfg_attr(feature = "serde", serde(rename = "video"))]
    pub video_code: VideoCode,
    /// Optional offset into the video, in seconds
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub time: Option<f32>,
    /// Raw comment text as typed by the author
    pub text: String,
}

/// Payload for editing an existing comment
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditComment {
    /// Identifier of the comment being edited
    pub comment_id: CommentId,
    /// Replacement offset into the video, in seconds
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub time: Option<f32>,
    /// Replacement comment text
    pub text: String,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn comment_deserializes_from_wire_shape() {
        let raw = r#"{
            "id": 7,
            "video": "abc123",
            "author": "casey",
            "text": "great point",
            "time": 12.5,
            "created_at": "2024-03-01T10:30:00Z"
        }"#;

        let comment: Comment =
            serde_json::from_str(raw).expect("comment deserializes");
        assert_eq!(comment.id, CommentId::new(7));
        assert_eq!(comment.video_code.as_str(), "abc123");
        assert_eq!(comment.author, "casey");
        assert_eq!(comment.time, Some(12.5));
    }

    #[test]
    fn comment_tolerates_missing_optional_fields() {
        let raw = r#"{
            "id": 8,
            "video": "abc123",
            "author": "casey",
            "text": "no timestamp"
        }"#;

        let comment: Comment =
            serde_json::from_str(raw).expect("comment deserializes");
        assert_eq!(comment.time, None);
        assert_eq!(comment.created_at, None);
    }

    #[test]
    fn page_next_defaults_to_none() {
        let raw = r#"{"results": [], "count": 0}"#;

        let page: CommentPage =
            serde_json::from_str(raw).expect("page deserializes");
        assert!(page.next.is_none());
        assert_eq!(page.count, 0);
    }

    #[test]
    fn new_comment_serializes_video_field() {
        let payload = NewComment {
            video_code: VideoCode::new("abc123"),
            time: None,
            text: "hello".to_string(),
        };

        let json =
            serde_json::to_value(&payload).expect("payload serializes");
        assert_eq!(json["video"], "abc123");
        assert!(json.get("time").is_none());
    }
}
