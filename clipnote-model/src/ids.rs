/// Strongly typed ID for comments
///
/// Server-assigned and stable, so it doubles as the deduplication key when
/// pages of comments are merged into the local feed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CommentId(pub i64);

impl CommentId {
    pub fn new(id: i64) -> Self {
        CommentId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CommentId {
    fn from(id: i64) -> Self {
        CommentId(id)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed code identifying a video
///
/// Videos are external to this client; the code is an opaque string key
/// (for example a YouTube-style watch code) that comments reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VideoCode(pub String);

impl VideoCode {
    pub fn new(code: impl Into<String>) -> Self {
        VideoCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for VideoCode {
    fn from(code: &str) -> Self {
        VideoCode(code.to_string())
    }
}

impl From<String> for VideoCode {
    fn from(code: String) -> Self {
        VideoCode(code)
    }
}

impl std::fmt::Display for VideoCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_id_display_matches_inner() {
        assert_eq!(CommentId::new(42).to_string(), "42");
    }

    #[test]
    fn video_code_reports_empty() {
        assert!(VideoCode::default().is_empty());
        assert!(!VideoCode::new("dQw4w9WgXcQ").is_empty());
    }
}
