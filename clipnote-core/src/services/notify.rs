//! User-facing notices
//!
//! Stores emit notices through the [`Notify`](crate::services::Notify)
//! trait instead of talking to any particular UI. The default sink writes
//! them to the log.

use crate::services::traits::Notify;

/// Group label for notices raised by the stores themselves
pub const NOTICE_GROUP: &str = "base";

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing message with a severity and a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub group: String,
    pub title: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            group: NOTICE_GROUP.to_string(),
            title: title.into(),
        }
    }

    /// An informational notice
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title)
    }

    /// A success notice
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title)
    }

    /// A warning notice
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title)
    }

    /// An error notice
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title)
    }
}

/// Notice sink that forwards everything to the log
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                log::info!("[{}] {}", notice.group, notice.title)
            }
            NoticeLevel::Warning => log::warn!("[{}] {}", notice.group, notice.title),
            NoticeLevel::Error => log::error!("[{}] {}", notice.group, notice.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_level_and_group() {
        let notice = Notice::error("You must be logged in to comment");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.group, NOTICE_GROUP);
        assert_eq!(notice.title, "You must be logged in to comment");
    }

    #[test]
    fn success_notice() {
        let notice = Notice::success("Comment Submitted");
        assert_eq!(notice.level, NoticeLevel::Success);
    }
}
