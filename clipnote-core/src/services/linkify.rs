//! URL rewriting for comment text

use regex::Regex;

use crate::services::traits::RewriteLinks;

/// Punctuation stripped from the end of a detected URL
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Rewrites bare `http(s)://` URLs into HTML anchors
///
/// URLs are matched at the start of the text or after whitespace, so a URL
/// already inside an anchor's quotes or tag body is left alone. Running
/// the rewrite twice yields the same output as running it once.
#[derive(Debug, Clone)]
pub struct UrlLinkifier {
    pattern: Regex,
}

impl UrlLinkifier {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(^|\s)(https?://[^\s<]+)").unwrap(),
        }
    }
}

impl Default for UrlLinkifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RewriteLinks for UrlLinkifier {
    fn rewrite(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &regex::Captures| {
                let lead = &caps[1];
                let raw = &caps[2];
                let url = raw.trim_end_matches(TRAILING_PUNCTUATION);
                let rest = &raw[url.len()..];
                format!("{lead}<a href=\"{url}\">{url}</a>{rest}")
            })
            .into_owned()
    }
}
