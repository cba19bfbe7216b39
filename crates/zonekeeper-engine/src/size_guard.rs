//! Character budget for serialized responses.

use std::borrow::Cow;

/// Default response budget in characters
pub const DEFAULT_MAX_CHARS: usize = 25_000;

/// Appended whenever output is cut
pub const TRUNCATION_NOTICE: &str = "\n\n[Response truncated: output exceeded the size limit. \
Narrow the request with pagination (page, per_page), filters (type, name, content, comment, \
proxied, tag), or use summary or sample mode.]";

/// A newline cut may give up at most this share of the budget
const MAX_BACKOFF_RATIO: f64 = 0.2;

/// Truncates oversized text at a clean boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeGuard {
    max_chars: usize,
}

impl Default for SizeGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl SizeGuard {
    /// Guard with the given budget in characters
    #[must_use]
    pub const fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Budget in characters
    #[must_use]
    pub const fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Return `text` unchanged if within budget, otherwise truncated plus notice
    #[must_use]
    pub fn enforce<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let Some((cut, _)) = text.char_indices().nth(self.max_chars) else {
            return Cow::Borrowed(text);
        };

        let hard = &text[..cut];
        let body = match hard.rfind('\n') {
            Some(nl) if self.keeps_enough(hard[..nl].chars().count()) => &hard[..nl],
            _ => hard,
        };

        let mut out = String::with_capacity(body.len() + TRUNCATION_NOTICE.len());
        out.push_str(body);
        out.push_str(TRUNCATION_NOTICE);
        Cow::Owned(out)
    }

    #[allow(clippy::cast_precision_loss)]
    fn keeps_enough(&self, kept_chars: usize) -> bool {
        let shortfall = self.max_chars - kept_chars;
        (shortfall as f64) <= (self.max_chars as f64) * MAX_BACKOFF_RATIO
    }
}
