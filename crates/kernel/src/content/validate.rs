//! Pre-render validation of author-submitted Markdown.
//!
//! The pattern check runs against the raw Markdown, not the rendered HTML.
//! It is an early, advisory filter: it can flag a harmless code sample that
//! mentions `javascript:` and it can miss markup the renderer produces. The
//! allow-list in [`super::sanitize`] is the actual trust boundary.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::ContentError;

/// Maximum accepted content length, in characters.
pub const MAX_CONTENT_LENGTH: usize = 100_000;

/// Named dangerous patterns, matched case-insensitively.
#[allow(clippy::expect_used)]
static UNSAFE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("script block", r"(?is)<script\b[^>]*>.*?</script\s*>"),
        ("javascript: URI", r"(?i)javascript:"),
        ("event handler attribute", r"(?i)\bon[a-z]+\s*="),
        ("iframe tag", r"(?i)<iframe\b"),
        ("object tag", r"(?i)<object\b"),
        ("embed tag", r"(?i)<embed\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid regex literal")))
    .collect()
});

/// Outcome of validating a piece of content.
///
/// `errors` is empty exactly when `is_valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    is_valid: bool,
    errors: Vec<String>,
    #[serde(skip)]
    issues: Vec<ContentError>,
}

impl ValidationVerdict {
    /// A passing verdict.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            issues: Vec::new(),
        }
    }

    fn from_issues(issues: Vec<ContentError>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            errors: issues.iter().map(ToString::to_string).collect(),
            issues,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Human-readable reasons, in the order they were found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Typed reasons, parallel to [`errors`](Self::errors).
    pub fn issues(&self) -> &[ContentError] {
        &self.issues
    }
}

/// Checks raw Markdown before it is rendered or stored.
#[derive(Debug, Clone, Copy)]
pub struct ContentValidator {
    max_length: usize,
}

impl ContentValidator {
    /// Create a validator with the default length ceiling.
    pub fn new() -> Self {
        Self {
            max_length: MAX_CONTENT_LENGTH,
        }
    }

    /// Create a validator with a custom length ceiling.
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Validate content.
    ///
    /// Emptiness and length failures short-circuit. Every unsafe pattern that
    /// matches is reported together as one `UnsafeContent` error.
    pub fn validate(&self, content: &str) -> ValidationVerdict {
        if content.trim().is_empty() {
            debug!(kind = "empty", "content failed validation");
            return ValidationVerdict::from_issues(vec![ContentError::EmptyContent]);
        }

        let actual = content.chars().count();
        if actual > self.max_length {
            debug!(
                kind = "too_large",
                actual,
                max = self.max_length,
                "content failed validation"
            );
            return ValidationVerdict::from_issues(vec![ContentError::ContentTooLarge {
                max: self.max_length,
                actual,
            }]);
        }

        let patterns = unsafe_patterns(content);
        if !patterns.is_empty() {
            debug!(kind = "unsafe", ?patterns, "content failed validation");
            return ValidationVerdict::from_issues(vec![ContentError::UnsafeContent { patterns }]);
        }

        ValidationVerdict::valid()
    }
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of every dangerous pattern found in `content`.
pub fn unsafe_patterns(content: &str) -> Vec<&'static str> {
    UNSAFE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(content))
        .map(|(name, _)| *name)
        .collect()
}
