//! Content pipeline: validate, render, sanitize.
//!
//! Article create and update handlers call [`ContentPipeline::prepare_article`]
//! (or [`ContentPipeline::process_for_storage`]) and persist the result. A
//! rejection maps to a 400 response through [`AppError`](crate::error::AppError).

use serde::Serialize;
use tracing::{debug, warn};

use super::excerpt::to_plain_text;
use super::filter::FilterPipeline;
use super::sanitize::{SanitizedHtml, sanitize};
use super::validate::{ContentValidator, ValidationVerdict};
use crate::config::Config;
use crate::error::ContentRejected;

/// Default excerpt length, in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

/// What gets stored for an article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedArticle {
    /// Markdown as the author wrote it.
    pub markdown: String,
    pub html: SanitizedHtml,
    pub excerpt: String,
}

/// Stateless Markdown content pipeline.
///
/// Safe to share between threads; calls are independent.
#[derive(Debug)]
pub struct ContentPipeline {
    validator: ContentValidator,
    filters: FilterPipeline,
    excerpt_length: usize,
}

impl ContentPipeline {
    /// Create a pipeline with default limits.
    pub fn new() -> Self {
        Self {
            validator: ContentValidator::new(),
            filters: FilterPipeline::markdown(),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }

    /// Create a pipeline using configured limits.
    pub fn from_config(config: &Config) -> Self {
        Self {
            validator: ContentValidator::with_max_length(config.max_content_length),
            filters: FilterPipeline::markdown(),
            excerpt_length: config.excerpt_length,
        }
    }

    /// Replace the render stage. Sanitization still runs afterwards.
    pub fn with_filters(mut self, filters: FilterPipeline) -> Self {
        self.filters = filters;
        self
    }

    pub fn excerpt_length(&self) -> usize {
        self.excerpt_length
    }

    /// Longest accepted content, in characters.
    pub fn max_content_length(&self) -> usize {
        self.validator.max_length()
    }

    /// Validate raw Markdown without rendering it.
    pub fn validate(&self, content: &str) -> ValidationVerdict {
        self.validator.validate(content)
    }

    /// Render and sanitize without validating.
    ///
    /// For previews and excerpts. Anything being stored goes through
    /// [`process_for_storage`](Self::process_for_storage).
    pub fn render_html(&self, content: &str) -> SanitizedHtml {
        let raw = self.filters.process(content);
        let html = sanitize(&raw);
        debug!(
            input_bytes = content.len(),
            output_bytes = html.as_str().len(),
            "content sanitized"
        );
        html
    }

    /// Validate, then render and sanitize for storage.
    ///
    /// Invalid content is never rendered.
    pub fn process_for_storage(&self, content: &str) -> Result<SanitizedHtml, ContentRejected> {
        let verdict = self.validate(content);
        if !verdict.is_valid() {
            warn!(
                errors = verdict.errors().len(),
                "content rejected before rendering"
            );
            return Err(ContentRejected::new(verdict));
        }
        Ok(self.render_html(content))
    }

    /// Plain-text excerpt of rendered content.
    ///
    /// `None` uses the configured excerpt length.
    pub fn generate_excerpt(&self, content: &str, max_length: Option<usize>) -> String {
        let html = self.render_html(content);
        to_plain_text(
            html.as_str(),
            Some(max_length.unwrap_or(self.excerpt_length)),
        )
    }

    /// Everything an article write persists, from a single render.
    pub fn prepare_article(&self, content: &str) -> Result<PreparedArticle, ContentRejected> {
        let html = self.process_for_storage(content)?;
        let excerpt = to_plain_text(html.as_str(), Some(self.excerpt_length));
        Ok(PreparedArticle {
            markdown: content.to_string(),
            html,
            excerpt,
        })
    }
}

impl Default for ContentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::TextFilter;
    use crate::error::ContentError;

    /// A filter that tries to smuggle markup past the sanitizer.
    struct Injector;

    impl TextFilter for Injector {
        fn name(&self) -> &str {
            "injector"
        }

        fn process(&self, input: &str) -> String {
            format!("{input}<script>alert(1)</script><a href=\"javascript:x\">y</a>")
        }
    }

    #[test]
    fn process_for_storage_renders_valid_content() {
        let html = ContentPipeline::new()
            .process_for_storage("# Title\n\nSome **bold** text")
            .unwrap();
        assert_eq!(
            html.as_str(),
            "<h1>Title</h1>\n<p>Some <strong>bold</strong> text</p>\n"
        );
    }

    #[test]
    fn process_for_storage_rejects_unsafe_content() {
        let err = ContentPipeline::new()
            .process_for_storage("# Title\n\nSome **bold** text with <script>alert(1)</script>")
            .unwrap_err();
        assert!(!err.verdict().is_valid());
        assert!(!err.verdict().errors().is_empty());
        assert!(matches!(
            err.verdict().issues(),
            [ContentError::UnsafeContent { .. }]
        ));
    }

    #[test]
    fn rejection_message_joins_errors() {
        let err = ContentPipeline::new().process_for_storage("  ").unwrap_err();
        assert_eq!(err.to_string(), "content must not be empty");
    }

    #[test]
    fn sanitizer_runs_after_custom_filters() {
        let pipeline =
            ContentPipeline::new().with_filters(FilterPipeline::markdown().add(Injector));
        let html = pipeline.process_for_storage("hello").unwrap();
        assert_eq!(html.as_str(), "<p>hello</p>\n<a>y</a>");
    }

    #[test]
    fn excerpt_uses_default_length() {
        let pipeline = ContentPipeline::new();
        let long = "word ".repeat(100);
        let excerpt = pipeline.generate_excerpt(&long, None);
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.chars().count() <= DEFAULT_EXCERPT_LENGTH + 3);
    }

    #[test]
    fn excerpt_with_explicit_length() {
        let excerpt = ContentPipeline::new().generate_excerpt("# Hello\n\n**world** & co", Some(5));
        assert_eq!(excerpt, "Hello...");
    }

    #[test]
    fn prepare_article_keeps_markdown_and_excerpt() {
        let article = ContentPipeline::new()
            .prepare_article("Fish & *chips*")
            .unwrap();
        assert_eq!(article.markdown, "Fish & *chips*");
        assert_eq!(
            article.html.as_str(),
            "<p>Fish &amp; <em>chips</em></p>\n"
        );
        assert_eq!(article.excerpt, "Fish & chips");
    }

    #[test]
    fn from_config_applies_limits() {
        let config = Config {
            max_content_length: 5,
            excerpt_length: 3,
        };
        let pipeline = ContentPipeline::from_config(&config);
        assert_eq!(pipeline.max_content_length(), 5);
        assert_eq!(pipeline.excerpt_length(), 3);
        assert!(pipeline.process_for_storage("too long").is_err());
        assert_eq!(pipeline.generate_excerpt("abcdef", None), "abc...");
    }

    #[test]
    fn default_limits() {
        let pipeline = ContentPipeline::new();
        assert_eq!(pipeline.max_content_length(), 100_000);
        assert_eq!(pipeline.excerpt_length(), DEFAULT_EXCERPT_LENGTH);
    }

    #[test]
    fn pipeline_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContentPipeline>();
    }
}
