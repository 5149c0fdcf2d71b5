//! Content module.
//!
//! This module provides the Markdown content pipeline used when articles are
//! created or updated:
//! - ContentValidator: Pre-render checks (emptiness, length, unsafe patterns)
//! - render_markdown: GitHub-flavored Markdown to HTML
//! - FilterPipeline: Text filters applied to rendered HTML
//! - sanitize: Allow-list HTML sanitization
//! - to_plain_text / strip_html: Plain-text views and excerpts
//! - ContentPipeline: Orchestration of the above

mod excerpt;
mod filter;
mod pipeline;
mod render;
mod sanitize;
mod validate;

pub use excerpt::{TRUNCATION_MARKER, strip_html, to_plain_text};
pub use filter::{FilterPipeline, MarkdownFilter, TextFilter};
pub use pipeline::{ContentPipeline, DEFAULT_EXCERPT_LENGTH, PreparedArticle};
pub use render::render_markdown;
pub use sanitize::{
    ALLOWED_TAGS, ALLOWED_URL_SCHEMES, SanitizedHtml, allowed_attributes, sanitize,
};
pub use validate::{ContentValidator, MAX_CONTENT_LENGTH, ValidationVerdict, unsafe_patterns};
