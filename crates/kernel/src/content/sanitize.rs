//! Allow-list HTML sanitization.
//!
//! This is the trust boundary for rendered content. Only the elements and
//! attributes listed here survive; disallowed elements are unwrapped so their
//! text is kept, except `<script>` and `<style>` whose contents are dropped.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use ammonia::{Builder, UrlRelative};
use serde::Serialize;
use tracing::debug;

/// Elements that may appear in sanitized output.
pub const ALLOWED_TAGS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "br",
    "hr",
    "b",
    "strong",
    "i",
    "em",
    "u",
    "s",
    "strike",
    "del",
    "mark",
    "blockquote",
    "pre",
    "code",
    "ol",
    "ul",
    "li",
    "a",
    "img",
    "table",
    "thead",
    "tbody",
    "tfoot",
    "tr",
    "th",
    "td",
    "div",
    "span",
];

/// URI schemes allowed in `href` and `src`.
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Attributes allowed per element. Elements not listed here get none.
pub fn allowed_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href", "title", "target", "rel"],
        "img" => &["src", "alt", "title", "width", "height"],
        "code" | "pre" | "div" | "span" => &["class"],
        _ => &[],
    }
}

static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let tag_attributes: HashMap<&str, HashSet<&str>> = ALLOWED_TAGS
        .iter()
        .map(|tag| (*tag, allowed_attributes(tag)))
        .filter(|(_, attrs)| !attrs.is_empty())
        .map(|(tag, attrs)| (tag, attrs.iter().copied().collect()))
        .collect();

    let mut builder = Builder::new();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .tag_attributes(tag_attributes)
        .generic_attributes(HashSet::new())
        .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
        .url_relative(UrlRelative::Deny)
        // `rel` is author-controlled on links; ammonia refuses to manage it
        // while it is also an allowed attribute.
        .link_rel(None)
        .clean_content_tags(["script", "style"].into_iter().collect())
        .strip_comments(true);
    builder
});

/// HTML that has passed the allow-list.
///
/// Only [`sanitize`] produces values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for SanitizedHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SanitizedHtml> for String {
    fn from(html: SanitizedHtml) -> Self {
        html.0
    }
}

/// Sanitize untrusted HTML against the allow-list.
///
/// Never fails: malformed markup is parsed the way a browser would and
/// re-serialized.
pub fn sanitize(raw_html: &str) -> SanitizedHtml {
    let clean = SANITIZER.clean(raw_html).to_string();
    if clean.len() < raw_html.len() {
        debug!(
            removed_bytes = raw_html.len() - clean.len(),
            "sanitizer removed markup"
        );
    }
    SanitizedHtml(clean)
}
