//! Plain-text views of sanitized HTML.

use std::sync::LazyLock;

use regex::Regex;

/// Appended to text cut by [`to_plain_text`].
pub const TRUNCATION_MARKER: &str = "...";

#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex literal"));

#[allow(clippy::expect_used)]
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:nbsp|amp|lt|gt|quot|#39);").expect("valid regex literal")
});

#[allow(clippy::expect_used)]
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex literal"));

/// Remove markup tags. Entities are left as they are.
pub fn strip_html(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| match &caps[0] {
            "&nbsp;" => " ",
            "&amp;" => "&",
            "&lt;" => "<",
            "&gt;" => ">",
            "&quot;" => "\"",
            _ => "'",
        })
        .into_owned()
}

/// Convert HTML to a single line of plain text.
///
/// Tags are removed, a fixed set of entities decoded, and whitespace runs
/// collapsed. With `max_length`, text longer than that many characters is
/// cut, trailing whitespace trimmed, and [`TRUNCATION_MARKER`] appended.
pub fn to_plain_text(html: &str, max_length: Option<usize>) -> String {
    let decoded = decode_entities(&strip_html(html));
    let text = WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string();

    match max_length {
        Some(max) if text.chars().count() > max => {
            let mut cut: String = text.chars().take(max).collect();
            cut.truncate(cut.trim_end().len());
            cut.push_str(TRUNCATION_MARKER);
            cut
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_html_removes_tags_only() {
        assert_eq!(
            strip_html("<p>Fish &amp; <b>chips</b></p>"),
            "Fish &amp; chips"
        );
    }

    #[test]
    fn plain_text_decodes_entities() {
        assert_eq!(
            to_plain_text("<p>a&nbsp;&amp;&lt;b&gt; &quot;c&quot; &#39;d&#39;</p>", None),
            "a &<b> \"c\" 'd'"
        );
    }

    #[test]
    fn decoding_is_single_pass() {
        assert_eq!(to_plain_text("&amp;lt;", None), "&lt;");
    }

    #[test]
    fn unknown_entities_left_alone() {
        assert_eq!(to_plain_text("&copy; 2024", None), "&copy; 2024");
    }

    #[test]
    fn whitespace_collapsed_and_trimmed() {
        assert_eq!(
            to_plain_text("  <h1>Title</h1>\n\n<p>Line one<br>\nLine   two</p>\n", None),
            "Title Line one Line two"
        );
    }

    #[test]
    fn truncates_with_marker() {
        let out = to_plain_text("<p>Hello <b>world</b></p>", Some(5));
        assert_eq!(out, "Hello...");
        assert!(out.chars().count() <= 5 + TRUNCATION_MARKER.len());
    }

    #[test]
    fn truncation_trims_trailing_space_before_marker() {
        assert_eq!(to_plain_text("<p>Hello world</p>", Some(6)), "Hello...");
    }

    #[test]
    fn no_truncation_when_short_enough() {
        assert_eq!(to_plain_text("<p>Hello</p>", Some(5)), "Hello");
        assert_eq!(to_plain_text("<p>Hello</p>", Some(200)), "Hello");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(to_plain_text("<p>äöüäöü</p>", Some(4)), "äöüä...");
    }

    #[test]
    fn zero_length_excerpt() {
        assert_eq!(to_plain_text("<p>Hello</p>", Some(0)), "...");
    }
}
