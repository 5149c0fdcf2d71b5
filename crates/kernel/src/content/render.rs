//! Markdown to HTML rendering.
//!
//! Output is untrusted: raw HTML in the source passes straight through, and
//! link destinations are not checked. It must go through
//! [`sanitize`](super::sanitize::sanitize) before it leaves the kernel.

use pulldown_cmark::{CowStr, Event, Options, Parser, html};

/// Markdown extensions matching GitHub-flavored Markdown where the output
/// survives the sanitizer allow-list.
fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

/// Render Markdown to HTML.
///
/// Single newlines inside a paragraph become `<br>` rather than being folded
/// into a space.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::SoftBreak => Event::InlineHtml(CowStr::Borrowed("<br>\n")),
        other => other,
    });

    let mut html_output = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut html_output, parser);
    html_output
}
