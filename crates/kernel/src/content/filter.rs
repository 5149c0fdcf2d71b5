//! Text filter chain run between Markdown rendering and sanitization.
//!
//! Filters transform untrusted text into untrusted text. Nothing a filter
//! produces is exempt from the allow-list: [`ContentPipeline`] always
//! sanitizes after the chain has run.
//!
//! [`ContentPipeline`]: super::ContentPipeline

use super::render::render_markdown;

/// Trait for text filters in the pipeline.
pub trait TextFilter: Send + Sync {
    /// Filter name for debugging.
    fn name(&self) -> &str;

    /// Process the input text and return filtered output.
    fn process(&self, input: &str) -> String;
}

/// Pipeline of text filters applied in sequence.
pub struct FilterPipeline {
    filters: Vec<Box<dyn TextFilter>>,
}

impl FilterPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add<F: TextFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Create a pipeline that renders Markdown to HTML.
    pub fn markdown() -> Self {
        Self::new().add(MarkdownFilter)
    }

    /// Names of the filters, in the order they run.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Process text through all filters in the pipeline.
    pub fn process(&self, input: &str) -> String {
        self.filters
            .iter()
            .fold(input.to_string(), |acc, filter| filter.process(&acc))
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::markdown()
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("filters", &self.names())
            .finish()
    }
}

/// Filter that renders Markdown to (unsanitized) HTML.
pub struct MarkdownFilter;

impl TextFilter for MarkdownFilter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn process(&self, input: &str) -> String {
        render_markdown(input)
    }
}
