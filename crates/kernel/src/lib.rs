//! Gazette CMS Kernel Library
//!
//! Validation, rendering, and sanitization of author-submitted Markdown.
//! The `gazette` binary exposes the same pipeline on the command line.

pub mod config;
pub mod content;
pub mod error;

pub use config::Config;
pub use content::ContentPipeline;
pub use error::{AppError, AppResult, ContentError, ContentRejected};
