// tests/support/mocks/text.rs
use inkpost_core::application::{ApplicationResult, ports::text::MarkdownNormalizer};

/// Stores content exactly as given.
pub struct PassthroughMarkdown;

impl MarkdownNormalizer for PassthroughMarkdown {
    fn normalize(&self, source: &str) -> ApplicationResult<String> {
        Ok(source.to_string())
    }
}
