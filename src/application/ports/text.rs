// src/application/ports/text.rs
use crate::application::ApplicationResult;

/// Round-trips rich text through a markdown parser so stored content has a
/// single canonical form.
pub trait MarkdownNormalizer: Send + Sync {
    fn normalize(&self, source: &str) -> ApplicationResult<String>;
}

/// Cleans user-generated text before it is stored.
pub trait ContentSanitizer: Send + Sync {
    fn sanitize(&self, input: &str) -> String;
}
