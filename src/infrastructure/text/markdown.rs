use comrak::{Arena, Options, format_commonmark, parse_document};

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::text::MarkdownNormalizer,
};

/// Parses content as GFM and writes it back as CommonMark.
pub struct ComrakNormalizer {
    options: Options<'static>,
}

impl ComrakNormalizer {
    pub fn new() -> Self {
        let mut options = Options::default();
        let ext = &mut options.extension;
        ext.strikethrough = true;
        ext.table = true;
        ext.autolink = true;
        ext.tasklist = true;
        ext.footnotes = true;
        Self { options }
    }
}

impl Default for ComrakNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownNormalizer for ComrakNormalizer {
    fn normalize(&self, source: &str) -> ApplicationResult<String> {
        let arena = Arena::new();
        let root = parse_document(&arena, source, &self.options);

        let mut markdown = String::new();
        format_commonmark(root, &self.options, &mut markdown).map_err(|err| {
            ApplicationError::infrastructure(format!("markdown formatting failed: {err}"))
        })?;
        Ok(markdown)
    }
}
