use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;

use super::SensitiveWordFilter;
use crate::application::ports::text::ContentSanitizer;

/// Allow-list HTML cleaning followed by sensitive-word masking.
pub struct UgcSanitizer {
    html: AmmoniaBuilder<'static>,
    words: SensitiveWordFilter,
}

impl UgcSanitizer {
    pub fn new(words: SensitiveWordFilter) -> Self {
        Self {
            html: comment_builder(),
            words,
        }
    }
}

fn comment_builder() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();
    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "b",
        "blockquote",
        "br",
        "code",
        "em",
        "i",
        "p",
        "pre",
        "strong",
    ]);
    builder.tags(tags);
    builder.link_rel(Some("noopener noreferrer nofollow"));
    builder
}

impl ContentSanitizer for UgcSanitizer {
    fn sanitize(&self, input: &str) -> String {
        let cleaned = self.html.clean(input).to_string();
        self.words.mask_html(&cleaned)
    }
}
