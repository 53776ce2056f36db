//! Masking of blocked words in user text.
use aho_corasick::{AhoCorasick, BuildError, MatchKind};
use std::{fs, io, path::Path};
use thiserror::Error;

pub const MASK: char = '*';

#[derive(Debug, Error)]
pub enum SensitiveWordsError {
    #[error("reading word list: {0}")]
    Io(#[from] io::Error),
    #[error("building word matcher: {0}")]
    Build(#[from] BuildError),
}

/// Replaces every occurrence of a blocked word with one [`MASK`] per
/// character. Matching is ASCII case-insensitive and prefers the longest
/// word at each position.
#[derive(Debug, Clone, Default)]
pub struct SensitiveWordFilter {
    matcher: Option<AhoCorasick>,
    words: usize,
}

impl SensitiveWordFilter {
    pub fn from_words<I, S>(words: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_ascii_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        words.sort();
        words.dedup();
        if words.is_empty() {
            return Ok(Self::default());
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&words)?;
        Ok(Self {
            matcher: Some(matcher),
            words: words.len(),
        })
    }

    /// One word per line; blank lines and `#` comments are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SensitiveWordsError> {
        let contents = fs::read_to_string(path)?;
        let filter = Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )?;
        Ok(filter)
    }

    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Mask plain text.
    pub fn mask(&self, input: &str) -> String {
        let Some(matcher) = &self.matcher else {
            return input.to_string();
        };
        let mut masked = String::with_capacity(input.len());
        let mut last = 0;
        for hit in matcher.find_iter(input) {
            masked.push_str(&input[last..hit.start()]);
            let len = input[hit.range()].chars().count();
            masked.extend(std::iter::repeat_n(MASK, len));
            last = hit.end();
        }
        masked.push_str(&input[last..]);
        masked
    }

    /// Mask the text of already-cleaned HTML. Tags and character references
    /// such as `&lt;` are copied untouched.
    pub fn mask_html(&self, html: &str) -> String {
        if self.matcher.is_none() {
            return html.to_string();
        }
        let mut masked = String::with_capacity(html.len());
        let mut rest = html;
        while let Some(start) = rest.find(|c| c == '<' || c == '&') {
            masked.push_str(&self.mask(&rest[..start]));
            let markup = &rest[start..];
            let end = markup_len(markup);
            masked.push_str(&markup[..end]);
            rest = &markup[end..];
        }
        masked.push_str(&self.mask(rest));
        masked
    }
}

// Length of the tag or character reference that opens `markup`. A bare `&`
// or an unclosed `<` covers only itself.
fn markup_len(markup: &str) -> usize {
    if markup.starts_with('<') {
        return markup.find('>').map_or(1, |pos| pos + 1);
    }
    match markup.find(';') {
        Some(pos) if is_reference_name(&markup[1..pos]) => pos + 1,
        _ => 1,
    }
}

fn is_reference_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 32
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '#')
}
