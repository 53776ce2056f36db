mod markdown;
mod sanitizer;
mod sensitive;

pub use markdown::ComrakNormalizer;
pub use sanitizer::UgcSanitizer;
pub use sensitive::{SensitiveWordFilter, SensitiveWordsError};
