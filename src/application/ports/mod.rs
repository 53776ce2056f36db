// src/application/ports/mod.rs
pub mod cache;
pub mod security;
pub mod text;
pub mod time;
pub mod util;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type CachePort = dyn cache::Cache;
pub type TokenVerifierPort = dyn security::TokenVerifier;
pub type ClockPort = dyn time::Clock;
pub type IdGeneratorPort = dyn util::IdGenerator;
pub type MarkdownNormalizerPort = dyn text::MarkdownNormalizer;
pub type ContentSanitizerPort = dyn text::ContentSanitizer;
