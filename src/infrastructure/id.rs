use crate::application::ports::util::IdGenerator;
use uuid::Uuid;

/// UUIDv7 in simple form: time-ordered and safe to use in URLs.
#[derive(Default, Clone)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn next_id(&self) -> String {
        Uuid::now_v7().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::ArticleId;

    #[test]
    fn generated_ids_are_valid_article_ids() {
        let generator = UuidV7Generator;
        let first = generator.next_id();
        let second = generator.next_id();
        assert_ne!(first, second);
        assert!(ArticleId::new(first).is_ok());
    }
}
