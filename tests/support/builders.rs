// tests/support/builders.rs
use chrono::{DateTime, Utc};
use inkpost_core::application::articles::CreateArticleCommand;
use inkpost_core::application::comments::CreateCommentCommand;
use inkpost_core::application::dto::AuthenticatedUser;
use inkpost_core::domain::article::{
    Article, ArticleCounters, ArticleDraft, ArticleId, ArticleTitle, Author, Cover,
};
use inkpost_core::domain::user::{Role, UserId};

pub fn create_command(id: &str) -> CreateArticleCommand {
    CreateArticleCommand {
        id: id.to_string(),
        title: format!("Title of {id}"),
        summary: "a short abstract".into(),
        content: "# Heading\n\nbody text".into(),
        category: "rust".into(),
        cover_id: 3,
        cover_url: "https://img.example/3.png".into(),
        author_id: 1,
        author_name: "admin".into(),
    }
}

/// Builds stored articles for seeding the document store directly.
pub struct ArticleBuilder {
    id: String,
    title: String,
    content: String,
    category: String,
    counters: ArticleCounters,
}

impl ArticleBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: format!("Title of {id}"),
            content: "body".into(),
            category: "rust".into(),
            counters: ArticleCounters::default(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn looks(mut self, look: u64) -> Self {
        self.counters.look = look;
        self
    }

    pub fn comments(mut self, comment: u64) -> Self {
        self.counters.comment = comment;
        self
    }

    pub fn build(self, now: DateTime<Utc>) -> Article {
        let mut article = Article::create(
            ArticleDraft {
                id: ArticleId::new(self.id).unwrap(),
                title: ArticleTitle::new(self.title).unwrap(),
                summary: String::new(),
                content: self.content,
                category: self.category,
                cover: Cover::default(),
                author: Author {
                    id: UserId::new(1).unwrap(),
                    name: "admin".into(),
                },
            },
            now,
        );
        article.counters = self.counters;
        article
    }
}

pub fn comment(article_id: &str, parent_id: Option<i64>, content: &str) -> CreateCommentCommand {
    CreateCommentCommand {
        article_id: article_id.to_string(),
        parent_id,
        content: content.to_string(),
    }
}

pub fn reader(id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        name: format!("reader{id}"),
        role: Role::User,
    }
}
