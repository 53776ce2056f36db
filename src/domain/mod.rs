pub mod article;
pub mod comment;
pub mod errors;
pub mod record;
pub mod site;
pub mod user;
