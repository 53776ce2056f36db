pub mod cache;
pub mod database;
pub mod id;
pub mod repositories;
pub mod search;
pub mod security;
pub mod text;
pub mod time;
