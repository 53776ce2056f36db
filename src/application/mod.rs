pub mod articles;
pub mod comments;
pub mod dto;
pub mod error;
pub mod ports;
pub mod resilience;
pub mod services;
pub mod site;

pub use error::ApplicationResult;
