//! HTTP route handlers.

pub mod health;
pub mod images;
pub mod story;
pub mod upload;
