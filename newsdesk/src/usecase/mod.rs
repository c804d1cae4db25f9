//! Business-rule seam between handlers and repositories
//!
//! Both usecases currently delegate every call unchanged to their
//! repositories and pass errors through as-is.

mod blog;
mod news;

pub use blog::{BlogService, BlogUsecase};
pub use news::{NewsService, NewsUsecase};
