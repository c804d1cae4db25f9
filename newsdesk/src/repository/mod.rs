//! Persistence for blogs and news
//!
//! Repositories own all SQL and row mapping. They classify driver outcomes
//! into [`RepositoryError`]: a missing row, or a write that affected zero rows,
//! is always [`RepositoryErrorKind::NotFound`] and never a silent success.
//!
//! - [`BlogRepository`] / [`NewsRepository`]: capability traits
//! - [`PgBlogRepository`] / [`PgNewsRepository`]: PostgreSQL implementations
//! - [`paginate`]: the count-then-fetch listing both implementations share
//!
//! Title filters are bound as parameters, never spliced into SQL text.

mod blog;
mod error;
mod listing;
#[cfg(test)]
pub(crate) mod memory;
mod news;
mod snapshot;
mod traits;

pub use blog::PgBlogRepository;
pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use listing::{like_pattern, paginate, ListStatements, PageSource, SqlPage};
pub use news::PgNewsRepository;
pub use traits::{BlogRepository, NewsRepository, RepositoryResult};
