//! Pagination query parsing and list metadata helpers
//!
//! List endpoints accept raw `page` and `size` query strings. They are parsed
//! into a [`PaginationQuery`] whose page is always at least 1 and whose size
//! always lies within `1..=max_size`, so no zero or negative limit ever
//! reaches a repository.
//!
//! # Example
//!
//! ```rust
//! use newsdesk::config::PaginationConfig;
//! use newsdesk::pagination::{has_more, total_pages, PaginationQuery};
//!
//! let policy = PaginationConfig::default();
//! let query = PaginationQuery::parse(Some("3"), Some("20"), &policy).unwrap();
//! assert_eq!(query.offset(), 40);
//! assert_eq!(query.limit(), 20);
//!
//! assert_eq!(total_pages(41, 20), 3);
//! assert!(has_more(2, 41, 20));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PaginationConfig;

/// Malformed `page` or `size` input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for query parameter '{field}': expected an integer")]
pub struct PaginationError {
    /// Name of the offending query parameter
    pub field: &'static str,
    /// Raw value as sent by the client
    pub value: String,
}

/// Raw list parameters as they appear in the query string
///
/// Values are kept as text so malformed numbers can be reported as
/// validation failures instead of generic extractor rejections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl ListParams {
    /// Title filter, with an empty value treated as no filter
    pub fn title_filter(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Parse the page and size parameters under the given policy
    pub fn pagination(
        &self,
        policy: &PaginationConfig,
    ) -> Result<PaginationQuery, PaginationError> {
        PaginationQuery::parse(self.page.as_deref(), self.size.as_deref(), policy)
    }
}

/// Normalized, request-scoped pagination parameters (1-indexed pages)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationQuery {
    page: u32,
    size: u32,
}

impl PaginationQuery {
    /// Build a query from already-numeric values
    ///
    /// A page of 0 becomes 1 and a size of 0 becomes 1.
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }

    /// Parse raw query-string values
    ///
    /// - absent or empty `page` is 1, numeric `page` below 1 is raised to 1
    /// - absent, empty or non-positive `size` is `policy.default_size`
    /// - `size` above `policy.max_size` is clamped to it
    /// - anything that is not an integer is an error
    pub fn parse(
        page: Option<&str>,
        size: Option<&str>,
        policy: &PaginationConfig,
    ) -> Result<Self, PaginationError> {
        let max_size = policy.max_size.max(1);
        let default_size = policy.default_size.clamp(1, max_size);

        let page = match parse_number("page", page)? {
            Some(n) => clamp_to_u32(n, 1),
            None => 1,
        };

        let size = match parse_number("size", size)? {
            Some(n) if n >= 1 => clamp_to_u32(n, 1).min(max_size),
            _ => default_size,
        };

        Ok(Self { page, size })
    }

    /// Number of rows to skip
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    /// Maximum number of rows to return
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        let policy = PaginationConfig::default();
        Self::new(1, policy.default_size)
    }
}

fn parse_number(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, PaginationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse::<i64>().map(Some).map_err(|_| PaginationError {
            field,
            value: text.to_string(),
        }),
    }
}

fn clamp_to_u32(n: i64, min: u32) -> u32 {
    u32::try_from(n.max(i64::from(min))).unwrap_or(u32::MAX)
}

/// Number of pages needed to show `total` rows, `size` rows at a time
///
/// Returns 0 when there are no rows (or the size is 0).
#[must_use]
pub fn total_pages(total: u64, size: u32) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(size))
}

/// Whether rows exist beyond the given page
#[must_use]
pub fn has_more(page: u32, total: u64, size: u32) -> bool {
    u64::from(page).saturating_mul(u64::from(size)) < total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PaginationConfig {
        PaginationConfig {
            default_size: 10,
            max_size: 50,
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(7, 0), 0);
    }

    #[test]
    fn test_has_more() {
        assert!(has_more(1, 10, 5));
        assert!(!has_more(2, 10, 5));
        assert!(!has_more(1, 0, 5));
        assert!(!has_more(u32::MAX, 10, u32::MAX));
    }

    #[test]
    fn test_parse_absent_uses_defaults() {
        let q = PaginationQuery::parse(None, None, &policy()).unwrap();
        assert_eq!(q.page(), 1);
        assert_eq!(q.size(), 10);
        assert_eq!(q.offset(), 0);
        assert_eq!(q.limit(), 10);
    }

    #[test]
    fn test_parse_empty_strings_use_defaults() {
        let q = PaginationQuery::parse(Some(""), Some(" "), &policy()).unwrap();
        assert_eq!(q.page(), 1);
        assert_eq!(q.size(), 10);
    }

    #[test]
    fn test_parse_explicit_values() {
        let q = PaginationQuery::parse(Some("3"), Some("20"), &policy()).unwrap();
        assert_eq!(q.page(), 3);
        assert_eq!(q.size(), 20);
        assert_eq!(q.offset(), 40);
        assert_eq!(q.limit(), 20);
    }

    #[test]
    fn test_parse_out_of_range_values_are_clamped() {
        let q = PaginationQuery::parse(Some("0"), Some("500"), &policy()).unwrap();
        assert_eq!(q.page(), 1);
        assert_eq!(q.size(), 50);

        let q = PaginationQuery::parse(Some("-4"), Some("-1"), &policy()).unwrap();
        assert_eq!(q.page(), 1);
        assert_eq!(q.size(), 10);

        let q = PaginationQuery::parse(Some("2"), Some("0"), &policy()).unwrap();
        assert_eq!(q.size(), 10);
        assert_eq!(q.offset(), 10);
    }

    #[test]
    fn test_parse_huge_page_saturates() {
        let q = PaginationQuery::parse(Some("99999999999"), None, &policy()).unwrap();
        assert_eq!(q.page(), u32::MAX);
    }

    #[test]
    fn test_parse_malformed_values_fail() {
        let err = PaginationQuery::parse(Some("two"), None, &policy()).unwrap_err();
        assert_eq!(err.field, "page");
        assert_eq!(err.value, "two");

        let err = PaginationQuery::parse(None, Some("1.5"), &policy()).unwrap_err();
        assert_eq!(err.field, "size");
    }

    #[test]
    fn test_new_never_yields_zero() {
        let q = PaginationQuery::new(0, 0);
        assert_eq!(q.page(), 1);
        assert_eq!(q.size(), 1);
    }

    #[test]
    fn test_list_params_title_filter() {
        let params = ListParams {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(params.title_filter(), None);

        let params = ListParams {
            title: Some("Launch".to_string()),
            ..Default::default()
        };
        assert_eq!(params.title_filter(), Some("Launch"));
    }
}
