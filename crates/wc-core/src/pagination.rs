//! Offset pagination shared by repositories and callers

use crate::error::{Result, WcError};
use serde::{Deserialize, Serialize};

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Page size when none is given
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Requested window: 1-based page number and page size
///
/// Deserializing goes through [`PaginationOptions::new`], so out-of-range
/// values from a request body are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPaginationOptions")]
pub struct PaginationOptions {
    page: u32,
    limit: u32,
}

/// Unchecked wire form of [`PaginationOptions`]
#[derive(Deserialize)]
struct RawPaginationOptions {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn first_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl TryFrom<RawPaginationOptions> for PaginationOptions {
    type Error = WcError;

    fn try_from(raw: RawPaginationOptions) -> Result<Self> {
        Self::new(raw.page, raw.limit)
    }
}

impl PaginationOptions {
    /// Create validated options
    pub fn new(page: u32, limit: u32) -> Result<Self> {
        if page == 0 {
            return Err(WcError::InvalidInput(
                "page must be 1 or greater".to_string(),
            ));
        }
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(WcError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip
    pub fn offset(&self) -> usize {
        (self.page as usize).saturating_sub(1) * self.limit as usize
    }

    /// Build a result from up to `limit + 1` items starting at [`offset`](Self::offset).
    ///
    /// The extra item, if present, only signals that a next page exists and is dropped.
    pub fn finish<T>(&self, mut window: Vec<T>) -> PaginationResult<T> {
        let limit = self.limit as usize;
        let has_next_page = window.len() > limit;
        window.truncate(limit);

        PaginationResult {
            items: window,
            meta: PaginationMeta {
                limit: self.limit,
                page: self.page,
                has_next_page,
                has_prev_page: self.page > 1,
            },
        }
    }

    /// Paginate an already ordered iterator
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> PaginationResult<T> {
        let window = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit as usize + 1)
            .collect();
        self.finish(window)
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Page position reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub limit: u32,
    pub page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// One page of items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginationResult<T> {
    /// Transform every item, keeping the meta
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginationResult<U> {
        PaginationResult {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(PaginationOptions::new(0, 10).is_err());
        assert!(PaginationOptions::new(1, 0).is_err());
        assert!(PaginationOptions::new(1, MAX_PAGE_LIMIT + 1).is_err());
        assert!(PaginationOptions::new(3, MAX_PAGE_LIMIT).is_ok());
    }

    #[test]
    fn test_deserialize_validates_range() {
        let err = serde_json::from_str::<PaginationOptions>(r#"{"page":0,"limit":20}"#)
            .unwrap_err();
        assert!(err.to_string().contains("page must be 1 or greater"));

        let err = serde_json::from_str::<PaginationOptions>(r#"{"page":1,"limit":0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("limit must be between"));

        let raw = RawPaginationOptions { page: 0, limit: 20 };
        let err = PaginationOptions::try_from(raw).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let opts: PaginationOptions = serde_json::from_str(r#"{"page":3}"#).unwrap();
        assert_eq!(opts.page(), 3);
        assert_eq!(opts.limit(), DEFAULT_PAGE_LIMIT);

        let opts: PaginationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, PaginationOptions::default());
    }

    #[test]
    fn test_first_page_with_more() {
        let opts = PaginationOptions::new(1, 2).unwrap();
        let result = opts.apply(1..=5);

        assert_eq!(result.items, vec![1, 2]);
        assert_eq!(
            result.meta,
            PaginationMeta {
                limit: 2,
                page: 1,
                has_next_page: true,
                has_prev_page: false,
            }
        );
    }

    #[test]
    fn test_last_page() {
        let opts = PaginationOptions::new(3, 2).unwrap();
        let result = opts.apply(1..=5);

        assert_eq!(result.items, vec![5]);
        assert!(!result.meta.has_next_page);
        assert!(result.meta.has_prev_page);
    }

    #[test]
    fn test_exact_fit_has_no_next_page() {
        let opts = PaginationOptions::new(2, 2).unwrap();
        let result = opts.apply(1..=4);

        assert_eq!(result.items, vec![3, 4]);
        assert!(!result.meta.has_next_page);
    }

    #[test]
    fn test_past_the_end_is_empty() {
        let opts = PaginationOptions::new(10, 5).unwrap();
        let result = opts.apply(1..=3);
        assert!(result.items.is_empty());
        assert!(result.meta.has_prev_page);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let result = PaginationOptions::default().apply(Vec::<u8>::new());
        let json = serde_json::to_string(&result.meta).unwrap();
        assert!(json.contains("hasNextPage"));
        assert!(json.contains("hasPrevPage"));
    }
}
