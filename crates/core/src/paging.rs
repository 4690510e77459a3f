//! Paging and sorting vocabulary shared by the store and the API layer.

use serde::{Deserialize, Serialize};

/// A zero-based page request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub index: u32,
    /// Maximum number of records per page.
    pub size: u32,
}

impl PageRequest {
    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// Offset of the first record on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.index) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { index: 0, size: 10 }
    }
}

/// One page of results plus the total count of matching records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching records across all pages, not just this one.
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Sortable product fields for paginated listings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    Price,
    StockQuantity,
}

impl SortField {
    /// Parse a field name, falling back to `Id` for anything unrecognized.
    ///
    /// Unknown fields must not reach the storage backend as raw strings, so
    /// parsing is total.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "price" => Self::Price,
            "stock_quantity" | "stockquantity" => Self::StockQuantity,
            _ => Self::Id,
        }
    }
}

impl Default for SortField {
    fn default() -> Self {
        Self::Id
    }
}

/// Sort direction; parsing is case-insensitive and defaults to ascending.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse_or_default(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Asc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_direction_parses_case_insensitively() {
        assert_eq!(SortDirection::parse_or_default("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default("asc"), SortDirection::Asc);
    }

    #[test]
    fn sort_direction_defaults_to_asc_for_garbage() {
        assert_eq!(SortDirection::parse_or_default("sideways"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_or_default(""), SortDirection::Asc);
    }

    #[test]
    fn sort_field_falls_back_to_id() {
        assert_eq!(SortField::parse_or_default("price"), SortField::Price);
        assert_eq!(SortField::parse_or_default("stock_quantity"), SortField::StockQuantity);
        assert_eq!(SortField::parse_or_default("no_such_column"), SortField::Id);
    }

    #[test]
    fn page_request_offset() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 25).offset(), 75);
    }
}
