//! Shared vocabulary for the catalog service.
//!
//! Identifier and paging types plus the error taxonomy. This crate contains no
//! IO and no HTTP; every other crate in the workspace builds on it.

pub mod error;
pub mod paging;

pub use error::{CatalogError, CatalogResult};
pub use paging::{Page, PageRequest, SortDirection, SortField};

use serde::{Deserialize, Serialize};

/// Product identifier, assigned by the store on creation and immutable after.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}
