//! Pagination types.

use serde::Deserialize;
use serde::Serialize;

/// Zero-based page position and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
}

impl Pagination {
    /// Creates a pagination state. A zero page size is raised to 1.
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// Returns the 1-based page number used in URLs.
    pub fn page_number(&self) -> u32 {
        self.page_index.saturating_add(1)
    }

    /// Returns the index of the first row on the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }
}

/// Total number of pages, as reported by the last fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageCount {
    /// Nothing fetched yet, or the backend does not report totals.
    #[default]
    Unknown,
    /// Known number of pages.
    Known(u32),
}

impl PageCount {
    /// Converts the wire representation, where any negative value means unknown.
    pub fn from_total(total: i64) -> Self {
        if total < 0 {
            PageCount::Unknown
        } else {
            PageCount::Known(total.min(i64::from(u32::MAX)) as u32)
        }
    }

    /// Returns the wire representation (`-1` when unknown).
    pub fn to_total(&self) -> i64 {
        match self {
            PageCount::Unknown => -1,
            PageCount::Known(n) => i64::from(*n),
        }
    }

    /// Returns the last valid page index, if known.
    ///
    /// A known count of zero still has page 0 as its last index.
    pub fn last_index(&self) -> Option<u32> {
        match self {
            PageCount::Unknown => None,
            PageCount::Known(n) => Some(n.saturating_sub(1)),
        }
    }

    /// Returns `true` if a page exists after `page_index`.
    ///
    /// An unknown count always allows moving forward.
    pub fn has_page_after(&self, page_index: u32) -> bool {
        match self {
            PageCount::Unknown => true,
            PageCount::Known(n) => u64::from(page_index) + 1 < u64::from(*n),
        }
    }
}
