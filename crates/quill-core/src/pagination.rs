//! Fixed-size pagination with out-of-range clamping.
//!
//! Page numbers are 1-based. A requested number of 0 or beyond the last
//! page clamps to the nearest valid page instead of failing, so every
//! listing endpoint answers with a usable page.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A requested slice of an ordered collection.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(number: u64) -> Self {
        Self {
            number,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Clamp the requested number into `1..=total_pages` for a collection
    /// of `total_items` entries.
    pub fn clamp(&self, total_items: u64) -> u64 {
        self.number.clamp(1, total_pages(total_items, self.size))
    }

    /// Zero-based offset of the clamped page.
    pub fn offset(&self, total_items: u64) -> u64 {
        (self.clamp(total_items) - 1) * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Number of pages a collection of `total_items` occupies; an empty
/// collection still has one (empty) page.
pub fn total_pages(total_items: u64, size: u64) -> u64 {
    total_items.div_ceil(size).max(1)
}

/// One materialized page of an ordered collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The clamped, effective page number.
    pub number: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            number: request.clamp(total_items),
            size: request.size,
            total_items,
            total_pages: total_pages(total_items, request.size),
        }
    }

    /// Slice an already materialized collection. Used by the in-memory
    /// backend; the Postgres repositories push offset/limit into SQL.
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len() as u64;
        let offset = request.offset(total_items) as usize;
        let items = all
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .collect();
        Self::new(items, request, total_items)
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_clamps_to_first() {
        let page = Page::from_vec((0..25).collect::<Vec<_>>(), PageRequest {
            number: 0,
            size: 10,
        });

        assert_eq!(page.number, 1);
        assert_eq!(page.items, (0..10).collect::<Vec<_>>());
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn page_beyond_last_clamps_to_last() {
        let page = Page::from_vec((0..25).collect::<Vec<_>>(), PageRequest {
            number: 99,
            size: 10,
        });

        assert_eq!(page.number, 3);
        assert_eq!(page.items, (20..25).collect::<Vec<_>>());
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn empty_collection_yields_single_empty_page() {
        let page = Page::from_vec(Vec::<i32>::new(), PageRequest::new(5));

        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(31, 10), 4);
        assert_eq!(total_pages(1, 10), 1);
    }

    #[test]
    fn default_page_size_is_ten() {
        assert_eq!(PageRequest::new(1).size, 10);
    }
}
