//! Deterministic pagination over the code-snippet sequence.
//!
//! Slicing is stateless per call; only the current page number is state.
//! The paginator is always derived from the live snippet list and is
//! rebuilt whenever that list is replaced.

use crate::types::CodeSnippet;

/// Fixed page size for snippet pagination
pub const SNIPPETS_PER_PAGE: usize = 10;

/// A snippet annotated with its 1-based global index, stable across pages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberedSnippet<'a> {
    /// 1-based position within the whole sequence
    pub number: usize,
    pub snippet: &'a CodeSnippet,
}

/// Page cursor over a snippet sequence of known length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current: usize,
    total_items: usize,
}

impl Paginator {
    /// New cursor positioned on page 1
    #[must_use]
    pub fn new(total_items: usize) -> Self {
        Self {
            current: 1,
            total_items,
        }
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `ceil(total_items / page_size)`; 0 for an empty sequence
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(SNIPPETS_PER_PAGE)
    }

    /// Previous-button is disabled on the first page
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// Next-button is disabled on the last page
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Move one page in `direction` (-1 or +1). Out-of-range moves are
    /// no-ops: no error, no wraparound. Returns whether the page changed.
    pub fn change_page(&mut self, direction: i32) -> bool {
        let next = self.current as i64 + i64::from(direction);
        if next >= 1 && next <= self.total_pages() as i64 {
            self.current = next as usize;
            true
        } else {
            false
        }
    }

    /// Slice page `n` (1-based) out of `snippets`, clipped to the sequence
    /// length, each entry annotated with its global index. Out-of-range
    /// pages and length mismatches yield an empty page.
    #[must_use]
    pub fn page<'a>(&self, snippets: &'a [CodeSnippet], n: usize) -> Vec<NumberedSnippet<'a>> {
        if n < 1 || n > self.total_pages() || snippets.len() != self.total_items {
            return Vec::new();
        }
        let start = (n - 1) * SNIPPETS_PER_PAGE;
        let end = (start + SNIPPETS_PER_PAGE).min(snippets.len());
        snippets[start..end]
            .iter()
            .enumerate()
            .map(|(i, snippet)| NumberedSnippet {
                number: start + i + 1,
                snippet,
            })
            .collect()
    }

    /// The current page's slice
    #[must_use]
    pub fn current_slice<'a>(&self, snippets: &'a [CodeSnippet]) -> Vec<NumberedSnippet<'a>> {
        self.page(snippets, self.current)
    }
}
