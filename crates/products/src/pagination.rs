//! Client-side pagination over an already-fetched list.

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page cursor.
///
/// The paginator does not own the rows; callers pass the current length (or
/// slice) so the cursor stays valid when rows are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
    current: usize,
}

/// Rows shown on the current page, as 1-based inclusive positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A zero page size is treated as one row per page.
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            current: 1,
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.per_page)
    }

    /// Jump to `page`, clamped to `1..=total_pages` (page 1 when empty).
    pub fn go_to(&mut self, page: usize, len: usize) -> usize {
        let last = self.total_pages(len).max(1);
        self.current = page.clamp(1, last);
        self.current
    }

    pub fn next(&mut self, len: usize) -> usize {
        self.go_to(self.current.saturating_add(1), len)
    }

    pub fn previous(&mut self, len: usize) -> usize {
        self.go_to(self.current.saturating_sub(1), len)
    }

    /// Re-clamp after the list shrank or grew.
    pub fn clamp(&mut self, len: usize) {
        self.go_to(self.current, len);
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.current < self.total_pages(len)
    }

    /// Controls are only worth showing with more than one page.
    pub fn shows_controls(&self, len: usize) -> bool {
        self.total_pages(len) > 1
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current - 1).saturating_mul(self.per_page).min(items.len());
        let end = start.saturating_add(self.per_page).min(items.len());
        &items[start..end]
    }

    /// `None` for an empty list.
    pub fn range(&self, len: usize) -> Option<PageRange> {
        let first = (self.current - 1) * self.per_page + 1;
        if len == 0 || first > len {
            return None;
        }
        Some(PageRange {
            first,
            last: (self.current * self.per_page).min(len),
            total: len,
        })
    }

    pub fn page_numbers(&self, len: usize) -> impl Iterator<Item = usize> {
        1..=self.total_pages(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_three_rows_make_three_pages() {
        let rows: Vec<usize> = (1..=23).collect();
        let mut pager = Paginator::default();

        assert_eq!(pager.total_pages(rows.len()), 3);
        assert_eq!(pager.page(&rows), &rows[0..10]);
        assert!(!pager.has_previous());
        assert!(pager.has_next(rows.len()));

        pager.go_to(3, rows.len());
        assert_eq!(pager.page(&rows), &rows[20..23]);
        assert_eq!(
            pager.range(rows.len()),
            Some(PageRange { first: 21, last: 23, total: 23 })
        );
        assert!(!pager.has_next(rows.len()));
        assert_eq!(pager.page_numbers(rows.len()).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn go_to_clamps() {
        let mut pager = Paginator::new(10);
        assert_eq!(pager.go_to(0, 25), 1);
        assert_eq!(pager.go_to(99, 25), 3);
        assert_eq!(pager.go_to(5, 0), 1);
    }

    #[test]
    fn shrinking_list_pulls_cursor_back() {
        let mut pager = Paginator::new(10);
        pager.go_to(2, 11);
        pager.clamp(10);
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn single_page_hides_controls() {
        let pager = Paginator::new(10);
        assert!(!pager.shows_controls(10));
        assert!(pager.shows_controls(11));
        assert_eq!(pager.range(0), None);
        assert!(pager.page::<u8>(&[]).is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: walking every page yields every row exactly once, in order.
            #[test]
            fn pages_partition_the_list(len in 0usize..200, per_page in 1usize..25) {
                let rows: Vec<usize> = (0..len).collect();
                let mut pager = Paginator::new(per_page);
                let mut seen = Vec::new();
                for page in 1..=pager.total_pages(len) {
                    pager.go_to(page, len);
                    seen.extend_from_slice(pager.page(&rows));
                }
                prop_assert_eq!(seen, rows);
            }

            /// Property: the cursor always lands on an existing page.
            #[test]
            fn cursor_stays_in_bounds(len in 0usize..200, target in 0usize..50) {
                let mut pager = Paginator::default();
                let page = pager.go_to(target, len);
                prop_assert!(page >= 1);
                prop_assert!(page <= pager.total_pages(len).max(1));
            }
        }
    }
}
