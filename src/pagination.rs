use std::ops::Range;

/// Number of todos shown per page.
pub const PAGE_SIZE: usize = 10;

/// Current page of a paginated list. Pages are 1-based.
///
/// Shrinking the list never moves the page directly; the view calls
/// [`Paginator::reconcile`] after each draw, which pulls the page back
/// into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(count / page_size)`, never less than 1.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Index range of the current page within a list of `count` items.
    /// Empty when the page is out of range (before reconciliation).
    pub fn page_range(&self, count: usize) -> Range<usize> {
        let start = (self.current - 1) * self.page_size;
        if start >= count {
            return count..count;
        }
        start..(start + self.page_size).min(count)
    }

    pub fn next_page(&mut self, count: usize) -> bool {
        if self.current < self.total_pages(count) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn first_page(&mut self) {
        self.current = 1;
    }

    /// Clamp the current page to the last page of a `count`-item list.
    /// Returns true when the page moved.
    pub fn reconcile(&mut self, count: usize) -> bool {
        let last = self.total_pages(count);
        if self.current > last {
            self.current = last;
            true
        } else {
            false
        }
    }
}
