// src/inventory/pagination.rs - Page slicing and pager controls

/// Number of pages needed for `total` rows. Zero rows means zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Rows of 1-indexed `page`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    total: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total, self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.has_previous() {
            self.page -= 1;
        }
    }

    /// Jumps to `page`, clamped into the valid range.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
    }

    /// Changing the page size always returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Updates the row count, pulling the page back if the data shrank.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.page = self.page.clamp(1, self.page_count().max(1));
    }

    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.page_count()
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_size() {
        let items: Vec<usize> = (0..23).collect();
        for n in [1usize, 5, 10, 15, 20, 23, 30] {
            let pages = page_count(items.len(), n);
            let last = paginate(&items, pages, n);
            assert_eq!(last.len(), items.len() - n * (pages - 1), "page size {}", n);
        }
    }

    #[test]
    fn test_first_page_slice() {
        let items: Vec<usize> = (0..12).collect();
        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
        assert_eq!(paginate(&items, 2, 10), &items[10..12]);
        assert!(paginate(&items, 3, 10).is_empty());
        assert!(paginate(&items, 0, 10).is_empty());
    }

    #[test]
    fn test_boundary_controls() {
        let mut pager = Pager::new(10);
        pager.set_total(25);

        assert!(!pager.has_previous());
        assert!(pager.has_next());

        pager.next();
        pager.next();
        assert_eq!(pager.page(), 3);
        assert!(pager.has_previous());
        assert!(!pager.has_next());

        pager.next();
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn test_page_size_change_resets() {
        let mut pager = Pager::new(10);
        pager.set_total(50);
        pager.go_to(4);
        assert_eq!(pager.page(), 4);

        pager.set_page_size(20);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.page_count(), 3);
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut pager = Pager::new(10);
        pager.set_total(45);
        pager.go_to(5);

        pager.set_total(12);
        assert_eq!(pager.page(), 2);

        pager.set_total(0);
        assert_eq!(pager.page(), 1);
        assert!(!pager.has_next());
        assert!(!pager.has_previous());
        assert_eq!(pager.page_numbers().count(), 0);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut pager = Pager::new(15);
        pager.set_total(40);
        pager.go_to(99);
        assert_eq!(pager.page(), 3);
        pager.go_to(0);
        assert_eq!(pager.page(), 1);
    }
}
