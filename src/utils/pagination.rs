// src/utils/pagination.rs

/// Items shown per page on the HTML list pages.
pub const PAGE_SIZE: usize = 12;

/// One page of an in-memory list.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub number: usize,
    pub num_pages: usize,
    /// Total items across every page.
    pub count: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

/// Cuts `items` into pages and returns the requested one.
///
/// A missing or non-numeric page gives the first page. Any number outside
/// the valid range, zero and negatives included, gives the last page. An
/// empty list is a single empty page.
pub fn paginate<T>(items: Vec<T>, per_page: usize, requested: Option<&str>) -> Page<T> {
    let per_page = per_page.max(1);
    let count = items.len();
    let num_pages = count.div_ceil(per_page).max(1);
    let number = match requested.and_then(|p| p.trim().parse::<i64>().ok()) {
        None => 1,
        Some(n) => usize::try_from(n)
            .ok()
            .filter(|n| (1..=num_pages).contains(n))
            .unwrap_or(num_pages),
    };
    let items = items
        .into_iter()
        .skip((number - 1) * per_page)
        .take(per_page)
        .collect();
    Page {
        items,
        number,
        num_pages,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_requested_page() {
        let page = paginate((1..=30).collect::<Vec<i32>>(), 12, Some("2"));
        assert_eq!(page.items, (13..=24).collect::<Vec<_>>());
        assert_eq!(page.num_pages, 3);
        assert!(page.has_previous() && page.has_next());
    }

    #[test]
    fn junk_page_falls_back_to_first() {
        let page = paginate((1..=30).collect::<Vec<i32>>(), 12, Some("abc"));
        assert_eq!(page.number, 1);
    }

    #[test]
    fn page_past_the_end_is_clamped() {
        let page = paginate((1..=30).collect::<Vec<i32>>(), 12, Some("9"));
        assert_eq!(page.number, 3);
        assert_eq!(page.items.len(), 6);
        assert!(!page.has_next());
    }

    #[test]
    fn page_below_one_is_the_last_page() {
        assert_eq!(paginate((1..=30).collect::<Vec<i32>>(), 12, Some("0")).number, 3);
        assert_eq!(paginate((1..=30).collect::<Vec<i32>>(), 12, Some("-2")).number, 3);
        assert_eq!(paginate(Vec::<i32>::new(), 12, Some("0")).number, 1);
    }

    #[test]
    fn empty_list_is_one_empty_page() {
        let page = paginate(Vec::<i32>::new(), 12, None);
        assert_eq!((page.number, page.num_pages, page.count), (1, 1, 0));
    }
}
