//! Windowed page navigation for list templates: first pages, a window
//! around the current page and the last pages, with `None` marking a gap.

use serde::Serialize;

const EDGE: usize = 2;
const BEFORE_CURRENT: usize = 2;
const AFTER_CURRENT: usize = 4;

#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let page = current_page.max(1);
        Self {
            items,
            pages: page_window(page, total_pages),
            page,
        }
    }
}

fn page_window(current: usize, total: usize) -> Vec<Option<usize>> {
    if total == 0 {
        return vec![];
    }

    let mut shown: Vec<usize> = Vec::new();
    for n in 1..=total {
        let near_edge = n <= EDGE || n > total - EDGE.min(total);
        let near_current =
            n + BEFORE_CURRENT >= current && n <= current + AFTER_CURRENT;
        if near_edge || near_current {
            shown.push(n);
        }
    }

    let mut window = Vec::with_capacity(shown.len() + 2);
    let mut previous = 0;
    for n in shown {
        if n != previous + 1 {
            window.push(None);
        }
        window.push(Some(n));
        previous = n;
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_has_no_gaps() {
        let paginated = Paginated::new(vec![1, 2, 3], 1, 1);
        assert_eq!(paginated.pages, vec![Some(1)]);
        assert_eq!(paginated.page, 1);
    }

    #[test]
    fn middle_page_elides_both_ends() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 10, 20);
        assert_eq!(paginated.pages.iter().filter(|p| p.is_none()).count(), 2);
        assert!(paginated.pages.contains(&Some(1)));
        assert!(paginated.pages.contains(&Some(20)));
        assert!(paginated.pages.contains(&Some(10)));
        assert!(!paginated.pages.contains(&Some(5)));
    }

    #[test]
    fn short_lists_show_every_page() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 2, 5);
        assert_eq!(
            paginated.pages,
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
    }

    #[test]
    fn page_zero_is_clamped_to_one() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 0, 3);
        assert_eq!(paginated.page, 1);
    }
}
