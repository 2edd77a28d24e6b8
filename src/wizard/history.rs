// ABOUTME: Paginated read-only browser over past wants drafts
// Master/detail selection; a short page signals the end of the list

use crate::models::WantsDraft;

#[derive(Debug)]
pub struct HistoryState {
    pub items: Vec<WantsDraft>,
    pub page: u32,
    page_size: u32,
    pub has_more: bool,
    pub loading: bool,
    pub selected: Option<usize>,
    /// Index of the item opened in the detail pane (collapses to a single
    /// pane on narrow terminals)
    pub detail: Option<usize>,
}

impl HistoryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            page_size,
            has_more: false,
            loading: false,
            selected: None,
            detail: None,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page number the next load should request: 1 on open, page + 1 for
    /// "load more".
    pub fn next_page(&self) -> u32 {
        if self.items.is_empty() {
            1
        } else {
            self.page + 1
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Install a fetched page. Page 1 replaces; later pages append. A page
    /// shorter than the page size is the end-of-list signal; there is no
    /// explicit total-count check.
    pub fn apply_page(&mut self, page: u32, mut fetched: Vec<WantsDraft>) {
        self.loading = false;
        self.has_more = fetched.len() as u32 == self.page_size;
        self.page = page;

        if page <= 1 {
            self.items = fetched;
            self.selected = if self.items.is_empty() { None } else { Some(0) };
            self.detail = None;
        } else {
            self.items.append(&mut fetched);
        }
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = match self.selected {
            Some(idx) if idx + 1 < self.items.len() => idx + 1,
            Some(idx) => idx,
            None => 0,
        };
        self.selected = Some(next);
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let prev = match self.selected {
            Some(idx) if idx > 0 => idx - 1,
            _ => 0,
        };
        self.selected = Some(prev);
    }

    pub fn open_detail(&mut self) {
        self.detail = self.selected;
    }

    pub fn close_detail(&mut self) -> bool {
        let was_open = self.detail.is_some();
        self.detail = None;
        was_open
    }

    pub fn selected_item(&self) -> Option<&WantsDraft> {
        self.selected.and_then(|idx| self.items.get(idx))
    }

    pub fn detail_item(&self) -> Option<&WantsDraft> {
        self.detail.and_then(|idx| self.items.get(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: &str) -> WantsDraft {
        serde_json::from_str(&format!(
            r#"{{
                "id": "{id}", "user_id": "u-1", "status": "completed",
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:00:00Z"
            }}"#
        ))
        .unwrap()
    }

    fn page_of(n: usize, prefix: &str) -> Vec<WantsDraft> {
        (0..n).map(|i| draft(&format!("{prefix}-{i}"))).collect()
    }

    #[test]
    fn test_full_page_offers_load_more() {
        let mut history = HistoryState::new(20);
        history.apply_page(1, page_of(20, "a"));
        assert!(history.has_more);
        assert_eq!(history.next_page(), 2);
    }

    #[test]
    fn test_short_page_is_end_of_list() {
        let mut history = HistoryState::new(20);
        history.apply_page(1, page_of(20, "a"));
        history.apply_page(2, page_of(7, "b"));
        assert!(!history.has_more);
        assert_eq!(history.items.len(), 27);
    }

    #[test]
    fn test_empty_first_page() {
        let mut history = HistoryState::new(20);
        history.apply_page(1, Vec::new());
        assert!(!history.has_more);
        assert!(history.items.is_empty());
        assert!(history.selected.is_none());
    }

    #[test]
    fn test_exact_boundary_then_empty_page() {
        // A total count that is a multiple of the page size needs one extra
        // fetch to discover the end
        let mut history = HistoryState::new(10);
        history.apply_page(1, page_of(10, "a"));
        assert!(history.has_more);
        history.apply_page(2, Vec::new());
        assert!(!history.has_more);
        assert_eq!(history.items.len(), 10);
    }

    #[test]
    fn test_reopening_replaces_page_one() {
        let mut history = HistoryState::new(5);
        history.apply_page(1, page_of(5, "a"));
        history.apply_page(2, page_of(5, "b"));
        assert_eq!(history.items.len(), 10);

        history.apply_page(1, page_of(3, "c"));
        assert_eq!(history.items.len(), 3);
        assert_eq!(history.selected, Some(0));
    }

    #[test]
    fn test_selection_clamps_at_ends() {
        let mut history = HistoryState::new(5);
        history.apply_page(1, page_of(2, "a"));

        history.select_previous();
        assert_eq!(history.selected, Some(0));
        history.select_next();
        assert_eq!(history.selected, Some(1));
        history.select_next();
        assert_eq!(history.selected, Some(1));
    }

    #[test]
    fn test_detail_open_close() {
        let mut history = HistoryState::new(5);
        history.apply_page(1, page_of(2, "a"));
        history.select_next();
        history.open_detail();
        assert_eq!(history.detail_item().unwrap().id, "a-1");
        assert!(history.close_detail());
        assert!(!history.close_detail());
    }
}
