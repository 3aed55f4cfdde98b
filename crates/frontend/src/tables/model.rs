//! Page and filter state of a paginated table, and the view computed from it.
//!
//! Everything here works on plain cell texts so it can run without a DOM.
//! The controller feeds the rows it reads from `tbody` into [`compute_view`]
//! and applies the resulting [`ViewPlan`] back onto the elements.

use crate::shared::date_utils::{date_portion, parse_cell_timestamp};
use chrono::NaiveDateTime;
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page and page size; pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_size: usize,
    current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Apply the raw value of the page-size selector.
    ///
    /// The page always goes back to 1. Input that is not a positive integer
    /// keeps the previous size and returns `false`.
    pub fn change_page_size(&mut self, raw: &str) -> bool {
        self.current_page = 1;
        match parse_page_size(raw) {
            Some(size) => {
                self.page_size = size;
                true
            }
            None => false,
        }
    }

    /// Jump to a page. Range is enforced by [`PageState::clamp`] on the next recompute.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size)
    }

    /// Keep `current_page` in `[1, page_count]`; with no rows it stays 1.
    pub fn clamp(&mut self, row_count: usize) {
        let pages = self.page_count(row_count).max(1);
        self.current_page = self.current_page.clamp(1, pages);
    }

    /// Sorted-index range shown on the current page.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = (self.current_page - 1) * self.page_size;
        start..start + self.page_size
    }
}

/// Parse a page-size selector value; only positive integers are accepted.
pub fn parse_page_size(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|size| *size > 0)
}

/// Parse a `data-page` attribute value.
pub fn parse_page_link(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|page| *page > 0)
}

/// Log filter: type (cell 1) and date (cell 0 up to the first space).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    type_filter: Option<String>,
    date_filter: Option<String>,
}

impl FilterState {
    /// Values are trimmed; blank means "no filter" for that column.
    pub fn new(type_filter: &str, date_filter: &str) -> Self {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            type_filter: non_empty(type_filter),
            date_filter: non_empty(date_filter),
        }
    }

    pub fn matches<S: AsRef<str>>(&self, cells: &[S]) -> bool {
        let cell = |i: usize| cells.get(i).map(AsRef::as_ref).unwrap_or("");

        let matches_type = self
            .type_filter
            .as_deref()
            .map_or(true, |wanted| cell(1) == wanted);
        let matches_date = self
            .date_filter
            .as_deref()
            .map_or(true, |wanted| date_portion(cell(0)) == wanted);

        matches_type && matches_date
    }
}

/// What the controller should apply to the table after a recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPlan {
    /// Per row, in DOM order: whether it is displayed.
    pub visible: Vec<bool>,
    /// Indexes (DOM order) of the rows passing the filter, most recent first.
    pub ranked: Vec<usize>,
    pub page_count: usize,
    pub current_page: usize,
}

impl ViewPlan {
    pub fn pagination_html(&self) -> String {
        pagination_html(self.page_count, self.current_page)
    }
}

/// Most recent first; rows without a valid date go last in DOM order.
fn by_date_desc(a: &Option<NaiveDateTime>, b: &Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort, filter and paginate `rows`, clamping `page` into range.
pub fn compute_view<S: AsRef<str>>(
    rows: &[Vec<S>],
    page: &mut PageState,
    filter: &FilterState,
) -> ViewPlan {
    let mut keyed: Vec<(usize, Option<NaiveDateTime>)> = rows
        .iter()
        .enumerate()
        .filter(|(_, cells)| filter.matches(cells.as_slice()))
        .map(|(i, cells)| {
            let stamp = cells.first().and_then(|c| parse_cell_timestamp(c.as_ref()));
            (i, stamp)
        })
        .collect();

    // stable: rows with equal keys keep DOM order
    keyed.sort_by(|(_, a), (_, b)| by_date_desc(a, b));

    let matched = keyed.len();
    page.clamp(matched);
    let range = page.visible_range();

    let mut visible = vec![false; rows.len()];
    for (rank, (row, _)) in keyed.iter().enumerate() {
        if range.contains(&rank) {
            visible[*row] = true;
        }
    }

    ViewPlan {
        visible,
        ranked: keyed.into_iter().map(|(i, _)| i).collect(),
        page_count: page.page_count(matched),
        current_page: page.current_page(),
    }
}

/// Pagination markup: one link per page, the current one marked active.
pub fn pagination_html(page_count: usize, current_page: usize) -> String {
    (1..=page_count)
        .map(|i| {
            let active = if i == current_page { " active" } else { "" };
            format!(
                r##"<li class="page-item{active}"><a class="page-link" href="#" data-page="{i}">{i}</a></li>"##
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rows whose cell 0 is a timestamp `minutes` after midnight, type in cell 1.
    fn log_rows(entries: &[(u32, &str)]) -> Vec<Vec<String>> {
        entries.iter()
            .map(|(minutes, kind)| {
                vec![
                    format!("2024-03-15 {:02}:{:02}:00", minutes / 60, minutes % 60),
                    kind.to_string(),
                ]
            })
            .collect()
    }

    fn visible_rows(plan: &ViewPlan) -> Vec<usize> {
        plan.visible
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| i)
            .collect()
    }

    fn active_links(html: &str) -> usize {
        html.matches("page-item active").count()
    }

    #[test]
    fn test_page_state_defaults() {
        let st = PageState::default();
        assert_eq!(st.page_size(), 10);
        assert_eq!(st.current_page(), 1);
        assert_eq!(PageState::new(0).page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_25_rows_three_pages_first_page_most_recent() {
        // DOM order is oldest first
        let rows = log_rows(&(0..25).map(|m| (m, "INFO")).collect::<Vec<_>>());
        let mut page = PageState::new(10);
        let plan = compute_view(&rows, &mut page, &FilterState::default());

        assert_eq!(plan.page_count, 3);
        let html = plan.pagination_html();
        assert_eq!(html.matches("data-page=").count(), 3);
        assert!(html.contains(r#"data-page="1""#));
        assert!(html.contains(r#"data-page="3""#));
        assert!(html.contains(
            r##"<li class="page-item active"><a class="page-link" href="#" data-page="1">1</a></li>"##
        ));

        // the 10 most recent rows are the last 10 in DOM order
        assert_eq!(visible_rows(&plan), (15..25).collect::<Vec<_>>());
        assert_eq!(plan.ranked[..3], [24, 23, 22]);
    }

    #[test]
    fn test_last_page_is_partial() {
        let rows = log_rows(&(0..25).map(|m| (m, "INFO")).collect::<Vec<_>>());
        let mut page = PageState::new(10);
        page.go_to(3);
        let plan = compute_view(&rows, &mut page, &FilterState::default());
        assert_eq!(visible_rows(&plan), (0..5).collect::<Vec<_>>());
        assert_eq!(active_links(&plan.pagination_html()), 1);
        assert!(plan
            .pagination_html()
            .contains(r##"page-item active"><a class="page-link" href="#" data-page="3""##));
    }

    #[test]
    fn test_link_count_matches_ceil_for_all_sizes() {
        for row_count in 0..40usize {
            let rows = log_rows(&(0..row_count as u32).map(|m| (m, "INFO")).collect::<Vec<_>>());
            for size in 1..12usize {
                let mut page = PageState::new(size);
                let plan = compute_view(&rows, &mut page, &FilterState::default());
                let html = plan.pagination_html();
                assert_eq!(html.matches("data-page=").count(), row_count.div_ceil(size));
                assert_eq!(active_links(&html), usize::from(row_count > 0));
                assert_eq!(visible_rows(&plan).len(), row_count.min(size));
            }
        }
    }

    #[test]
    fn test_zero_rows_no_links() {
        let rows: Vec<Vec<String>> = Vec::new();
        let mut page = PageState::new(10);
        let plan = compute_view(&rows, &mut page, &FilterState::default());
        assert_eq!(plan.page_count, 0);
        assert_eq!(plan.pagination_html(), "");
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn test_change_page_size_resets_page() {
        let rows = log_rows(&(0..25).map(|m| (m, "INFO")).collect::<Vec<_>>());
        let mut page = PageState::new(10);
        page.go_to(3);
        assert!(page.change_page_size("5"));
        assert_eq!(page.current_page(), 1);
        let plan = compute_view(&rows, &mut page, &FilterState::default());
        assert_eq!(plan.page_count, 5);
        assert_eq!(visible_rows(&plan), (20..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_invalid_page_size_keeps_previous() {
        let mut page = PageState::new(10);
        page.go_to(2);
        assert!(!page.change_page_size("abc"));
        assert_eq!(page.page_size(), 10);
        assert_eq!(page.current_page(), 1);
        assert!(!page.change_page_size("0"));
        assert!(!page.change_page_size("-5"));
        assert_eq!(page.page_size(), 10);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let rows = log_rows(&(0..12).map(|m| (m, "INFO")).collect::<Vec<_>>());
        let mut page = PageState::new(5);
        page.go_to(9);
        let plan = compute_view(&rows, &mut page, &FilterState::default());
        assert_eq!(plan.current_page, 3);
        assert_eq!(visible_rows(&plan), vec![0, 1]);

        page.go_to(0);
        let plan = compute_view(&rows, &mut page, &FilterState::default());
        assert_eq!(plan.current_page, 1);
    }

    #[test]
    fn test_sorted_descending_on_every_page() {
        // shuffled DOM order
        let minutes = [7u32, 2, 19, 11, 0, 15, 4, 9, 13, 1, 18, 6];
        let rows = log_rows(&minutes.iter().map(|m| (*m, "INFO")).collect::<Vec<_>>());
        let mut page = PageState::new(4);
        let mut seen: Vec<u32> = Vec::new();
        for p in 1..=3 {
            page.go_to(p);
            let plan = compute_view(&rows, &mut page, &FilterState::default());
            let mut on_page: Vec<u32> = visible_rows(&plan).iter().map(|i| minutes[*i]).collect();
            on_page.sort_unstable_by(|a, b| b.cmp(a));
            seen.extend(on_page);
        }
        let mut expected = minutes.to_vec();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_invalid_dates_go_last_in_dom_order() {
        let rows: Vec<Vec<String>> = vec![
            vec!["GBPUSD".into(), "Sell".into()],
            vec!["2024-03-15 10:00:00".into(), "INFO".into()],
            vec!["EURUSD".into(), "Buy".into()],
            vec!["2024-03-16 10:00:00".into(), "INFO".into()],
        ];
        let mut page = PageState::new(10);
        let plan = compute_view(&rows, &mut page, &FilterState::default());
        assert_eq!(plan.ranked, vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_type_filter_buy() {
        let kinds = ["SELL", "BUY", "INFO", "SELL", "BUY", "INFO", "SELL", "INFO", "BUY", "INFO"];
        let rows = log_rows(&kinds.iter().enumerate().map(|(i, k)| (i as u32, *k)).collect::<Vec<_>>());
        let mut page = PageState::new(10);
        let filter = FilterState::new("BUY", "");
        let plan = compute_view(&rows, &mut page, &filter);
        assert_eq!(visible_rows(&plan), vec![1, 4, 8]);
        assert_eq!(plan.page_count, 1);
        assert_eq!(plan.ranked, vec![8, 4, 1]);
    }

    #[test]
    fn test_filter_paginates_matching_rows_only() {
        let kinds: Vec<(u32, &str)> = (0..30)
            .map(|i| (i, if i % 3 == 0 { "ERROR" } else { "INFO" }))
            .collect();
        let rows = log_rows(&kinds);
        let mut page = PageState::new(4);
        let filter = FilterState::new("ERROR", "");
        page.go_to(3);
        let plan = compute_view(&rows, &mut page, &filter);
        // 10 ERROR rows -> 3 pages, last one holds the 2 oldest
        assert_eq!(plan.page_count, 3);
        assert_eq!(visible_rows(&plan), vec![0, 3]);
    }

    #[test]
    fn test_date_filter() {
        let rows: Vec<Vec<String>> = vec![
            vec!["2024-03-15 10:00:00".into(), "INFO".into()],
            vec!["2024-03-16 09:00:00".into(), "INFO".into()],
            vec!["2024-03-16 11:00:00".into(), "ERROR".into()],
        ];
        let mut page = PageState::new(10);
        let plan = compute_view(&rows, &mut page, &FilterState::new("", "2024-03-16"));
        assert_eq!(visible_rows(&plan), vec![1, 2]);

        let plan = compute_view(&rows, &mut page, &FilterState::new("ERROR", "2024-03-16"));
        assert_eq!(visible_rows(&plan), vec![2]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let kinds: Vec<(u32, &str)> = (0..17)
            .map(|i| (i, if i % 2 == 0 { "BUY" } else { "SELL" }))
            .collect();
        let rows = log_rows(&kinds);
        let filter = FilterState::new("SELL", "");
        let mut page = PageState::new(5);
        let once = compute_view(&rows, &mut page, &filter);
        let twice = compute_view(&rows, &mut page, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = FilterState::new("", "");
        assert_eq!(filter, FilterState::default());
        assert!(filter.matches(&["anything", "at all"][..]));
        assert!(filter.matches::<&str>(&[]));
    }

    #[test]
    fn test_blank_filter_values_are_ignored() {
        let rows = log_rows(&[(0, "BUY"), (1, "SELL"), (2, "INFO")]);
        let filter = FilterState::new(" ", "  ");
        assert_eq!(filter, FilterState::default());
        let mut page = PageState::new(10);
        let plan = compute_view(&rows, &mut page, &filter);
        assert_eq!(visible_rows(&plan), vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_values_are_trimmed() {
        let filter = FilterState::new(" BUY ", " 2024-03-15\t");
        assert!(filter.matches(&["2024-03-15 10:00:00", "BUY"][..]));
        assert!(!filter.matches(&["2024-03-15 10:00:00", "SELL"][..]));
    }

    #[test]
    fn test_parse_page_link() {
        assert_eq!(parse_page_link("2"), Some(2));
        assert_eq!(parse_page_link("0"), None);
        assert_eq!(parse_page_link("x"), None);
    }
}
