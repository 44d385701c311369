use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::domain::ROWS_PER_PAGE_OPTIONS;
use crate::records::{Column, Record, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// The page of rows handed to the renderer, recomputed on every change.
#[derive(Debug)]
pub struct PageView<'a, R> {
    /// How many records match the current search, across all pages.
    pub total_matching: usize,
    /// The records on the current page, filtered then sorted then sliced.
    pub rows: Vec<&'a R>,
    /// Padding rows that keep the table height constant on a short last page.
    pub empty_rows: usize,
}

/// Mutable state of one table view. Owned by the view, driven only by the
/// operations below; everything the UI shows derives from `page_view`.
#[derive(Debug)]
pub struct TableState {
    order: SortOrder,
    order_by: &'static str,
    page: usize,
    rows_per_page: usize,
    search_query: String,
    selected: HashSet<RecordId>,
    expanded: HashMap<RecordId, bool>,
    cursor: usize,
    cursor_col: usize,
}

impl TableState {
    /// Defaults: ascending by the first sortable column, first page, smallest
    /// page size, no query, nothing selected or expanded.
    pub fn new(columns: &'static [Column]) -> Self {
        let order_by = columns
            .iter()
            .find(|c| c.sortable)
            .map(|c| c.key)
            .unwrap_or(columns[0].key);
        TableState {
            order: SortOrder::Ascending,
            order_by,
            page: 0,
            rows_per_page: ROWS_PER_PAGE_OPTIONS[0],
            search_query: String::new(),
            selected: HashSet::new(),
            expanded: HashMap::new(),
            cursor: 0,
            cursor_col: 0,
        }
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn order_by(&self) -> &'static str {
        self.order_by
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_expanded(&self, id: RecordId) -> bool {
        self.expanded.get(&id).copied().unwrap_or(false)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    /// Header-click behavior: re-requesting the active column flips the
    /// direction, any other column starts fresh ascending.
    pub fn request_sort(&mut self, key: &'static str) {
        if self.order_by == key {
            self.order = self.order.flipped();
        } else {
            self.order_by = key;
            self.order = SortOrder::Ascending;
        }
        trace!("Sort by {} {}", self.order_by, self.order.label());
    }

    /// Replaces the query and jumps back to the first page, so a shrinking
    /// result set can never leave the view pointing past the end.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.page = 0;
        self.cursor = 0;
    }

    pub fn set_rows_per_page(&mut self, rows: usize) {
        if self.rows_per_page != rows {
            self.rows_per_page = rows;
            self.page = 0;
            self.cursor = 0;
        }
    }

    pub fn cycle_rows_per_page(&mut self) {
        let next = ROWS_PER_PAGE_OPTIONS
            .iter()
            .position(|&n| n == self.rows_per_page)
            .map(|i| ROWS_PER_PAGE_OPTIONS[(i + 1) % ROWS_PER_PAGE_OPTIONS.len()])
            .unwrap_or(ROWS_PER_PAGE_OPTIONS[0]);
        self.set_rows_per_page(next);
    }

    /// The record set was replaced (reload, re-ingest). Pages restart; the
    /// selection is intentionally left alone, ids that vanished keep counting
    /// until the user clears them (see DESIGN.md).
    pub fn records_replaced(&mut self) {
        self.page = 0;
        self.cursor = 0;
    }

    pub fn toggle_one(&mut self, id: RecordId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Checked selects every id in the currently filtered set (all pages),
    /// unchecked clears the selection entirely.
    pub fn toggle_all(&mut self, checked: bool, filtered_ids: impl IntoIterator<Item = RecordId>) {
        if checked {
            self.selected = filtered_ids.into_iter().collect();
        } else {
            self.selected.clear();
        }
    }

    pub fn toggle_expand(&mut self, id: RecordId) {
        let entry = self.expanded.entry(id).or_insert(false);
        *entry = !*entry;
    }

    pub fn next_page(&mut self, total_matching: usize) {
        if (self.page + 1) * self.rows_per_page < total_matching {
            self.page += 1;
            self.cursor = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.cursor = 0;
        }
    }

    pub fn page_count(&self, total_matching: usize) -> usize {
        total_matching.div_ceil(self.rows_per_page).max(1)
    }

    pub fn move_cursor(&mut self, delta: isize, page_len: usize) {
        if page_len == 0 {
            self.cursor = 0;
            return;
        }
        let max = page_len - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn move_cursor_col(&mut self, delta: isize, column_count: usize) {
        if column_count == 0 {
            return;
        }
        let max = column_count - 1;
        self.cursor_col = self.cursor_col.saturating_add_signed(delta).min(max);
    }

    /// Filter, sort, slice. The derived view for the renderer.
    pub fn page_view<'a, R: Record>(&self, records: &'a [R]) -> PageView<'a, R> {
        let mut rows = filter(records, &self.search_query);
        let total_matching = rows.len();
        sort_records(&mut rows, self.order_by, self.order);

        let begin = (self.page * self.rows_per_page).min(total_matching);
        let end = (begin + self.rows_per_page).min(total_matching);
        let empty_rows = if self.page > 0 {
            ((self.page + 1) * self.rows_per_page).saturating_sub(total_matching)
        } else {
            0
        };

        PageView {
            total_matching,
            rows: rows[begin..end].to_vec(),
            empty_rows,
        }
    }

    /// Ids of every record matching the current search, for select-all.
    pub fn filtered_ids<R: Record>(&self, records: &[R]) -> Vec<RecordId> {
        filter(records, &self.search_query)
            .into_iter()
            .map(|r| r.id())
            .collect()
    }
}

/// Case-insensitive substring filter over each record's searchable text.
/// An empty query matches everything; input order is preserved.
pub fn filter<'a, R: Record>(records: &'a [R], query: &str) -> Vec<&'a R> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.search_text().contains(&needle))
        .collect()
}

/// Stable sort by one field. Descending inverts the comparator rather than
/// reversing the output, so equal keys keep their input order either way.
/// Missing values go last regardless of direction.
pub fn sort_records<R: Record>(rows: &mut [&R], order_by: &str, order: SortOrder) {
    rows.sort_by(|a, b| compare_by(*a, *b, order_by, order));
}

fn compare_by<R: Record>(a: &R, b: &R, key: &str, order: SortOrder) -> Ordering {
    let va = a.field(key);
    let vb = b.field(key);
    match (va.is_missing(), vb.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = va.compare(&vb);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::FieldValue;
    use std::borrow::Cow;

    struct Item {
        id: RecordId,
        code: &'static str,
        score: Option<f64>,
    }

    const ITEM_COLUMNS: [Column; 2] = [
        Column { key: "code", label: "Code", sortable: true, numeric: false },
        Column { key: "score", label: "Score", sortable: true, numeric: true },
    ];

    impl Record for Item {
        fn id(&self) -> RecordId {
            self.id
        }

        fn field(&self, key: &str) -> FieldValue<'_> {
            match key {
                "code" => FieldValue::Text(Cow::Borrowed(self.code)),
                "score" => self.score.map(FieldValue::Number).unwrap_or(FieldValue::Missing),
                _ => FieldValue::Missing,
            }
        }

        fn cell(&self, key: &str) -> String {
            match key {
                "code" => self.code.to_string(),
                "score" => self.score.map(|s| s.to_string()).unwrap_or_default(),
                _ => String::new(),
            }
        }

        fn search_text(&self) -> String {
            self.code.to_lowercase()
        }

        fn detail_lines(&self) -> Vec<String> {
            Vec::new()
        }

        fn columns() -> &'static [Column] {
            &ITEM_COLUMNS
        }

        fn title() -> &'static str {
            "Items"
        }
    }

    fn item(id: RecordId, code: &'static str) -> Item {
        Item { id, code, score: None }
    }

    fn scored(id: RecordId, code: &'static str, score: f64) -> Item {
        Item { id, code, score: Some(score) }
    }

    fn ids<R: Record>(rows: &[&R]) -> Vec<RecordId> {
        rows.iter().map(|r| r.id()).collect()
    }

    fn seven_items() -> Vec<Item> {
        vec![
            item(1, "CS101"),
            item(2, "MATH201"),
            item(3, "PHY301"),
            item(4, "ENG102"),
            item(5, "CHEM202"),
            item(6, "BIO110"),
            item(7, "HIST210"),
        ]
    }

    #[test]
    fn empty_query_returns_all_in_input_order() {
        let items = seven_items();
        let rows = filter(&items, "");
        assert_eq!(ids(&rows), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn any_substring_of_search_text_matches() {
        let items = seven_items();
        // Every substring of "math201" keeps record 2 in the result.
        let text = "math201";
        for start in 0..text.len() {
            for end in start + 1..=text.len() {
                let rows = filter(&items, &text[start..end]);
                assert!(
                    rows.iter().any(|r| r.id() == 2),
                    "query {:?} lost the record",
                    &text[start..end]
                );
            }
        }
    }

    #[test]
    fn filtering_is_case_insensitive() {
        let items = seven_items();
        assert_eq!(ids(&filter(&items, "cHeM")), vec![5]);
        assert_eq!(ids(&filter(&items, "ZZZ")), Vec::<RecordId>::new());
    }

    #[test]
    fn sort_example_ascending_and_descending() {
        // records [{id:1,code:"B"},{id:2,code:"A"}]
        let items = vec![item(1, "B"), item(2, "A")];
        let mut rows: Vec<&Item> = items.iter().collect();
        sort_records(&mut rows, "code", SortOrder::Ascending);
        assert_eq!(ids(&rows), vec![2, 1]);
        sort_records(&mut rows, "code", SortOrder::Descending);
        assert_eq!(ids(&rows), vec![1, 2]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let items = seven_items();
        let mut rows: Vec<&Item> = items.iter().collect();
        sort_records(&mut rows, "code", SortOrder::Ascending);
        let once = ids(&rows);
        sort_records(&mut rows, "code", SortOrder::Ascending);
        assert_eq!(ids(&rows), once);
    }

    #[test]
    fn descending_keeps_tie_order() {
        // Three records share a code; the comparator is inverted rather than
        // the output reversed, so 1,2,3 stay in input order both ways.
        let items = vec![item(1, "X"), item(2, "X"), item(3, "X"), item(4, "A")];
        let mut rows: Vec<&Item> = items.iter().collect();
        sort_records(&mut rows, "code", SortOrder::Ascending);
        assert_eq!(ids(&rows), vec![4, 1, 2, 3]);
        sort_records(&mut rows, "code", SortOrder::Descending);
        assert_eq!(ids(&rows), vec![1, 2, 3, 4]);
    }

    #[test]
    fn missing_fields_sort_last_both_directions() {
        let items = vec![scored(1, "a", 2.0), item(2, "b"), scored(3, "c", 1.0)];
        let mut rows: Vec<&Item> = items.iter().collect();
        sort_records(&mut rows, "score", SortOrder::Ascending);
        assert_eq!(ids(&rows), vec![3, 1, 2]);
        sort_records(&mut rows, "score", SortOrder::Descending);
        assert_eq!(ids(&rows), vec![1, 3, 2]);
    }

    #[test]
    fn request_sort_cycles_direction_on_same_key() {
        let mut state = TableState::new(Item::columns());
        assert_eq!(state.order_by(), "code");
        assert_eq!(state.order(), SortOrder::Ascending);
        state.request_sort("code");
        assert_eq!(state.order(), SortOrder::Descending);
        state.request_sort("code");
        assert_eq!(state.order(), SortOrder::Ascending);
    }

    #[test]
    fn request_sort_resets_to_ascending_on_new_key() {
        let mut state = TableState::new(Item::columns());
        state.request_sort("code"); // now descending
        state.request_sort("score");
        assert_eq!(state.order_by(), "score");
        assert_eq!(state.order(), SortOrder::Ascending);
    }

    #[test]
    fn select_all_then_clear_returns_to_empty() {
        let items = seven_items();
        let mut state = TableState::new(Item::columns());
        state.toggle_all(true, state.filtered_ids(&items));
        assert_eq!(state.selected_count(), 7);
        state.toggle_all(false, state.filtered_ids(&items));
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn deselecting_one_after_select_all() {
        let items = seven_items();
        let mut state = TableState::new(Item::columns());
        state.toggle_all(true, state.filtered_ids(&items));
        state.toggle_one(3);
        assert_eq!(state.selected_count(), items.len() - 1);
        assert!(!state.is_selected(3));
        assert!(state.is_selected(1));
    }

    #[test]
    fn select_all_covers_filtered_set_not_just_page() {
        let items = seven_items();
        let mut state = TableState::new(Item::columns());
        state.set_search("1"); // CS101, MATH201, PHY301, ENG102, BIO110, HIST210
        let matching = state.filtered_ids(&items);
        assert!(matching.len() > state.rows_per_page());
        state.toggle_all(true, matching.clone());
        assert_eq!(state.selected_count(), matching.len());
    }

    #[test]
    fn search_change_resets_page() {
        let items = seven_items();
        let mut state = TableState::new(Item::columns());
        state.next_page(items.len());
        assert_eq!(state.page(), 1);
        state.set_search("cs");
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn rows_per_page_change_resets_page() {
        let mut state = TableState::new(Item::columns());
        state.next_page(100);
        assert_eq!(state.page(), 1);
        state.set_rows_per_page(10);
        assert_eq!(state.page(), 0);
        state.next_page(100);
        state.set_rows_per_page(10); // unchanged size keeps the page
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn cycle_rows_per_page_walks_the_options() {
        let mut state = TableState::new(Item::columns());
        assert_eq!(state.rows_per_page(), 5);
        state.cycle_rows_per_page();
        assert_eq!(state.rows_per_page(), 10);
        state.cycle_rows_per_page();
        assert_eq!(state.rows_per_page(), 25);
        state.cycle_rows_per_page();
        assert_eq!(state.rows_per_page(), 5);
    }

    #[test]
    fn second_page_of_seven_records() {
        // 7 records, 5 per page, page 1: two rows and three padding rows.
        let items = seven_items();
        let mut state = TableState::new(Item::columns());
        state.next_page(items.len());
        let page = state.page_view(&items);
        assert_eq!(page.total_matching, 7);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.empty_rows, 3);
    }

    #[test]
    fn first_page_never_pads() {
        let items = vec![item(1, "A"), item(2, "B")];
        let state = TableState::new(Item::columns());
        let page = state.page_view(&items);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.empty_rows, 0);
    }

    #[test]
    fn next_page_stops_at_the_last_page() {
        let items = seven_items();
        let mut state = TableState::new(Item::columns());
        state.next_page(items.len());
        state.next_page(items.len());
        assert_eq!(state.page(), 1);
        state.prev_page();
        state.prev_page();
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn page_view_orders_then_slices() {
        let items = seven_items();
        let state = TableState::new(Item::columns());
        let page = state.page_view(&items);
        // Ascending by code: BIO110, CHEM202, CS101, ENG102, HIST210
        assert_eq!(ids(&page.rows), vec![6, 5, 1, 4, 7]);
    }

    #[test]
    fn expansion_defaults_false_and_toggles() {
        let mut state = TableState::new(Item::columns());
        assert!(!state.is_expanded(1));
        state.toggle_expand(1);
        assert!(state.is_expanded(1));
        state.toggle_expand(1);
        assert!(!state.is_expanded(1));
    }

    #[test]
    fn expansion_is_retained_across_filtering() {
        let items = seven_items();
        let mut state = TableState::new(Item::columns());
        state.toggle_expand(2);
        state.set_search("cs"); // record 2 no longer matches
        assert!(ids(&state.page_view(&items).rows).iter().all(|&id| id != 2));
        state.set_search("");
        assert!(state.is_expanded(2));
    }

    #[test]
    fn selection_survives_record_set_replacement() {
        // Observed source behavior: a reload does not prune selected ids.
        let items = seven_items();
        let mut state = TableState::new(Item::columns());
        state.toggle_one(6);
        state.toggle_one(7);
        state.records_replaced();
        let shrunk = vec![item(1, "CS101")];
        let _ = state.page_view(&shrunk);
        assert_eq!(state.selected_count(), 2);
        assert!(state.is_selected(7));
    }

    #[test]
    fn cursor_clamps_to_page() {
        let mut state = TableState::new(Item::columns());
        state.move_cursor(3, 5);
        assert_eq!(state.cursor(), 3);
        state.move_cursor(10, 5);
        assert_eq!(state.cursor(), 4);
        state.move_cursor(-10, 5);
        assert_eq!(state.cursor(), 0);
        state.move_cursor(1, 0);
        assert_eq!(state.cursor(), 0);
    }
}
