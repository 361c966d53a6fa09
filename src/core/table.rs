//! Headless table engine: column definitions plus filter, sort and pagination state.
//!
//! Rows flow through a fixed pipeline of core -> filtered -> sorted -> paginated.
//! A table built with [`RowModel::Core`] skips every stage after core.

use anyhow::{Result, bail};
use std::cmp::Ordering;
use std::fmt::Display;

pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Null,
}

impl CellValue {
    /// Lower-cased string form used by the global filter. `Null` has none.
    fn filter_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.to_lowercase()),
            CellValue::Number(n) => Some(n.to_string().to_lowercase()),
            CellValue::Null => None,
        }
    }

    fn sort_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (CellValue::Null, _) => Ordering::Greater,
            (_, CellValue::Null) => Ordering::Less,
            (CellValue::Number(a), CellValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (a, b) => compare_alphanumeric(&a.to_string(), &b.to_string()),
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

pub struct Column<T> {
    pub id: &'static str,
    pub header: &'static str,
    pub accessor: fn(&T) -> CellValue,
}

impl<T> Column<T> {
    pub fn new(id: &'static str, header: &'static str, accessor: fn(&T) -> CellValue) -> Self {
        Self {
            id,
            header,
            accessor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn marker(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub column: &'static str,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    pub sorting: Option<ColumnSort>,
    pub global_filter: String,
    pub pagination: Pagination,
}

/// Which stages of the row pipeline a table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowModel {
    /// Rows exactly as loaded.
    Core,
    /// Filtered, sorted and paginated rows.
    Full,
}

/// A row produced by the pipeline.
#[derive(Debug)]
pub struct Row<'a, T> {
    /// Position of the row in the loaded data.
    pub index: usize,
    pub original: &'a T,
    pub cells: Vec<CellValue>,
}

pub struct Table<T> {
    columns: Vec<Column<T>>,
    data: Vec<T>,
    state: TableState,
    row_model: RowModel,
}

impl<T> Table<T> {
    pub fn new(columns: Vec<Column<T>>, row_model: RowModel) -> Self {
        Self {
            columns,
            data: Vec::new(),
            state: TableState::default(),
            row_model,
        }
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Replaces the loaded rows wholesale and returns to the first page.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.state.pagination.page_index = 0;
    }

    pub fn set_global_filter(&mut self, filter: impl Into<String>) {
        self.state.global_filter = filter.into();
        self.state.pagination.page_index = 0;
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.id.eq_ignore_ascii_case(column_id))
    }

    /// Cycles the sort of a column: first direction, then the reverse, then unsorted.
    ///
    /// The first direction is ascending for text columns and descending for numeric
    /// ones, judged by the column's value in the first filtered row.
    pub fn toggle_sorting(&mut self, column_id: &str) -> Result<()> {
        let Some(col) = self.column_index(column_id) else {
            bail!("Unknown column: {column_id}");
        };
        let column = self.columns[col].id;
        let first = self.first_sort_direction(col);

        self.state.sorting = match &self.state.sorting {
            Some(sort) if sort.column == column => {
                if sort.direction == first {
                    Some(ColumnSort {
                        column,
                        direction: first.reversed(),
                    })
                } else {
                    None
                }
            }
            _ => Some(ColumnSort {
                column,
                direction: first,
            }),
        };
        self.state.pagination.page_index = 0;
        Ok(())
    }

    pub fn set_sorting(&mut self, column_id: &str, direction: SortDirection) -> Result<()> {
        let Some(col) = self.column_index(column_id) else {
            bail!("Unknown column: {column_id}");
        };
        self.state.sorting = Some(ColumnSort {
            column: self.columns[col].id,
            direction,
        });
        self.state.pagination.page_index = 0;
        Ok(())
    }

    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.state
            .sorting
            .as_ref()
            .filter(|s| s.column == column_id)
            .map(|s| s.direction)
    }

    /// Header text with the direction marker of a sorted column appended.
    pub fn header_label(&self, column: &Column<T>) -> String {
        match self.sort_direction(column.id) {
            Some(direction) => format!("{} {}", column.header, direction.marker()),
            None => column.header.to_string(),
        }
    }

    /// Changes the page size, keeping the first visible row on the new page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            bail!("Page size must be greater than zero");
        }
        let pagination = &mut self.state.pagination;
        let top_row = pagination.page_index * pagination.page_size;
        pagination.page_index = top_row / page_size;
        pagination.page_size = page_size;
        Ok(())
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        let max_index = self.page_count().saturating_sub(1);
        self.state.pagination.page_index = page_index.min(max_index);
    }

    pub fn page_count(&self) -> usize {
        self.pre_pagination_rows()
            .len()
            .div_ceil(self.state.pagination.page_size)
    }

    pub fn can_previous_page(&self) -> bool {
        self.state.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.state.pagination.page_index + 1 < self.page_count()
    }

    /// Moves back one page. Returns false when already on the first page.
    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous_page() {
            return false;
        }
        self.state.pagination.page_index -= 1;
        true
    }

    /// Moves forward one page. Returns false when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.can_next_page() {
            return false;
        }
        self.state.pagination.page_index += 1;
        true
    }

    pub fn core_rows(&self) -> Vec<Row<'_, T>> {
        self.data
            .iter()
            .enumerate()
            .map(|(index, original)| Row {
                index,
                original,
                cells: self.columns.iter().map(|c| (c.accessor)(original)).collect(),
            })
            .collect()
    }

    pub fn filtered_rows(&self) -> Vec<Row<'_, T>> {
        let rows = self.core_rows();
        if self.row_model == RowModel::Core || self.state.global_filter.is_empty() {
            return rows;
        }
        let needle = self.state.global_filter.to_lowercase();
        rows.into_iter()
            .filter(|row| row_matches(&row.cells, &needle))
            .collect()
    }

    /// Filtered and sorted rows, before pagination.
    pub fn pre_pagination_rows(&self) -> Vec<Row<'_, T>> {
        let mut rows = self.filtered_rows();
        if self.row_model == RowModel::Core {
            return rows;
        }
        if let Some(sort) = &self.state.sorting {
            if let Some(col) = self.column_index(sort.column) {
                rows.sort_by(|a, b| {
                    let ordering = a.cells[col].sort_cmp(&b.cells[col]);
                    match sort.direction {
                        SortDirection::Ascending => ordering,
                        SortDirection::Descending => ordering.reverse(),
                    }
                });
            }
        }
        rows
    }

    /// Rows to display: the current page, or every row for a core-only table.
    pub fn rows(&self) -> Vec<Row<'_, T>> {
        let rows = self.pre_pagination_rows();
        if self.row_model == RowModel::Core {
            return rows;
        }
        let Pagination {
            page_index,
            page_size,
        } = self.state.pagination;
        rows.into_iter()
            .skip(page_index * page_size)
            .take(page_size)
            .collect()
    }

    fn first_sort_direction(&self, col: usize) -> SortDirection {
        let first_value = self
            .filtered_rows()
            .into_iter()
            .next()
            .map(|row| row.cells[col].clone());
        match first_value {
            Some(CellValue::Text(_)) => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }
}

/// A row matches when any cell's lower-cased text contains the lower-cased needle.
fn row_matches(cells: &[CellValue], needle: &str) -> bool {
    cells
        .iter()
        .filter_map(CellValue::filter_text)
        .any(|text| text.contains(needle))
}

#[derive(Debug, PartialEq)]
enum Chunk<'a> {
    Text(&'a str),
    Digits(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_digits = None;
    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                chunks.push(chunk(&s[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        chunks.push(chunk(&s[start..], prev));
    }
    chunks
}

fn chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits { Chunk::Digits(s) } else { Chunk::Text(s) }
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Case-insensitive natural ordering: digit runs compare by numeric value and
/// text runs sort before digit runs.
fn compare_alphanumeric(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let a_chunks = chunks(&a);
    let b_chunks = chunks(&b);

    for (x, y) in a_chunks.iter().zip(b_chunks.iter()) {
        let ordering = match (x, y) {
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Digits(x), Chunk::Digits(y)) => compare_digits(x, y),
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Less,
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a_chunks.len().cmp(&b_chunks.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Holding {
        id: i64,
        label: Option<&'static str>,
    }

    fn columns() -> Vec<Column<Holding>> {
        vec![
            Column::new("id", "Id", |h: &Holding| h.id.into()),
            Column::new("label", "Label", |h: &Holding| h.label.into()),
        ]
    }

    fn holdings(n: i64) -> Vec<Holding> {
        (1..=n)
            .map(|id| Holding {
                id,
                label: Some(if id % 2 == 0 { "Even" } else { "Odd" }),
            })
            .collect()
    }

    fn table(n: i64) -> Table<Holding> {
        let mut table = Table::new(columns(), RowModel::Full);
        table.set_data(holdings(n));
        table
    }

    fn ids(rows: &[Row<'_, Holding>]) -> Vec<i64> {
        rows.iter().map(|r| r.original.id).collect()
    }

    #[test]
    fn test_empty_filter_matches_every_row() {
        let mut table = table(5);
        table.set_data(vec![
            Holding { id: 1, label: None },
            Holding {
                id: 2,
                label: Some("Odd"),
            },
        ]);
        table.set_global_filter("");
        assert_eq!(table.filtered_rows().len(), 2);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut table = table(5);
        table.set_global_filter("EVE");
        assert_eq!(ids(&table.filtered_rows()), vec![2, 4]);
    }

    #[test]
    fn test_filter_matches_numeric_cells() {
        let mut table = table(12);
        table.set_global_filter("1");
        assert_eq!(ids(&table.filtered_rows()), vec![1, 10, 11, 12]);
    }

    #[test]
    fn test_null_cells_never_match() {
        let mut table = Table::new(
            vec![Column::new("label", "Label", |h: &Holding| h.label.into())],
            RowModel::Full,
        );
        table.set_data(vec![
            Holding { id: 1, label: None },
            Holding {
                id: 2,
                label: Some("null"),
            },
        ]);
        table.set_global_filter("null");
        assert_eq!(ids(&table.filtered_rows()), vec![2]);
    }

    #[test]
    fn test_core_row_model_ignores_state() {
        let mut table = Table::new(columns(), RowModel::Core);
        table.set_data(holdings(25));
        table.set_global_filter("even");
        table.toggle_sorting("id").unwrap();
        assert_eq!(table.rows().len(), 25);
        assert_eq!(table.rows()[0].original.id, 1);
    }

    #[test]
    fn test_toggle_sorting_cycles_numeric_column() {
        let mut table = table(3);

        table.toggle_sorting("id").unwrap();
        assert_eq!(table.sort_direction("id"), Some(SortDirection::Descending));
        assert_eq!(ids(&table.rows()), vec![3, 2, 1]);

        table.toggle_sorting("id").unwrap();
        assert_eq!(table.sort_direction("id"), Some(SortDirection::Ascending));
        assert_eq!(ids(&table.rows()), vec![1, 2, 3]);

        table.toggle_sorting("id").unwrap();
        assert_eq!(table.sort_direction("id"), None);
    }

    #[test]
    fn test_toggle_sorting_text_column_starts_ascending() {
        let mut table = table(4);
        table.toggle_sorting("Label").unwrap();
        assert_eq!(
            table.sort_direction("label"),
            Some(SortDirection::Ascending)
        );
        // Stable: ties keep their loaded order.
        assert_eq!(ids(&table.rows()), vec![2, 4, 1, 3]);
        assert_eq!(table.header_label(&table.columns()[1]), "Label ▲");
        assert_eq!(table.header_label(&table.columns()[0]), "Id");
    }

    #[test]
    fn test_sorting_another_column_replaces_sort() {
        let mut table = table(4);
        table.toggle_sorting("id").unwrap();
        table.toggle_sorting("label").unwrap();
        assert_eq!(table.sort_direction("id"), None);
        assert!(table.sort_direction("label").is_some());
    }

    #[test]
    fn test_toggle_unknown_column_fails() {
        let mut table = table(2);
        let err = table.toggle_sorting("missing").unwrap_err();
        assert!(err.to_string().contains("Unknown column"));
    }

    #[test]
    fn test_alphanumeric_ordering() {
        assert_eq!(compare_alphanumeric("item 2", "Item 10"), Ordering::Less);
        assert_eq!(compare_alphanumeric("1.5M", "999"), Ordering::Less);
        assert_eq!(compare_alphanumeric("2,000", "2,000"), Ordering::Equal);
        assert_eq!(compare_alphanumeric("abc", "12"), Ordering::Less);
        assert_eq!(compare_alphanumeric("a", "a1"), Ordering::Less);
    }

    #[test]
    fn test_pagination_controls() {
        let mut table = table(25);
        assert_eq!(table.page_count(), 3);
        assert!(!table.can_previous_page());
        assert!(table.can_next_page());
        assert_eq!(table.rows().len(), 10);

        assert!(table.next_page());
        assert!(table.next_page());
        assert_eq!(table.state().pagination.page_index, 2);
        assert!(table.can_previous_page());
        assert!(!table.can_next_page());
        assert_eq!(ids(&table.rows()), vec![21, 22, 23, 24, 25]);

        assert!(!table.next_page());
        assert_eq!(table.state().pagination.page_index, 2);
    }

    #[test]
    fn test_previous_is_noop_on_first_page() {
        let mut table = table(25);
        assert!(!table.previous_page());
        assert_eq!(table.state().pagination.page_index, 0);
    }

    #[test]
    fn test_page_size_rederives_page_count() {
        let mut table = table(45);
        for size in PAGE_SIZES {
            table.set_page_size(size).unwrap();
            assert_eq!(table.page_count(), 45usize.div_ceil(size));
        }
        assert!(table.set_page_size(0).is_err());
    }

    #[test]
    fn test_page_size_keeps_top_row_visible() {
        let mut table = table(50);
        table.set_page_index(3);
        assert_eq!(table.rows()[0].original.id, 31);

        table.set_page_size(20).unwrap();
        assert_eq!(table.state().pagination.page_index, 1);
        assert_eq!(table.rows()[0].original.id, 21);
    }

    #[test]
    fn test_filter_resets_to_first_page() {
        let mut table = table(30);
        table.next_page();
        table.set_global_filter("odd");
        assert_eq!(table.state().pagination.page_index, 0);
        assert_eq!(table.page_count(), 2);
    }

    #[test]
    fn test_sorting_resets_to_first_page() {
        let mut table = table(25);
        table.next_page();
        table.next_page();
        assert_eq!(table.state().pagination.page_index, 2);

        table.toggle_sorting("id").unwrap();
        assert_eq!(table.state().pagination.page_index, 0);
        assert_eq!(ids(&table.rows())[0], 25);

        table.next_page();
        table.set_sorting("label", SortDirection::Ascending).unwrap();
        assert_eq!(table.state().pagination.page_index, 0);
    }

    #[test]
    fn test_empty_table_has_no_pages() {
        let table = table(0);
        assert_eq!(table.page_count(), 0);
        assert!(!table.can_previous_page());
        assert!(!table.can_next_page());
        assert!(table.rows().is_empty());
    }

    #[test]
    fn test_set_page_index_is_clamped() {
        let mut table = table(15);
        table.set_page_index(9);
        assert_eq!(table.state().pagination.page_index, 1);
    }
}
