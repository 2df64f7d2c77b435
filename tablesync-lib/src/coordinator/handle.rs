//! The render-ready table handle.

use crate::model::ColumnSort;
use crate::model::FilterValue;
use crate::model::PageCount;
use crate::model::SortDirection;
use crate::model::TableQueryState;

/// Column definition passed through to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub id: String,
    pub header: String,
    /// Whether the column header toggles sorting.
    pub sortable: bool,
    /// Whether the column can be hidden from the view options.
    pub hideable: bool,
}

impl ColumnDef {
    /// Creates a sortable, hideable column.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            sortable: true,
            hideable: true,
        }
    }

    /// Enables or disables sorting on this column.
    pub fn with_sorting(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Enables or disables hiding this column.
    pub fn with_hiding(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }
}

/// Options handed to the rendering layer.
///
/// Pagination, sorting, and filtering are always manual: rows arrive already
/// paged, sorted, and filtered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub manual_pagination: bool,
    pub manual_sorting: bool,
    pub manual_filtering: bool,
    pub page_count: PageCount,
}

impl TableOptions {
    pub(crate) fn manual(page_count: PageCount) -> Self {
        Self {
            manual_pagination: true,
            manual_sorting: true,
            manual_filtering: true,
            page_count,
        }
    }
}

/// A snapshot of the table, ready to render.
///
/// Borrowed from a [`TableCoordinator`](super::TableCoordinator); take a new
/// one after every state change or fetch.
#[derive(Debug)]
pub struct TableHandle<'a, T> {
    state: TableQueryState,
    options: TableOptions,
    columns: &'a [ColumnDef],
    rows: &'a [T],
}

impl<'a, T> TableHandle<'a, T> {
    pub(crate) fn new(
        state: TableQueryState,
        options: TableOptions,
        columns: &'a [ColumnDef],
        rows: &'a [T],
    ) -> Self {
        Self {
            state,
            options,
            columns,
            rows,
        }
    }

    /// Returns the state: pagination, sorting, filters, visibility, selection.
    pub fn state(&self) -> &TableQueryState {
        &self.state
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns every column definition.
    pub fn columns(&self) -> &'a [ColumnDef] {
        self.columns
    }

    /// Returns the columns that should be rendered.
    ///
    /// Columns that cannot be hidden are always visible.
    pub fn visible_columns(&self) -> Vec<&'a ColumnDef> {
        self.columns
            .iter()
            .filter(|c| !c.hideable || self.state.is_column_visible(&c.id))
            .collect()
    }

    /// Returns the rows of the current page.
    pub fn rows(&self) -> &'a [T] {
        self.rows
    }

    pub fn page_count(&self) -> PageCount {
        self.options.page_count
    }

    /// Returns the 1-based page number.
    pub fn page_number(&self) -> u32 {
        self.state.pagination.page_number()
    }

    pub fn can_previous_page(&self) -> bool {
        self.state.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.options
            .page_count
            .has_page_after(self.state.pagination.page_index)
    }

    /// Returns the sort direction of a column, if it is sorted.
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.state
            .sorting
            .iter()
            .find(|s| s.column_id == column_id)
            .map(ColumnSort::direction)
    }

    /// Returns the filter value of a column, if filtered.
    pub fn filter_value(&self, column_id: &str) -> Option<&FilterValue> {
        self.state.filter(column_id)
    }

    pub fn is_row_selected(&self, row_id: &str) -> bool {
        self.state.is_row_selected(row_id)
    }

    /// Returns the ids of all selected rows.
    pub fn selected_row_ids(&self) -> Vec<&str> {
        self.state
            .row_selection
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}
