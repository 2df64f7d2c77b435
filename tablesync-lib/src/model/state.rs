//! The coordinator's working state.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::ColumnFilter;
use super::ColumnSort;
use super::FilterFields;
use super::FilterKind;
use super::FilterValue;
use super::Pagination;

/// Selected rows, keyed by row id. Not synchronized to the URL.
pub type RowSelection = BTreeMap<String, bool>;

/// Column visibility overrides, keyed by column id. Not synchronized to the URL.
pub type ColumnVisibility = BTreeMap<String, bool>;

/// Defaults applied when the URL does not say otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialState {
    /// Sort used when the URL has no `sort` key.
    pub sorting: Option<ColumnSort>,
    /// Page size (and index) used when the URL has no pagination keys.
    pub pagination: Option<Pagination>,
}

impl InitialState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default sort.
    pub fn with_sorting(mut self, sort: ColumnSort) -> Self {
        self.sorting = Some(sort);
        self
    }

    /// Sets the default pagination.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Pagination, sorting, and filter state of one mounted table.
///
/// The URL query string is the serialized form of `pagination`, `sorting`,
/// and `column_filters`. `row_selection` and `column_visibility` are local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQueryState {
    pub pagination: Pagination,
    pub sorting: Vec<ColumnSort>,
    pub column_filters: Vec<ColumnFilter>,
    #[serde(default)]
    pub row_selection: RowSelection,
    #[serde(default)]
    pub column_visibility: ColumnVisibility,
}

impl TableQueryState {
    /// Creates an unsorted, unfiltered state.
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            sorting: Vec::new(),
            column_filters: Vec::new(),
            row_selection: RowSelection::new(),
            column_visibility: ColumnVisibility::new(),
        }
    }

    /// Returns the primary sort, if any.
    pub fn sort(&self) -> Option<&ColumnSort> {
        self.sorting.first()
    }

    /// Returns the filter value of a column.
    pub fn filter(&self, column_id: &str) -> Option<&FilterValue> {
        self.column_filters
            .iter()
            .find(|f| f.column_id == column_id)
            .map(|f| &f.value)
    }

    /// Inserts or replaces a column's filter. Empty values remove it.
    ///
    /// Returns `true` if the filters changed.
    pub fn set_filter(&mut self, filter: ColumnFilter) -> bool {
        if filter.value.is_empty() {
            return self.remove_filter(&filter.column_id);
        }
        match self
            .column_filters
            .iter_mut()
            .find(|f| f.column_id == filter.column_id)
        {
            Some(existing) if existing.value == filter.value => false,
            Some(existing) => {
                existing.value = filter.value;
                true
            }
            None => {
                self.column_filters.push(filter);
                true
            }
        }
    }

    /// Removes a column's filter. Returns `true` if one was present.
    pub fn remove_filter(&mut self, column_id: &str) -> bool {
        let before = self.column_filters.len();
        self.column_filters.retain(|f| f.column_id != column_id);
        self.column_filters.len() != before
    }

    /// Returns the active filters of the given kind, in the order the
    /// fields were declared.
    ///
    /// The result does not depend on the order filters were set in, so two
    /// states with the same filters compare equal.
    pub fn filters_of_kind(&self, fields: &FilterFields, kind: FilterKind) -> Vec<ColumnFilter> {
        let declared = match kind {
            FilterKind::Searchable => fields.searchable(),
            FilterKind::Facet => fields.facets(),
        };
        declared
            .iter()
            .filter_map(|field| {
                self.column_filters
                    .iter()
                    .find(|f| f.column_id == field.column_id)
            })
            .cloned()
            .collect()
    }

    /// Returns `true` if the row is selected.
    pub fn is_row_selected(&self, row_id: &str) -> bool {
        self.row_selection.get(row_id).copied().unwrap_or(false)
    }

    /// Returns `true` unless the column was explicitly hidden.
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.column_visibility.get(column_id).copied().unwrap_or(true)
    }
}
