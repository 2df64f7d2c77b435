//! The table state coordinator.
//!
//! A [`TableCoordinator`] owns the query state of one mounted table and keeps
//! it in sync with the location's query string:
//!
//! - pagination and sorting changes are written immediately
//! - facet filter changes are written immediately and return to page 1
//! - searchable filter changes are debounced; once the searchable filters
//!   have been quiet for the debounce window, the settled values are written
//!   and the table returns to page 1
//!
//! Every write is a single replace navigation without scrolling.

mod builder;
mod handle;

pub use builder::Missing;
pub use builder::Set;
pub use builder::TableCoordinatorBuilder;
pub use handle::ColumnDef;
pub use handle::TableHandle;
pub use handle::TableOptions;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::Weak;

use log::debug;
use log::trace;

use crate::config::PageSizePolicy;
use crate::config::TableConfig;
use crate::error::Error;
use crate::error::FilterError;
use crate::location::Location;
use crate::location::NavigateOptions;
use crate::model::ColumnFilter;
use crate::model::ColumnSort;
use crate::model::ColumnVisibility;
use crate::model::FilterField;
use crate::model::FilterFields;
use crate::model::FilterKind;
use crate::model::FilterValue;
use crate::model::InitialState;
use crate::model::PageCount;
use crate::model::Pagination;
use crate::model::RowSelection;
use crate::model::SortDirection;
use crate::model::TableQueryState;
use crate::query::SearchParams;
use crate::query::codec;
use crate::query::join_href;
use crate::schedule::Debouncer;
use crate::schedule::Scheduler;
use crate::source::RemoteQuery;

/// Debounce key for the searchable filter snapshot.
const SEARCH_SETTLE: &str = "searchable-filters";

/// Everything the builder collected, consumed by [`TableCoordinator::mount`].
pub(crate) struct Mount<T> {
    pub location: Arc<dyn Location>,
    pub scheduler: Arc<dyn Scheduler>,
    pub config: TableConfig,
    pub filter_fields: Vec<FilterField>,
    pub initial_state: InitialState,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<T>,
    pub page_count: PageCount,
}

/// Shared between the coordinator and its pending settle task.
struct Inner {
    config: TableConfig,
    fields: FilterFields,
    location: Arc<dyn Location>,
    debouncer: Debouncer<&'static str>,
    state: TableQueryState,
    /// Pagination and sorting as last written to the URL.
    synced_pagination: Pagination,
    synced_sorting: Vec<ColumnSort>,
    /// Searchable filters as of the last completed debounce window.
    settled_search: Vec<ColumnFilter>,
    /// JSON snapshot of `settled_search`.
    settled_key: String,
    /// Facet filters as last written to the URL.
    applied_facets: Vec<ColumnFilter>,
    /// Bumped on every searchable change; a settle task only applies if
    /// it still carries the latest generation.
    search_generation: u64,
}

impl Inner {
    fn current_params(&self) -> SearchParams {
        SearchParams::parse(&self.location.search())
    }

    fn replace(&self, params: &SearchParams) {
        let href = join_href(&self.location.pathname(), params);
        debug!("replacing location with {}", href);
        self.location.navigate(&href, NavigateOptions::replace());
    }

    /// Writes pagination and sorting if they differ from what was last written.
    fn sync_pagination(&mut self) -> bool {
        if self.state.pagination == self.synced_pagination
            && self.state.sorting == self.synced_sorting
        {
            return false;
        }
        let mut params = self.current_params();
        codec::write_pagination(
            &mut params,
            &self.state.pagination,
            &self.state.sorting,
            &self.config,
        );
        self.replace(&params);
        self.synced_pagination = self.state.pagination;
        self.synced_sorting = self.state.sorting.clone();
        true
    }

    /// The "filters changed" effect: rewrite the filter keys and go to page 1.
    fn apply_filters(&mut self) {
        let mut params = self.current_params();
        codec::write_filters(
            &mut params,
            &self.settled_search,
            &self.applied_facets,
            &self.fields,
            &self.config,
        );
        self.state.pagination.page_index = 0;
        self.replace(&params);
        self.synced_pagination.page_index = 0;
    }

    fn searchable_filters(&self) -> Vec<ColumnFilter> {
        self.state.filters_of_kind(&self.fields, FilterKind::Searchable)
    }

    fn facet_filters(&self) -> Vec<ColumnFilter> {
        self.state.filters_of_kind(&self.fields, FilterKind::Facet)
    }

    fn facets_changed(&mut self) -> bool {
        let facets = self.facet_filters();
        if facets == self.applied_facets {
            return false;
        }
        debug!("facet filters changed to {:?}", facets);
        self.applied_facets = facets;
        self.apply_filters();
        true
    }

    /// Restarts the debounce window for the current searchable filters.
    fn schedule_settle(&mut self, this: Weak<Mutex<Inner>>) {
        let snapshot = self.searchable_filters();
        self.search_generation += 1;
        let generation = self.search_generation;
        trace!("searchable filters changed, settling generation {}", generation);

        self.debouncer.call(
            SEARCH_SETTLE,
            Box::new(move || {
                let Some(inner) = this.upgrade() else {
                    return;
                };
                let mut inner = lock(&inner);
                if inner.search_generation != generation {
                    trace!("discarding superseded settle {}", generation);
                    return;
                }
                inner.settle_search(snapshot);
            }),
        );
    }

    fn settle_search(&mut self, snapshot: Vec<ColumnFilter>) -> bool {
        let key = snapshot_key(&snapshot);
        if key == self.settled_key {
            trace!("searchable filters settled unchanged");
            return false;
        }
        debug!("searchable filters settled to {}", key);
        self.settled_key = key;
        self.settled_search = snapshot;
        self.apply_filters();
        true
    }

    fn checked_kind(&self, column_id: &str) -> Result<FilterKind, FilterError> {
        self.fields
            .kind_of(column_id)
            .ok_or_else(|| FilterError::UnknownColumn(column_id.to_string()))
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Filters come from `filters_of_kind` in declaration order, so the key
/// does not change when the same filters were set in a different order.
fn snapshot_key(filters: &[ColumnFilter]) -> String {
    serde_json::to_string(filters).unwrap_or_default()
}

/// Coordinates the query state of one mounted table.
///
/// Constructed with [`TableCoordinator::builder`]. Dropping the coordinator
/// unmounts it: a pending debounce is cancelled and never touches the
/// location afterwards.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use tablesync_lib::TableCoordinator;
/// use tablesync_lib::location::{Location, MemoryLocation};
/// use tablesync_lib::model::FilterField;
/// use tablesync_lib::schedule::ManualScheduler;
///
/// let location = Arc::new(MemoryLocation::new("/products?page=4&per_page=10"));
/// let scheduler = ManualScheduler::new();
/// let mut table = TableCoordinator::<()>::builder()
///     .location(Arc::clone(&location))
///     .scheduler(scheduler.clone())
///     .filter_fields([FilterField::searchable("name", "Name")])
///     .mount()
///     .unwrap();
///
/// table.set_search("name", "red shoes").unwrap();
/// scheduler.advance(Duration::from_millis(500));
///
/// assert_eq!(location.search(), "page=1&per_page=10&name=red+shoes");
/// assert_eq!(table.state().pagination.page_index, 0);
/// ```
pub struct TableCoordinator<T> {
    inner: Arc<Mutex<Inner>>,
    columns: Vec<ColumnDef>,
    rows: Vec<T>,
    page_count: PageCount,
}

impl<T> TableCoordinator<T> {
    /// Creates a builder for mounting a coordinator.
    pub fn builder() -> TableCoordinatorBuilder<Missing, Missing, T> {
        TableCoordinatorBuilder::new()
    }

    pub(crate) fn mount(parts: Mount<T>) -> Result<Self, Error> {
        let fields = FilterFields::new(parts.filter_fields)?;
        let params = SearchParams::parse(&parts.location.search());
        let state = codec::decode(&params, &fields, &parts.config, &parts.initial_state);

        let settled_search = state.filters_of_kind(&fields, FilterKind::Searchable);
        let applied_facets = state.filters_of_kind(&fields, FilterKind::Facet);
        debug!(
            "mounted table at {} with page {} ({} per page), {} filter(s)",
            parts.location.pathname(),
            state.pagination.page_number(),
            state.pagination.page_size,
            state.column_filters.len()
        );

        let inner = Inner {
            debouncer: Debouncer::new(parts.scheduler, parts.config.debounce()),
            config: parts.config,
            fields,
            location: parts.location,
            synced_pagination: state.pagination,
            synced_sorting: state.sorting.clone(),
            settled_key: snapshot_key(&settled_search),
            settled_search,
            applied_facets,
            search_generation: 0,
            state,
        };

        Ok(Self {
            inner: Arc::new(Mutex::new(inner)),
            columns: parts.columns,
            rows: parts.rows,
            page_count: parts.page_count,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }

    // -------------------------------------------------------------------------
    // State access
    // -------------------------------------------------------------------------

    /// Returns a snapshot of the working state.
    pub fn state(&self) -> TableQueryState {
        self.lock().state.clone()
    }

    /// Returns the filter field partition.
    pub fn fields(&self) -> FilterFields {
        self.lock().fields.clone()
    }

    /// Returns the configuration.
    pub fn config(&self) -> TableConfig {
        self.lock().config.clone()
    }

    /// Returns the searchable filters as of the last completed debounce window.
    pub fn settled_search(&self) -> Vec<ColumnFilter> {
        self.lock().settled_search.clone()
    }

    /// Returns `true` while a searchable filter change waits for its window.
    pub fn is_settling(&self) -> bool {
        self.lock().debouncer.is_pending(&SEARCH_SETTLE)
    }

    /// Returns the parameters the data source should be queried with.
    ///
    /// Uses the settled searchable filters, so it only changes once typing
    /// has paused.
    pub fn remote_query(&self) -> RemoteQuery {
        let inner = self.lock();
        RemoteQuery::from_parts(
            &inner.state.pagination,
            &inner.state.sorting,
            &inner.settled_search,
            &inner.applied_facets,
        )
    }

    /// Returns the render-ready table handle.
    pub fn table(&self) -> TableHandle<'_, T> {
        TableHandle::new(
            self.state(),
            TableOptions::manual(self.page_count),
            &self.columns,
            &self.rows,
        )
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn page_count(&self) -> PageCount {
        self.page_count
    }

    // -------------------------------------------------------------------------
    // Fetched data
    // -------------------------------------------------------------------------

    /// Sets the total page count.
    pub fn set_page_count(&mut self, page_count: PageCount) {
        self.page_count = page_count;
    }

    /// Stores a fetched page: its rows and the reported total page count.
    pub fn set_data(&mut self, rows: Vec<T>, total_pages: i64) {
        self.rows = rows;
        self.page_count = PageCount::from_total(total_pages);
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Moves to a zero-based page, clamped to the last known page.
    pub fn set_page_index(&mut self, page_index: u32) {
        let page_index = match self.page_count.last_index() {
            Some(last) => page_index.min(last),
            None => page_index,
        };
        let mut inner = self.lock();
        inner.state.pagination.page_index = page_index;
        inner.sync_pagination();
    }

    pub fn first_page(&mut self) {
        self.set_page_index(0);
    }

    /// Moves back one page; does nothing on the first page.
    pub fn previous_page(&mut self) {
        let index = self.lock().state.pagination.page_index;
        if index > 0 {
            self.set_page_index(index - 1);
        }
    }

    /// Moves forward one page; does nothing on the last known page.
    pub fn next_page(&mut self) {
        let index = self.lock().state.pagination.page_index;
        if self.page_count.has_page_after(index) {
            self.set_page_index(index.saturating_add(1));
        }
    }

    /// Moves to the last page; does nothing while the page count is unknown.
    pub fn last_page(&mut self) {
        if let Some(last) = self.page_count.last_index() {
            self.set_page_index(last);
        }
    }

    pub fn can_previous_page(&self) -> bool {
        self.lock().state.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        let index = self.lock().state.pagination.page_index;
        self.page_count.has_page_after(index)
    }

    /// Changes the page size.
    ///
    /// The page index is kept or reset according to the configured
    /// [`PageSizePolicy`].
    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), Error> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize(page_size));
        }
        let mut inner = self.lock();
        if inner.state.pagination.page_size == page_size {
            return Ok(());
        }
        inner.state.pagination.page_size = page_size;
        if inner.config.page_size_policy == PageSizePolicy::ResetToFirst {
            inner.state.pagination.page_index = 0;
        }
        inner.sync_pagination();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    fn check_sortable(&self, column_id: &str) -> Result<(), Error> {
        if self.columns.is_empty() {
            return Ok(());
        }
        match self.columns.iter().find(|c| c.id == column_id) {
            None => Err(Error::UnknownColumn(column_id.to_string())),
            Some(column) if !column.sortable => Err(Error::NotSortable(column_id.to_string())),
            Some(_) => Ok(()),
        }
    }

    /// Replaces the sorting.
    ///
    /// When column definitions were given, every sorted column must exist
    /// and be sortable.
    pub fn set_sorting(&mut self, sorting: Vec<ColumnSort>) -> Result<(), Error> {
        for sort in &sorting {
            self.check_sortable(&sort.column_id)?;
        }
        let mut inner = self.lock();
        inner.state.sorting = sorting;
        inner.sync_pagination();
        Ok(())
    }

    /// Cycles a column through ascending, descending, and unsorted.
    ///
    /// Sorting a new column replaces the previous sort. Returns the
    /// column's new direction.
    pub fn toggle_sort(&mut self, column_id: &str) -> Result<Option<SortDirection>, Error> {
        self.check_sortable(column_id)?;
        let current = self
            .lock()
            .state
            .sort()
            .filter(|s| s.column_id == column_id)
            .map(ColumnSort::direction);
        let next = match current {
            None => Some(ColumnSort::asc(column_id)),
            Some(SortDirection::Asc) => Some(ColumnSort::desc(column_id)),
            Some(SortDirection::Desc) => None,
        };
        let direction = next.as_ref().map(ColumnSort::direction);
        self.set_sorting(next.into_iter().collect())?;
        Ok(direction)
    }

    /// Removes all sorting.
    pub fn clear_sorting(&mut self) {
        let mut inner = self.lock();
        inner.state.sorting.clear();
        inner.sync_pagination();
    }

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------

    /// Sets a searchable filter's text. An empty string clears it.
    ///
    /// The state changes immediately; the URL and the return to page 1
    /// follow once the searchable filters have been quiet for the debounce
    /// window.
    pub fn set_search(&mut self, column_id: &str, text: impl Into<String>) -> Result<(), Error> {
        let weak = Arc::downgrade(&self.inner);
        let mut inner = self.lock();
        if inner.checked_kind(column_id)? != FilterKind::Searchable {
            return Err(FilterError::NotSearchable(column_id.to_string()).into());
        }
        if inner
            .state
            .set_filter(ColumnFilter::search(column_id, text))
        {
            inner.schedule_settle(weak);
        }
        Ok(())
    }

    /// Sets a facet filter's selected options. An empty selection removes
    /// the filter.
    ///
    /// Applied immediately: the URL is rewritten and the table returns to
    /// page 1. Duplicate options are collapsed.
    pub fn set_facet<I, S>(&mut self, column_id: &str, values: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inner = self.lock();
        if inner.checked_kind(column_id)? != FilterKind::Facet {
            return Err(FilterError::NotFacet(column_id.to_string()).into());
        }

        let mut selected: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            let known = inner
                .fields
                .get(column_id)
                .is_some_and(|field| field.has_option(&value));
            if !known {
                return Err(FilterError::UnknownOption {
                    column: column_id.to_string(),
                    value,
                }
                .into());
            }
            if !selected.contains(&value) {
                selected.push(value);
            }
        }

        inner.state.set_filter(ColumnFilter::facet(column_id, selected));
        inner.facets_changed();
        Ok(())
    }

    /// Adds or removes one option of a facet filter. Returns `true` if the
    /// option is now selected.
    pub fn toggle_facet_option(&mut self, column_id: &str, value: &str) -> Result<bool, Error> {
        let mut selected: Vec<String> = self
            .lock()
            .state
            .filter(column_id)
            .and_then(FilterValue::as_facet)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        let now_selected = match selected.iter().position(|v| v == value) {
            Some(index) => {
                selected.remove(index);
                false
            }
            None => {
                selected.push(value.to_string());
                true
            }
        };
        self.set_facet(column_id, selected)?;
        Ok(now_selected)
    }

    /// Clears one column's filter, debounced or immediate by its kind.
    pub fn clear_filter(&mut self, column_id: &str) -> Result<(), Error> {
        let kind = self.lock().checked_kind(column_id)?;
        match kind {
            FilterKind::Searchable => self.set_search(column_id, ""),
            FilterKind::Facet => self.set_facet(column_id, Vec::<String>::new()),
        }
    }

    /// Clears every filter at once.
    ///
    /// Any pending debounce is dropped and the URL is rewritten in a single
    /// navigation.
    pub fn reset_filters(&mut self) {
        let mut inner = self.lock();
        inner.debouncer.cancel(&SEARCH_SETTLE);
        inner.search_generation += 1;
        inner.state.column_filters.clear();

        let had_search = !inner.settled_search.is_empty();
        let had_facets = !inner.applied_facets.is_empty();
        inner.settled_search.clear();
        inner.settled_key = snapshot_key(&[]);
        inner.applied_facets.clear();

        if had_search || had_facets {
            debug!("resetting all filters");
            inner.apply_filters();
        }
    }

    /// Settles pending searchable changes now instead of waiting for the
    /// debounce window, e.g. when the user presses enter.
    ///
    /// Returns `true` if the URL was rewritten.
    pub fn flush_search(&mut self) -> bool {
        let mut inner = self.lock();
        if !inner.debouncer.cancel(&SEARCH_SETTLE) {
            return false;
        }
        inner.search_generation += 1;
        let snapshot = inner.searchable_filters();
        inner.settle_search(snapshot)
    }

    // -------------------------------------------------------------------------
    // Local UI state
    // -------------------------------------------------------------------------

    /// Replaces the row selection. Never touches the URL.
    pub fn set_row_selection(&mut self, selection: RowSelection) {
        self.lock().state.row_selection = selection;
    }

    /// Toggles one row's selection. Returns `true` if it is now selected.
    pub fn toggle_row_selected(&mut self, row_id: &str) -> bool {
        let mut inner = self.lock();
        let selected = !inner.state.is_row_selected(row_id);
        if selected {
            inner.state.row_selection.insert(row_id.to_string(), true);
        } else {
            inner.state.row_selection.remove(row_id);
        }
        selected
    }

    /// Replaces the column visibility overrides. Never touches the URL.
    pub fn set_column_visibility(&mut self, visibility: ColumnVisibility) {
        self.lock().state.column_visibility = visibility;
    }

    /// Shows or hides one column.
    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) {
        self.lock()
            .state
            .column_visibility
            .insert(column_id.to_string(), visible);
    }
}

impl<T> Drop for TableCoordinator<T> {
    fn drop(&mut self) {
        let mut inner = self.lock();
        inner.debouncer.cancel_all();
        inner.search_generation += 1;
        trace!("table unmounted");
    }
}

impl<T> std::fmt::Debug for TableCoordinator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableCoordinator")
            .field("state", &self.lock().state)
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("page_count", &self.page_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::location::MemoryLocation;
    use crate::model::FilterOption;
    use crate::schedule::ManualScheduler;

    struct Fixture {
        location: Arc<MemoryLocation>,
        scheduler: ManualScheduler,
        table: TableCoordinator<()>,
    }

    fn mount(href: &str) -> Fixture {
        let location = Arc::new(MemoryLocation::new(href));
        let scheduler = ManualScheduler::new();
        let table = TableCoordinator::builder()
            .location(Arc::clone(&location))
            .scheduler(scheduler.clone())
            .filter_fields([
                FilterField::searchable("name", "Name"),
                FilterField::facet(
                    "status",
                    "Status",
                    [
                        FilterOption::new("Active", "active"),
                        FilterOption::new("Draft", "draft"),
                    ],
                ),
            ])
            .columns([
                ColumnDef::new("name", "Name"),
                ColumnDef::new("createdAt", "Created"),
                ColumnDef::new("actions", "").with_sorting(false),
            ])
            .mount()
            .unwrap();
        Fixture {
            location,
            scheduler,
            table,
        }
    }

    #[test]
    fn test_mount_does_not_navigate() {
        let f = mount("/products?page=2&name=shoe");
        assert!(f.location.navigations().is_empty());
        assert_eq!(f.table.settled_search(), vec![ColumnFilter::search("name", "shoe")]);
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let mut f = mount("/products");
        assert_eq!(f.table.toggle_sort("name").unwrap(), Some(SortDirection::Asc));
        assert_eq!(f.location.search(), "page=1&per_page=10&sort=name.asc");
        assert_eq!(f.table.toggle_sort("name").unwrap(), Some(SortDirection::Desc));
        assert_eq!(f.table.toggle_sort("name").unwrap(), None);
        assert_eq!(f.location.search(), "page=1&per_page=10");
        assert_eq!(f.location.navigations().len(), 3);
    }

    #[test]
    fn test_sort_validation() {
        let mut f = mount("/products");
        assert!(matches!(f.table.toggle_sort("actions"), Err(Error::NotSortable(_))));
        assert!(matches!(
            f.table.set_sorting(vec![ColumnSort::asc("missing")]),
            Err(Error::UnknownColumn(_))
        ));
        assert!(f.location.navigations().is_empty());
    }

    #[test]
    fn test_filter_kind_validation() {
        let mut f = mount("/products");
        assert!(matches!(
            f.table.set_search("status", "active"),
            Err(Error::Filter(FilterError::NotSearchable(_)))
        ));
        assert!(matches!(
            f.table.set_facet("name", ["shoe"]),
            Err(Error::Filter(FilterError::NotFacet(_)))
        ));
        assert!(matches!(
            f.table.set_facet("status", ["deleted"]),
            Err(Error::Filter(FilterError::UnknownOption { .. }))
        ));
        assert!(matches!(
            f.table.set_search("price", "10"),
            Err(Error::Filter(FilterError::UnknownColumn(_)))
        ));
    }

    #[test]
    fn test_toggle_facet_option() {
        let mut f = mount("/products?page=3");
        assert!(f.table.toggle_facet_option("status", "active").unwrap());
        assert!(f.table.toggle_facet_option("status", "draft").unwrap());
        assert_eq!(f.location.search(), "page=1&status=active.draft");
        assert!(!f.table.toggle_facet_option("status", "active").unwrap());
        assert!(!f.table.toggle_facet_option("status", "draft").unwrap());
        assert_eq!(f.location.search(), "page=1");
        assert_eq!(f.table.state().filter("status"), None);
    }

    #[test]
    fn test_reset_filters_single_navigation() {
        let mut f = mount("/products?page=3&name=shoe&status=active");
        f.table.set_search("name", "shoes").unwrap();
        f.table.reset_filters();
        assert_eq!(f.location.navigations().len(), 1);
        assert_eq!(f.location.search(), "page=1");
        assert!(!f.table.is_settling());

        f.scheduler.advance(Duration::from_secs(1));
        assert_eq!(f.location.navigations().len(), 1);
    }

    #[test]
    fn test_flush_search() {
        let mut f = mount("/products");
        f.table.set_search("name", "boots").unwrap();
        assert!(f.table.is_settling());
        assert!(f.table.flush_search());
        assert_eq!(f.location.search(), "name=boots&page=1");
        assert!(!f.table.flush_search());

        f.scheduler.advance(Duration::from_secs(1));
        assert_eq!(f.location.navigations().len(), 1);
    }

    #[test]
    fn test_local_state_never_navigates() {
        let mut f = mount("/products");
        assert!(f.table.toggle_row_selected("row-1"));
        assert!(!f.table.toggle_row_selected("row-1"));
        f.table.set_column_visible("createdAt", false);
        let table = f.table.table();
        assert!(!table.state().is_column_visible("createdAt"));
        assert!(f.location.navigations().is_empty());
    }

    #[test]
    fn test_page_navigation_bounds() {
        let mut f = mount("/products");
        f.table.previous_page();
        assert!(f.location.navigations().is_empty());

        f.table.set_data(Vec::new(), 3);
        f.table.last_page();
        assert_eq!(f.table.state().pagination.page_index, 2);
        assert!(!f.table.can_next_page());
        f.table.next_page();
        f.table.set_page_index(10);
        assert_eq!(f.table.state().pagination.page_index, 2);
        assert_eq!(f.location.navigations().len(), 1);

        f.table.first_page();
        assert_eq!(f.location.search(), "page=1&per_page=10");
    }

    #[test]
    fn test_invalid_page_size() {
        let mut f = mount("/products");
        assert!(matches!(f.table.set_page_size(0), Err(Error::InvalidPageSize(0))));
    }

    #[test]
    fn test_pending_settle_cancelled_on_drop() {
        let f = mount("/products");
        let Fixture {
            location,
            scheduler,
            mut table,
        } = f;
        table.set_search("name", "shoe").unwrap();
        drop(table);
        assert_eq!(scheduler.pending_count(), 0);
        scheduler.advance(Duration::from_secs(1));
        assert!(location.navigations().is_empty());
    }
}
