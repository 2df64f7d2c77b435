//! Typestate builder for [`TableCoordinator`].

use std::sync::Arc;

use super::ColumnDef;
use super::Mount;
use super::TableCoordinator;
use crate::config::TableConfig;
use crate::error::Error;
use crate::location::Location;
use crate::model::FilterField;
use crate::model::InitialState;
use crate::model::PageCount;
use crate::schedule::Scheduler;

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for mounting a [`TableCoordinator`].
///
/// Uses the typestate pattern so the location and scheduler must be set
/// before [`mount`](TableCoordinatorBuilder::mount) is available.
///
/// # Required Fields
///
/// - `location` - the navigable location whose query string holds the state
/// - `scheduler` - runs the searchable-filter debounce
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tablesync_lib::TableCoordinator;
/// use tablesync_lib::location::MemoryLocation;
/// use tablesync_lib::model::FilterField;
/// use tablesync_lib::schedule::ManualScheduler;
///
/// let table = TableCoordinator::<()>::builder()
///     .location(Arc::new(MemoryLocation::new("/products?page=2")))
///     .scheduler(ManualScheduler::new())
///     .filter_fields([FilterField::searchable("name", "Name")])
///     .mount()
///     .unwrap();
///
/// assert_eq!(table.state().pagination.page_index, 1);
/// ```
pub struct TableCoordinatorBuilder<L, S, T> {
    location: L,
    scheduler: S,
    config: TableConfig,
    filter_fields: Vec<FilterField>,
    initial_state: InitialState,
    columns: Vec<ColumnDef>,
    rows: Vec<T>,
    page_count: PageCount,
}

impl<T> TableCoordinatorBuilder<Missing, Missing, T> {
    /// Creates a builder with default configuration.
    pub fn new() -> Self {
        Self {
            location: Missing,
            scheduler: Missing,
            config: TableConfig::default(),
            filter_fields: Vec::new(),
            initial_state: InitialState::default(),
            columns: Vec::new(),
            rows: Vec::new(),
            page_count: PageCount::Unknown,
        }
    }
}

impl<T> Default for TableCoordinatorBuilder<Missing, Missing, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> TableCoordinatorBuilder<Missing, S, T> {
    /// Sets the navigable location.
    ///
    /// Takes an `Arc` so the caller can keep observing the location.
    pub fn location<Loc: Location + 'static>(
        self,
        location: Arc<Loc>,
    ) -> TableCoordinatorBuilder<Set<Arc<dyn Location>>, S, T> {
        TableCoordinatorBuilder {
            location: Set(location as Arc<dyn Location>),
            scheduler: self.scheduler,
            config: self.config,
            filter_fields: self.filter_fields,
            initial_state: self.initial_state,
            columns: self.columns,
            rows: self.rows,
            page_count: self.page_count,
        }
    }
}

impl<L, T> TableCoordinatorBuilder<L, Missing, T> {
    /// Sets the scheduler that runs the debounce timer.
    pub fn scheduler<Sch: Scheduler + 'static>(
        self,
        scheduler: Sch,
    ) -> TableCoordinatorBuilder<L, Set<Arc<dyn Scheduler>>, T> {
        TableCoordinatorBuilder {
            location: self.location,
            scheduler: Set(Arc::new(scheduler) as Arc<dyn Scheduler>),
            config: self.config,
            filter_fields: self.filter_fields,
            initial_state: self.initial_state,
            columns: self.columns,
            rows: self.rows,
            page_count: self.page_count,
        }
    }
}

impl<L, S, T> TableCoordinatorBuilder<L, S, T> {
    /// Sets the configuration.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the filter field descriptors.
    pub fn filter_fields(mut self, fields: impl IntoIterator<Item = FilterField>) -> Self {
        self.filter_fields = fields.into_iter().collect();
        self
    }

    /// Sets the defaults used when the URL is silent.
    pub fn initial_state(mut self, initial: InitialState) -> Self {
        self.initial_state = initial;
        self
    }

    /// Sets the column definitions.
    pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Sets the rows of the current page.
    pub fn rows(mut self, rows: Vec<T>) -> Self {
        self.rows = rows;
        self
    }

    /// Sets the total page count from a previous fetch.
    pub fn page_count(mut self, page_count: PageCount) -> Self {
        self.page_count = page_count;
        self
    }
}

impl<T> TableCoordinatorBuilder<Set<Arc<dyn Location>>, Set<Arc<dyn Scheduler>>, T> {
    /// Reads the location's query string and mounts the coordinator.
    ///
    /// Fails only if the filter fields declare a column twice.
    pub fn mount(self) -> Result<TableCoordinator<T>, Error> {
        TableCoordinator::mount(Mount {
            location: self.location.0,
            scheduler: self.scheduler.0,
            config: self.config,
            filter_fields: self.filter_fields,
            initial_state: self.initial_state,
            columns: self.columns,
            rows: self.rows,
            page_count: self.page_count,
        })
    }
}
