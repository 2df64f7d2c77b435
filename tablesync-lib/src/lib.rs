//! Table state coordination library
//!
//! Keeps the pagination, sorting, and column-filter state of a remote,
//! paginated table in sync with the query string of a navigable location,
//! debouncing free-text filters before they reach the URL.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod location;
pub mod model;
pub mod query;
pub mod schedule;
pub mod source;

pub use config::PageSizePolicy;
pub use config::TableConfig;
pub use coordinator::TableCoordinator;
pub use coordinator::TableHandle;
pub use error::Error;
