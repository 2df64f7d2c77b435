//! Table query state and the types it is built from.
//!
//! # Types
//!
//! - [`TableQueryState`] - pagination, sorting, filters, and local UI state
//! - [`ColumnSort`] / [`SortDirection`] - sort specification
//! - [`Pagination`] / [`PageCount`] - page position and total pages
//! - [`ColumnFilter`] / [`FilterValue`] - active column filters
//! - [`FilterField`] / [`FilterFields`] - static filter descriptors

mod field;
mod filter;
mod pagination;
mod sort;
mod state;

pub use field::FilterField;
pub use field::FilterFields;
pub use field::FilterKind;
pub use field::FilterOption;
pub use filter::ColumnFilter;
pub use filter::FilterValue;
pub use pagination::PageCount;
pub use pagination::Pagination;
pub use sort::ColumnSort;
pub use sort::SortDirection;
pub use state::ColumnVisibility;
pub use state::InitialState;
pub use state::RowSelection;
pub use state::TableQueryState;
