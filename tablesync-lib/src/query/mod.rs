//! URL query string handling.
//!
//! - [`SearchParams`] - ordered, form-encoded query parameters
//! - [`codec`] - conversion between [`TableQueryState`](crate::model::TableQueryState)
//!   and query parameters

pub mod codec;
mod params;

pub use params::join_href;
pub use params::split_href;
pub use params::SearchParams;
