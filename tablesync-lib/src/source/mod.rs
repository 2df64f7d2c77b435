//! Remote data source contract.
//!
//! The coordinator never fetches. It derives a [`RemoteQuery`] from its
//! state; the caller runs it against a [`DataSource`] and hands the
//! resulting [`PageEnvelope`] back. [`load_page`] does both steps.

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde::Serialize;
use url::form_urlencoded;

use crate::coordinator::TableCoordinator;
use crate::error::Error;
use crate::model::ColumnFilter;
use crate::model::ColumnSort;
use crate::model::Pagination;
use crate::model::SortDirection;

/// Parameters for one page request.
///
/// `page` is the zero-based page index. The first active searchable filter
/// is sent as `search`; any further searchable filters are sent under their
/// column ids. Facet filters are flattened into the query with their
/// options joined by `.`, as in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteQuery {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Searchable filters after the first, keyed by column id.
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
    #[serde(flatten)]
    pub facets: BTreeMap<String, String>,
}

impl RemoteQuery {
    /// Builds the query from pagination, sorting, and filters.
    ///
    /// `search` is the first non-empty searchable filter value; the others
    /// go into `filters`.
    pub fn from_parts(
        pagination: &Pagination,
        sorting: &[ColumnSort],
        searchable: &[ColumnFilter],
        facets: &[ColumnFilter],
    ) -> Self {
        let sort = sorting.first();
        let mut texts = searchable.iter().filter_map(|f| {
            let text = f.value.as_search().filter(|text| !text.is_empty())?;
            Some((f.column_id.clone(), text.to_string()))
        });
        Self {
            page: pagination.page_index,
            size: pagination.page_size,
            sort_by: sort.map(|s| s.column_id.clone()),
            sort_direction: sort.map(ColumnSort::direction),
            search: texts.next().map(|(_, text)| text),
            filters: texts.collect(),
            facets: facets
                .iter()
                .filter_map(|f| Some((f.column_id.clone(), f.value.to_param()?)))
                .collect(),
        }
    }

    /// Serializes to a form-encoded query string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("page", &self.page.to_string());
        serializer.append_pair("size", &self.size.to_string());
        if let Some(sort_by) = &self.sort_by {
            serializer.append_pair("sortBy", sort_by);
        }
        if let Some(direction) = self.sort_direction {
            serializer.append_pair("sortDirection", direction.as_str());
        }
        if let Some(search) = &self.search {
            serializer.append_pair("search", search);
        }
        for (key, value) in self.filters.iter().chain(&self.facets) {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// One page of results as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub content: Vec<T>,
    /// Total number of pages; negative when unknown.
    pub total_pages: i64,
}

/// A backend that serves pages of rows.
///
/// Errors are converted into [`Error::Source`] by [`load_page`].
#[async_trait]
pub trait DataSource<T: Send>: Send + Sync {
    type Error: Into<Box<dyn std::error::Error + Send + Sync>>;

    /// Fetches the page described by `query`.
    async fn fetch(&self, query: &RemoteQuery) -> Result<PageEnvelope<T>, Self::Error>;
}

/// Result of [`load_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows and page count were applied to the table.
    Applied,
    /// The table's query changed while the fetch was in flight; the
    /// response was discarded.
    Stale,
}

/// Fetches the table's current page and applies it.
///
/// The response is only applied if the table still asks for the same query
/// once the fetch completes, so a settled filter that lands mid-flight never
/// shows rows for the old query.
pub async fn load_page<T, D>(table: &mut TableCoordinator<T>, source: &D) -> Result<LoadOutcome, Error>
where
    T: Send,
    D: DataSource<T> + ?Sized,
{
    let query = table.remote_query();
    debug!("fetching page {} (size {})", query.page, query.size);

    let envelope = source.fetch(&query).await.map_err(Error::source_error)?;

    if table.remote_query() != query {
        debug!("discarding stale page {} response", query.page);
        return Ok(LoadOutcome::Stale);
    }

    table.set_data(envelope.content, envelope.total_pages);
    Ok(LoadOutcome::Applied)
}
