//! Column filter values.

use serde::Deserialize;
use serde::Serialize;

/// The value of an active column filter.
///
/// The variant is fixed by the column's [`FilterField`](super::FilterField)
/// descriptor: searchable columns always hold `Search`, facet columns always
/// hold `Facet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Free-text value of a searchable column.
    Search(String),
    /// Selected options of a facet column.
    Facet(Vec<String>),
}

impl FilterValue {
    /// Returns `true` if the filter selects nothing (empty text, no options).
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Search(text) => text.is_empty(),
            FilterValue::Facet(values) => values.is_empty(),
        }
    }

    /// Returns the free-text value, if this is a searchable filter.
    pub fn as_search(&self) -> Option<&str> {
        match self {
            FilterValue::Search(text) => Some(text),
            FilterValue::Facet(_) => None,
        }
    }

    /// Returns the selected options, if this is a facet filter.
    pub fn as_facet(&self) -> Option<&[String]> {
        match self {
            FilterValue::Search(_) => None,
            FilterValue::Facet(values) => Some(values),
        }
    }

    /// Serializes to the URL form: raw text, or options joined with `.`.
    ///
    /// Returns `None` for empty filters, which are omitted from the URL.
    pub fn to_param(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        match self {
            FilterValue::Search(text) => Some(text.clone()),
            FilterValue::Facet(values) => Some(values.join(".")),
        }
    }
}

/// An active filter on one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnFilter {
    #[serde(rename = "id")]
    pub column_id: String,
    pub value: FilterValue,
}

impl ColumnFilter {
    /// Creates a free-text filter.
    pub fn search(column_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            value: FilterValue::Search(text.into()),
        }
    }

    /// Creates a facet filter.
    pub fn facet<I, S>(column_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column_id: column_id.into(),
            value: FilterValue::Facet(values.into_iter().map(Into::into).collect()),
        }
    }
}
