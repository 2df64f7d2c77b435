//! Filter field descriptors.

use log::trace;
use serde::Deserialize;
use serde::Serialize;

use super::FilterValue;
use crate::error::FilterError;

/// One selectable option of a facet filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Whether a filter is free text or a discrete option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Free-text filter, debounced.
    Searchable,
    /// Discrete option set, applied immediately.
    Facet,
}

/// Static description of a filterable column.
///
/// A field with a non-empty `options` list is a facet filter; any other
/// field is a searchable filter.
///
/// # Example
///
/// ```
/// use tablesync_lib::model::{FilterField, FilterKind, FilterOption};
///
/// let name = FilterField::searchable("name", "Name").with_placeholder("Filter names...");
/// let status = FilterField::facet(
///     "status",
///     "Status",
///     [FilterOption::new("Active", "active"), FilterOption::new("Draft", "draft")],
/// );
///
/// assert_eq!(name.kind(), FilterKind::Searchable);
/// assert_eq!(status.kind(), FilterKind::Facet);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterField {
    pub label: String,
    pub column_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FilterOption>>,
}

impl FilterField {
    /// Creates a searchable (free-text) field.
    pub fn searchable(column_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            column_id: column_id.into(),
            placeholder: None,
            options: None,
        }
    }

    /// Creates a facet field with its option set.
    ///
    /// An empty option set makes the field searchable.
    pub fn facet(
        column_id: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = FilterOption>,
    ) -> Self {
        Self {
            label: label.into(),
            column_id: column_id.into(),
            placeholder: None,
            options: Some(options.into_iter().collect()),
        }
    }

    /// Sets the input placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Returns the kind of filter this field describes.
    pub fn kind(&self) -> FilterKind {
        if self.options.as_deref().is_some_and(|options| !options.is_empty()) {
            FilterKind::Facet
        } else {
            FilterKind::Searchable
        }
    }

    /// Returns `true` if `value` is one of this field's options.
    pub fn has_option(&self, value: &str) -> bool {
        self.options
            .as_deref()
            .is_some_and(|options| options.iter().any(|o| o.value == value))
    }
}

/// Filter fields partitioned into searchable and facet columns.
///
/// The partition is computed once from the descriptor list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFields {
    searchable: Vec<FilterField>,
    facets: Vec<FilterField>,
}

impl FilterFields {
    /// Partitions the descriptors.
    ///
    /// Rejects duplicate column ids and facet option values that would not
    /// survive the dot-joined URL form.
    pub fn new(fields: impl IntoIterator<Item = FilterField>) -> Result<Self, FilterError> {
        let mut partition = Self::default();
        for field in fields {
            if partition.get(&field.column_id).is_some() {
                return Err(FilterError::DuplicateColumn(field.column_id));
            }
            match field.kind() {
                FilterKind::Searchable => partition.searchable.push(field),
                FilterKind::Facet => {
                    check_options(&field)?;
                    partition.facets.push(field);
                }
            }
        }
        Ok(partition)
    }

    /// Returns the searchable fields.
    pub fn searchable(&self) -> &[FilterField] {
        &self.searchable
    }

    /// Returns the facet fields.
    pub fn facets(&self) -> &[FilterField] {
        &self.facets
    }

    /// Iterates over every field, searchable first.
    pub fn iter(&self) -> impl Iterator<Item = &FilterField> {
        self.searchable.iter().chain(self.facets.iter())
    }

    /// Looks up a field by column id.
    pub fn get(&self, column_id: &str) -> Option<&FilterField> {
        self.iter().find(|f| f.column_id == column_id)
    }

    /// Returns the kind of the column's filter, if declared.
    pub fn kind_of(&self, column_id: &str) -> Option<FilterKind> {
        self.get(column_id).map(FilterField::kind)
    }

    /// Returns `true` if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.searchable.is_empty() && self.facets.is_empty()
    }

    /// Parses a raw URL value for a declared column.
    ///
    /// Facet values are split on `.`. Empty, repeated, and undeclared
    /// segments are dropped. Returns `None` for undeclared columns and for
    /// values that select nothing.
    pub fn parse_param(&self, column_id: &str, raw: &str) -> Option<FilterValue> {
        let field = self.get(column_id)?;
        let value = match field.kind() {
            FilterKind::Searchable => FilterValue::Search(raw.to_string()),
            FilterKind::Facet => {
                let mut selected: Vec<String> = Vec::new();
                for segment in raw.split('.').filter(|s| !s.is_empty()) {
                    if !field.has_option(segment) {
                        trace!("ignoring unknown option '{}' of column '{}'", segment, column_id);
                    } else if !selected.iter().any(|s| s == segment) {
                        selected.push(segment.to_string());
                    }
                }
                FilterValue::Facet(selected)
            }
        };
        (!value.is_empty()).then_some(value)
    }
}

fn check_options(field: &FilterField) -> Result<(), FilterError> {
    for option in field.options.iter().flatten() {
        if option.value.is_empty() || option.value.contains('.') {
            return Err(FilterError::InvalidOption {
                column: field.column_id.clone(),
                value: option.value.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FilterFields {
        FilterFields::new([
            FilterField::searchable("name", "Name"),
            FilterField::facet(
                "status",
                "Status",
                [FilterOption::new("Active", "active"), FilterOption::new("Draft", "draft")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_partition() {
        let fields = fields();
        assert_eq!(fields.searchable().len(), 1);
        assert_eq!(fields.facets().len(), 1);
        assert_eq!(fields.kind_of("name"), Some(FilterKind::Searchable));
        assert_eq!(fields.kind_of("status"), Some(FilterKind::Facet));
        assert_eq!(fields.kind_of("price"), None);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = FilterFields::new([
            FilterField::searchable("name", "Name"),
            FilterField::searchable("name", "Other"),
        ])
        .unwrap_err();
        assert_eq!(err, FilterError::DuplicateColumn("name".into()));
    }

    #[test]
    fn test_parse_param() {
        let fields = fields();
        assert_eq!(
            fields.parse_param("name", "red.shoe"),
            Some(FilterValue::Search("red.shoe".into()))
        );
        assert_eq!(
            fields.parse_param("status", "active..draft"),
            Some(FilterValue::Facet(vec!["active".into(), "draft".into()]))
        );
        assert_eq!(fields.parse_param("status", ""), None);
        assert_eq!(fields.parse_param("unknown", "x"), None);
    }

    #[test]
    fn test_parse_param_drops_unknown_and_repeated_options() {
        let fields = fields();
        assert_eq!(
            fields.parse_param("status", "draft.archived.draft.active"),
            Some(FilterValue::Facet(vec!["draft".into(), "active".into()]))
        );
        assert_eq!(fields.parse_param("status", "archived"), None);
    }

    #[test]
    fn test_option_with_separator_rejected() {
        let err = FilterFields::new([FilterField::facet(
            "size",
            "Size",
            [FilterOption::new("9", "9"), FilterOption::new("9.5", "9.5")],
        )])
        .unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidOption {
                column: "size".into(),
                value: "9.5".into(),
            }
        );

        let err = FilterFields::new([FilterField::facet(
            "size",
            "Size",
            [FilterOption::new("Any", "")],
        )])
        .unwrap_err();
        assert!(matches!(err, FilterError::InvalidOption { .. }));
    }

    #[test]
    fn test_empty_options_is_searchable() {
        let field = FilterField::facet("tag", "Tag", Vec::new());
        assert_eq!(field.kind(), FilterKind::Searchable);

        let fields = FilterFields::new([field]).unwrap();
        assert_eq!(fields.searchable().len(), 1);
        assert!(fields.facets().is_empty());
        assert_eq!(
            fields.parse_param("tag", "a.b"),
            Some(FilterValue::Search("a.b".into()))
        );
    }

    #[test]
    fn test_deserialize_descriptor() {
        let field: FilterField = serde_json::from_str(
            r#"{ "label": "Status", "columnId": "status", "options": [{ "label": "Active", "value": "active" }] }"#,
        )
        .unwrap();
        assert_eq!(field.kind(), FilterKind::Facet);
        assert!(field.has_option("active"));
        assert!(!field.has_option("draft"));
    }
}
