//! Conversion between table state and query parameters.
//!
//! The URL is the serialized form of the state:
//!
//! - `page` - 1-based page number
//! - `per_page` - page size
//! - `sort` - `<columnId>.<asc|desc>`, omitted when unsorted
//! - one key per active filter; facet options are joined with `.`
//!
//! Reserved key names come from [`TableConfig`].

use log::trace;

use super::SearchParams;
use crate::config::TableConfig;
use crate::model::ColumnFilter;
use crate::model::ColumnSort;
use crate::model::FilterFields;
use crate::model::InitialState;
use crate::model::Pagination;
use crate::model::TableQueryState;

/// Builds the initial state from query parameters.
///
/// Malformed `page`/`per_page` values fall back to defaults. Keys that are
/// neither reserved nor declared filter columns are ignored.
pub fn decode(
    params: &SearchParams,
    fields: &FilterFields,
    config: &TableConfig,
    initial: &InitialState,
) -> TableQueryState {
    let default_size = initial
        .pagination
        .map(|p| p.page_size)
        .unwrap_or(config.default_page_size);
    let default_index = initial.pagination.map(|p| p.page_index).unwrap_or(0);

    let page_size = parse_positive(params, &config.per_page_key).unwrap_or(default_size);
    let page_index = parse_positive(params, &config.page_key)
        .map(|page| page - 1)
        .unwrap_or(default_index);

    let mut state = TableQueryState::new(Pagination::new(page_index, page_size));

    state.sorting = match params.get(&config.sort_key) {
        Some(raw) => ColumnSort::parse(raw).into_iter().collect(),
        None => initial.sorting.clone().into_iter().collect(),
    };

    for (key, raw) in params.iter() {
        if config.is_reserved_key(key) || state.filter(key).is_some() {
            continue;
        }
        if let Some(value) = fields.parse_param(key, raw) {
            state.column_filters.push(ColumnFilter {
                column_id: key.to_string(),
                value,
            });
        }
    }

    state
}

/// Writes pagination and sorting, preserving every other key.
pub fn write_pagination(
    params: &mut SearchParams,
    pagination: &Pagination,
    sorting: &[ColumnSort],
    config: &TableConfig,
) {
    params.set(&config.page_key, pagination.page_number().to_string());
    params.set(&config.per_page_key, pagination.page_size.to_string());
    match sorting.first() {
        Some(sort) => params.set(&config.sort_key, sort.to_param()),
        None => {
            params.delete(&config.sort_key);
        }
    }
}

/// Writes the filter keys and returns to the first page.
///
/// Every declared filter column is either set from the given filters or
/// deleted, so filters that were cleared disappear from the URL.
pub fn write_filters(
    params: &mut SearchParams,
    searchable: &[ColumnFilter],
    facets: &[ColumnFilter],
    fields: &FilterFields,
    config: &TableConfig,
) {
    write_filter_group(params, fields.searchable().iter().map(|f| &f.column_id), searchable);
    write_filter_group(params, fields.facets().iter().map(|f| &f.column_id), facets);
    params.set(&config.page_key, "1");
}

fn write_filter_group<'a>(
    params: &mut SearchParams,
    columns: impl Iterator<Item = &'a String>,
    filters: &[ColumnFilter],
) {
    for column in columns {
        let value = filters
            .iter()
            .find(|f| f.column_id == *column)
            .and_then(|f| f.value.to_param());
        match value {
            Some(value) => params.set(column.as_str(), value),
            None => {
                params.delete(column);
            }
        }
    }
}

/// Serializes a full state into fresh query parameters.
///
/// Filters on undeclared columns and empty filters are skipped.
pub fn encode(state: &TableQueryState, fields: &FilterFields, config: &TableConfig) -> SearchParams {
    let mut params = SearchParams::new();
    write_pagination(&mut params, &state.pagination, &state.sorting, config);
    for filter in &state.column_filters {
        if config.is_reserved_key(&filter.column_id) || fields.get(&filter.column_id).is_none() {
            continue;
        }
        if let Some(value) = filter.value.to_param() {
            params.set(filter.column_id.as_str(), value);
        }
    }
    params
}

fn parse_positive(params: &SearchParams, key: &str) -> Option<u32> {
    let raw = params.get(key)?;
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            trace!("ignoring malformed '{}' value {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterField;
    use crate::model::FilterOption;
    use crate::model::FilterValue;

    fn fields() -> FilterFields {
        FilterFields::new([
            FilterField::searchable("name", "Name"),
            FilterField::facet(
                "status",
                "Status",
                [
                    FilterOption::new("Active", "active"),
                    FilterOption::new("Draft", "draft"),
                    FilterOption::new("Archived", "archived"),
                ],
            ),
        ])
        .unwrap()
    }

    fn decode_str(query: &str) -> TableQueryState {
        decode(
            &SearchParams::parse(query),
            &fields(),
            &TableConfig::default(),
            &InitialState::default(),
        )
    }

    #[test]
    fn test_decode_full_query() {
        let state = decode_str("page=3&per_page=20&sort=createdAt.desc&name=shoe&status=active.draft");
        assert_eq!(state.pagination, Pagination::new(2, 20));
        assert_eq!(state.sorting, vec![ColumnSort::desc("createdAt")]);
        assert_eq!(state.filter("name"), Some(&FilterValue::Search("shoe".into())));
        assert_eq!(
            state.filter("status"),
            Some(&FilterValue::Facet(vec!["active".into(), "draft".into()]))
        );
    }

    #[test]
    fn test_decode_defaults() {
        let state = decode_str("");
        assert_eq!(state.pagination, Pagination::new(0, 10));
        assert!(state.sorting.is_empty());
        assert!(state.column_filters.is_empty());
    }

    #[test]
    fn test_decode_malformed_numbers_fall_back() {
        let state = decode_str("page=abc&per_page=0");
        assert_eq!(state.pagination, Pagination::new(0, 10));
        let state = decode_str("page=-2&per_page=1.5");
        assert_eq!(state.pagination, Pagination::new(0, 10));
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let state = decode_str("utm_source=mail&color=red");
        assert!(state.column_filters.is_empty());
    }

    #[test]
    fn test_decode_uses_initial_state() {
        let initial = InitialState::new()
            .with_sorting(ColumnSort::desc("createdAt"))
            .with_pagination(Pagination::new(0, 50));
        let state = decode(
            &SearchParams::new(),
            &fields(),
            &TableConfig::default(),
            &initial,
        );
        assert_eq!(state.pagination.page_size, 50);
        assert_eq!(state.sorting, vec![ColumnSort::desc("createdAt")]);

        let state = decode(
            &SearchParams::parse("sort=price.asc&per_page=5"),
            &fields(),
            &TableConfig::default(),
            &initial,
        );
        assert_eq!(state.pagination.page_size, 5);
        assert_eq!(state.sorting, vec![ColumnSort::asc("price")]);
    }

    #[test]
    fn test_write_pagination_omits_empty_sort() {
        let mut params = SearchParams::parse("sort=name.asc&utm_source=mail");
        write_pagination(&mut params, &Pagination::new(1, 25), &[], &TableConfig::default());
        assert_eq!(params.get("sort"), None);
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("per_page"), Some("25"));
        assert_eq!(params.get("utm_source"), Some("mail"));
    }

    #[test]
    fn test_write_filters_deletes_cleared_keys() {
        let mut params = SearchParams::parse("page=4&name=old&status=active&utm_source=mail");
        write_filters(
            &mut params,
            &[],
            &[ColumnFilter::facet("status", ["draft", "archived"])],
            &fields(),
            &TableConfig::default(),
        );
        assert_eq!(params.get("name"), None);
        assert_eq!(params.get("status"), Some("draft.archived"));
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("utm_source"), Some("mail"));
    }

    #[test]
    fn test_round_trip() {
        let fields = fields();
        let config = TableConfig::default();
        let mut state = TableQueryState::new(Pagination::new(6, 25));
        state.sorting = vec![ColumnSort::asc("price")];
        state.set_filter(ColumnFilter::search("name", "red shoes"));
        state.set_filter(ColumnFilter::facet("status", ["active", "archived"]));

        let query = encode(&state, &fields, &config).to_string();
        let decoded = decode(
            &SearchParams::parse(&query),
            &fields,
            &config,
            &InitialState::default(),
        );
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_custom_keys() {
        let config = TableConfig::default().with_keys("p", "size", "order");
        let state = decode(
            &SearchParams::parse("p=2&size=30&order=name.desc&page=9"),
            &fields(),
            &config,
            &InitialState::default(),
        );
        assert_eq!(state.pagination, Pagination::new(1, 30));
        assert_eq!(state.sorting, vec![ColumnSort::desc("name")]);
    }
}
