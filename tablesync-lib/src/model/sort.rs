//! Sorting types.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Returns the URL/wire form (`asc` or `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort on a single column.
///
/// # Example
///
/// ```
/// use tablesync_lib::model::ColumnSort;
///
/// let sort = ColumnSort::parse("createdAt.desc").unwrap();
/// assert_eq!(sort.column_id, "createdAt");
/// assert!(sort.descending);
/// assert_eq!(sort.to_param(), "createdAt.desc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSort {
    pub column_id: String,
    pub descending: bool,
}

impl ColumnSort {
    /// Creates an ascending sort on a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: false,
        }
    }

    /// Creates a descending sort on a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: true,
        }
    }

    /// Parses `"<columnId>.<asc|desc>"`.
    ///
    /// The column id is everything before the last `.`. Only `desc` sorts
    /// descending; a missing or unrecognized direction sorts ascending.
    /// Returns `None` when no column id is present.
    pub fn parse(param: &str) -> Option<Self> {
        let (column, direction) = match param.rsplit_once('.') {
            Some((column, direction)) => (column, direction),
            None => (param, ""),
        };
        if column.is_empty() {
            return None;
        }
        Some(Self {
            column_id: column.to_string(),
            descending: direction == "desc",
        })
    }

    /// Returns the direction of this sort.
    pub fn direction(&self) -> SortDirection {
        if self.descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// Serializes to `"<columnId>.<asc|desc>"`.
    pub fn to_param(&self) -> String {
        format!("{}.{}", self.column_id, self.direction())
    }
}
