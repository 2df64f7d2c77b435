//! Coordinator configuration

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// Rows per page when neither the URL nor the initial state provides one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Quiescence window for free-text filters.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// What happens to the current page when the page size changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSizePolicy {
    /// Keep the page index as is (page 4 of 10 rows becomes page 4 of 25 rows).
    #[default]
    KeepPageIndex,
    /// Jump back to the first page.
    ResetToFirst,
}

/// Configuration for a table coordinator.
///
/// Can be built in code or loaded from JSON; missing fields fall back to
/// their defaults.
///
/// # Example
///
/// ```
/// use tablesync_lib::{PageSizePolicy, TableConfig};
///
/// let config = TableConfig::default()
///     .with_default_page_size(25)
///     .with_page_size_policy(PageSizePolicy::ResetToFirst);
///
/// let loaded = TableConfig::from_json(r#"{ "debounce_ms": 300 }"#).unwrap();
/// assert_eq!(loaded.default_page_size, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page when the URL has no `per_page`.
    ///
    /// Default: 10
    pub default_page_size: u32,

    /// Debounce window for searchable filters, in milliseconds.
    ///
    /// Default: 500
    pub debounce_ms: u64,

    /// Query key holding the 1-based page number.
    pub page_key: String,

    /// Query key holding the page size.
    pub per_page_key: String,

    /// Query key holding `<column>.<asc|desc>`.
    pub sort_key: String,

    /// Behavior on page size change.
    pub page_size_policy: PageSizePolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_key: "page".to_string(),
            per_page_key: "per_page".to_string(),
            sort_key: "sort".to_string(),
            page_size_policy: PageSizePolicy::default(),
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: TableConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Sets the default page size. Zero is raised to 1.
    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// Sets the debounce window. Windows beyond `u64::MAX` milliseconds
    /// saturate.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the page size policy.
    pub fn with_page_size_policy(mut self, policy: PageSizePolicy) -> Self {
        self.page_size_policy = policy;
        self
    }

    /// Renames the reserved query keys.
    pub fn with_keys(
        mut self,
        page: impl Into<String>,
        per_page: impl Into<String>,
        sort: impl Into<String>,
    ) -> Self {
        self.page_key = page.into();
        self.per_page_key = per_page.into();
        self.sort_key = sort.into();
        self
    }

    /// Returns the debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Returns `true` if the key is one of the reserved pagination/sort keys.
    pub fn is_reserved_key(&self, key: &str) -> bool {
        key == self.page_key || key == self.per_page_key || key == self.sort_key
    }

    fn normalized(mut self) -> Self {
        self.default_page_size = self.default_page_size.max(1);
        self
    }
}
