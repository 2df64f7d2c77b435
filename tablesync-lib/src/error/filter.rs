//! Filter error types

use thiserror::Error;

/// Errors raised when configuring or mutating column filters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// No filter field is declared for the column.
    #[error("no filter field declared for column '{0}'")]
    UnknownColumn(String),

    /// A free-text value was given for a facet column.
    #[error("column '{0}' is a facet filter, not searchable")]
    NotSearchable(String),

    /// A set of options was given for a searchable column.
    #[error("column '{0}' is a searchable filter, not a facet")]
    NotFacet(String),

    /// The value is not one of the facet's declared options.
    #[error("'{value}' is not an option of column '{column}'")]
    UnknownOption { column: String, value: String },

    /// A facet option value cannot be written to the URL: it is empty or
    /// contains the `.` separator.
    #[error("option '{value}' of column '{column}' cannot be empty or contain '.'")]
    InvalidOption { column: String, value: String },

    /// Two filter fields were declared for the same column.
    #[error("duplicate filter field for column '{0}'")]
    DuplicateColumn(String),
}
