//! Table widget initialization seam.
//!
//! The releases table is turned into a sortable, paginated widget by a
//! client-side table library; sorting and paging happen inside that library.
//! This module only speaks its declarative initialization API, writing the
//! page length and initial sort order onto the table element as `data-*`
//! attributes.

use lol_html::html_content::Element;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::constants::{
    ATTR_ENHANCED, ATTR_ORDER, ATTR_PAGE_LENGTH, DEFAULT_PAGE_LENGTH, DEFAULT_SORT_COLUMN,
};

/// Errors surfaced by the widget seam during initialization.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("table widget already initialized on this element")]
    AlreadyInitialized,

    #[error("sort column {column} is out of range for a table with {header_cells} header cells")]
    SortColumnOutOfRange { column: usize, header_cells: usize },

    #[error("invalid widget attribute: {0}")]
    Attribute(String),
}

/// Column sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// The direction keyword understood by the table library
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table widget configuration applied to the releases table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows shown per page
    pub page_length: u32,
    /// Zero-based index of the initial sort column
    pub sort_column: usize,
    /// Initial sort direction
    pub sort_direction: SortDirection,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
            sort_column: DEFAULT_SORT_COLUMN,
            sort_direction: SortDirection::Descending,
        }
    }
}

impl TableConfig {
    /// JSON payload for the widget's order attribute, e.g. `[[3,"desc"]]`
    pub fn order_payload(&self) -> String {
        json!([[self.sort_column, self.sort_direction.as_str()]]).to_string()
    }

    /// Initialize the widget on a table element.
    ///
    /// Initializing the same element twice is an error, matching the
    /// underlying table library's behavior; callers do not guard against it.
    pub fn apply(&self, element: &mut Element) -> Result<(), WidgetError> {
        if element.has_attribute(ATTR_ENHANCED) {
            return Err(WidgetError::AlreadyInitialized);
        }

        element
            .set_attribute(ATTR_PAGE_LENGTH, &self.page_length.to_string())
            .map_err(|e| WidgetError::Attribute(e.to_string()))?;
        element
            .set_attribute(ATTR_ORDER, &self.order_payload())
            .map_err(|e| WidgetError::Attribute(e.to_string()))?;
        element
            .set_attribute(ATTR_ENHANCED, "true")
            .map_err(|e| WidgetError::Attribute(e.to_string()))?;

        Ok(())
    }

    /// Check the configured sort column against the table's header width.
    pub fn validate_columns(&self, header_cells: usize) -> Result<(), WidgetError> {
        if self.sort_column >= header_cells {
            return Err(WidgetError::SortColumnOutOfRange {
                column: self.sort_column,
                header_cells,
            });
        }
        Ok(())
    }
}
