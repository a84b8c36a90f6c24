//! Constants used throughout the application
//!
//! This module centralizes selector names, widget attribute names and other
//! default values to improve maintainability and consistency.

// Default selectors (class and id names, without the `.`/`#` prefix)
pub const DEFAULT_ABSOLUTE_CLASS: &str = "datetime";
pub const DEFAULT_RELATIVE_CLASS: &str = "datetime-relative";
pub const DEFAULT_CACHE_EXPIRY_ID: &str = "cacheExpiredAt";
pub const DEFAULT_TABLE_ID: &str = "releases";

/// Display pattern for absolute datetimes (zero-padded, 24-hour clock)
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Marker rendered in place of text that could not be parsed as a datetime
pub const INVALID_DATE_MARKER: &str = "Invalid date";

// Table widget attributes (the HTML5 data-* API of the table library)
pub const ATTR_PAGE_LENGTH: &str = "data-page-length";
pub const ATTR_ORDER: &str = "data-order";
/// Marker attribute recording that the widget has already been initialized
pub const ATTR_ENHANCED: &str = "data-enhanced";

// Table Widget Defaults
/// Default number of rows shown per table page
pub const DEFAULT_PAGE_LENGTH: u32 = 25;
/// Default initial sort column (zero-based)
pub const DEFAULT_SORT_COLUMN: usize = 3;
/// Minimum configurable page length
pub const PAGE_LENGTH_MIN: u32 = 1;
/// Maximum configurable page length
pub const PAGE_LENGTH_MAX: u32 = 500;

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_NO_INPUT: &str = "❌ Error: no input document";
