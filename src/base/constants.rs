//! Domain constants shared across modules.

/// Marker key used when no settings are supplied.
pub const DEFAULT_MARKER: &str = "factory";

/// Value of the `source` field of every diagnostic unless configured otherwise.
pub const DEFAULT_DIAGNOSTIC_SOURCE: &str = "confit";

/// Configuration file extension.
pub const TOML_EXT: &str = "toml";

/// Supported configuration file extensions.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[TOML_EXT];

/// Number of docstring characters shown in a completion item's detail.
pub const COMPLETION_DETAIL_CHARS: usize = 50;

/// Settings table names, tried in order.
pub const SETTINGS_TABLES: &[&[&str]] = &[&["confit"], &["tool", "confit"]];
