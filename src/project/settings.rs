//! Project settings read from a `[confit]` table.
//!
//! ```toml
//! [confit]
//! markers = ["factory", "validator"]
//! reference_syntax = "interpolation"
//! source = "confit"
//! extensions = ["toml"]
//! ```
//!
//! The same table is accepted under `[tool.confit]`. Unknown keys are
//! ignored with a warning.

use std::sync::Arc;

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::constants::{
    DEFAULT_DIAGNOSTIC_SOURCE, DEFAULT_MARKER, SETTINGS_TABLES, SUPPORTED_EXTENSIONS,
};
use crate::hir::{BarePath, FactoryCatalog, Interpolation, SchemaRegistry};
use crate::ide::AnalysisHost;
use crate::syntax::{ParseError, Table, Value, lower};

/// Errors raised while reading settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid setting `{key}`: {message}")]
    Invalid { key: SmolStr, message: String },
}

impl SettingsError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// How string values are recognized as references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceStyle {
    /// `"${path}"`
    #[default]
    Interpolation,
    /// Any string that parses as a path.
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Marker keys that bind an object to a factory.
    pub markers: Vec<SmolStr>,
    pub reference_syntax: ReferenceStyle,
    /// Reported as the `source` of every diagnostic.
    pub source: SmolStr,
    /// File extensions picked up by the workspace loader.
    pub extensions: Vec<SmolStr>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            markers: vec![SmolStr::new_static(DEFAULT_MARKER)],
            reference_syntax: ReferenceStyle::default(),
            source: SmolStr::new_static(DEFAULT_DIAGNOSTIC_SOURCE),
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| SmolStr::new(e)).collect(),
        }
    }
}

impl Settings {
    /// Read settings from a TOML document. Missing tables and keys keep
    /// their defaults.
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        let document = lower(text)?;
        let mut settings = Self::default();
        let Some(table) = settings_table(&document.root) else {
            return Ok(settings);
        };

        for (key, value) in table {
            match key.as_str() {
                "markers" => settings.markers = decode(key, value)?,
                "extensions" => settings.extensions = decode(key, value)?,
                "source" => settings.source = decode(key, value)?,
                "reference_syntax" => settings.reference_syntax = decode(key, value)?,
                other => tracing::warn!(key = other, "ignoring unknown setting"),
            }
        }

        if settings.markers.is_empty() {
            return Err(SettingsError::invalid("markers", "at least one marker is required"));
        }
        Ok(settings)
    }

    /// A catalog that offers `registry` under every configured marker.
    pub fn catalog(&self, registry: impl Into<Arc<SchemaRegistry>>) -> FactoryCatalog {
        let registry = registry.into();
        self.markers
            .iter()
            .fold(FactoryCatalog::new(), |catalog, marker| {
                catalog.with_marker(marker.clone(), registry.clone())
            })
    }

    /// An analysis host for `catalog` using these settings.
    pub fn analysis_host(&self, catalog: impl Into<Arc<FactoryCatalog>>) -> AnalysisHost {
        let host = AnalysisHost::new(catalog).with_source(self.source.as_str());
        match self.reference_syntax {
            ReferenceStyle::Interpolation => host.with_reference_syntax(Interpolation),
            ReferenceStyle::Bare => host.with_reference_syntax(BarePath),
        }
    }
}

fn settings_table(root: &Table) -> Option<&Table> {
    SETTINGS_TABLES.iter().find_map(|path| {
        path.iter()
            .try_fold(root, |table, key| table.get(*key).and_then(Value::as_table))
    })
}

/// Decoding of one setting value into its typed form.
trait FromSetting: Sized {
    fn from_setting(value: &Value) -> Result<Self, String>;
}

fn decode<T: FromSetting>(key: &str, value: &Value) -> Result<T, SettingsError> {
    T::from_setting(value).map_err(|message| SettingsError::invalid(key, message))
}

impl FromSetting for SmolStr {
    fn from_setting(value: &Value) -> Result<Self, String> {
        value
            .as_str()
            .map(SmolStr::from)
            .ok_or_else(|| format!("expected a string, found {}", value.kind_name()))
    }
}

impl<T: FromSetting> FromSetting for Vec<T> {
    fn from_setting(value: &Value) -> Result<Self, String> {
        value
            .as_array()
            .ok_or_else(|| format!("expected an array, found {}", value.kind_name()))?
            .iter()
            .map(T::from_setting)
            .collect()
    }
}

impl FromSetting for ReferenceStyle {
    fn from_setting(value: &Value) -> Result<Self, String> {
        match SmolStr::from_setting(value)?.as_str() {
            "interpolation" => Ok(Self::Interpolation),
            "bare" => Ok(Self::Bare),
            other => Err(format!("unknown reference syntax `{other}`")),
        }
    }
}
