//! Project layer: settings, schema manifests and on-disk workspaces.

pub mod file_loader;
pub mod manifest;
mod settings;
mod workspace_loader;

pub use file_loader::LoadError;
pub use manifest::{ManifestError, load_manifest, parse_manifest};
pub use settings::{ReferenceStyle, Settings, SettingsError};
pub use workspace_loader::{FileReport, WorkspaceLoader};
