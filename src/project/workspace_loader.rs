use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::file_loader::{self, LoadError};
use crate::hir::Diagnostic;
use crate::ide::AnalysisHost;
use crate::syntax::ParseError;

/// The outcome of validating one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// Diagnostics in pipeline order, or the error that stopped parsing.
    pub result: Result<Vec<Diagnostic>, ParseError>,
}

impl FileReport {
    /// Whether the file parsed and produced no errors.
    pub fn is_clean(&self) -> bool {
        matches!(&self.result, Ok(diagnostics) if diagnostics.iter().all(|d| !d.is_error()))
    }
}

/// Validates configuration files found on disk.
#[derive(Debug, Clone)]
pub struct WorkspaceLoader {
    extensions: Vec<String>,
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::with_extensions(crate::base::constants::SUPPORTED_EXTENSIONS)
    }
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            extensions: extensions.iter().map(|e| e.as_ref().to_string()).collect(),
        }
    }

    /// Validate every configuration file under `dir` in parallel.
    ///
    /// Reports are sorted by path. Files that cannot be read abort the whole
    /// run; files that do not parse are reported individually.
    pub fn validate_directory(&self, dir: &Path, host: &AnalysisHost) -> Result<Vec<FileReport>, LoadError> {
        let paths = file_loader::collect_file_paths(dir, &self.extensions)?;

        let reports = paths
            .par_iter()
            .map(|path| {
                let text = file_loader::load_file(path)?;
                Ok(FileReport {
                    path: path.clone(),
                    result: host.validate(&uri(path), &text),
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        tracing::debug!(
            dir = %dir.display(),
            files = reports.len(),
            failed = reports.iter().filter(|r| !r.is_clean()).count(),
            "validated workspace"
        );
        Ok(reports)
    }

    /// Validate a single file.
    pub fn validate_file(&self, path: &Path, host: &AnalysisHost) -> Result<FileReport, LoadError> {
        file_loader::validate_extension(path, &self.extensions)?;
        let text = file_loader::load_file(path)?;
        Ok(FileReport {
            path: path.to_path_buf(),
            result: host.validate(&uri(path), &text),
        })
    }
}

fn uri(path: &Path) -> String {
    format!("file://{}", path.display())
}
