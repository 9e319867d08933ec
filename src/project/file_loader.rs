//! Finding and reading configuration files on disk.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while locating or reading configuration files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),
}

impl LoadError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Recursively collect every file under `dir` whose extension is one of
/// `extensions`, sorted by path.
pub fn collect_file_paths<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
    }
    let mut paths = Vec::new();
    collect_recursive(dir, extensions, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive<S: AsRef<str>>(
    dir: &Path,
    extensions: &[S],
    paths: &mut Vec<PathBuf>,
) -> Result<(), LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| LoadError::io(dir, e))?.path();
        if path.is_dir() {
            collect_recursive(&path, extensions, paths)?;
        } else if validate_extension(&path, extensions).is_ok() {
            paths.push(path);
        }
    }
    Ok(())
}

/// The extension of `path` when it is one of `extensions`.
pub fn validate_extension<'p, S: AsRef<str>>(path: &'p Path, extensions: &[S]) -> Result<&'p str, LoadError> {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|ext| extensions.iter().any(|supported| supported.as_ref() == *ext))
        .ok_or_else(|| LoadError::UnsupportedExtension(path.to_path_buf()))
}

/// Load file contents.
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
}
