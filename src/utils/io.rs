//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Copy `from` over `to` byte-for-byte. The destination keeps its own path;
/// no directories are created.
pub fn copy_file(from: &Path, to: &Path, operation: &str) -> Result<u64> {
    fs::copy(from, to).map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("create {}", dir.display())))
        })?;
    }
    Ok(())
}

/// Expand `~` and resolve relative paths against `root`.
pub fn resolve_path(root: &Path, raw: &str) -> PathBuf {
    let expanded = shellexpand::tilde(raw).to_string();
    let path = PathBuf::from(expanded);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
