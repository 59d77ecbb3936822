//! Rendering and writing of generated files

use crate::cleanup::clean;
use crate::kotlin::FileSpec;
use avk_core::{AvkError, AvkResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Final source text of a file: rendered, then cleaned
pub fn emit(file: &FileSpec) -> String {
    clean(&file.render(), &file.package)
}

/// `<src>/<package path>/<Name>.kt`
pub fn source_path(src_dir: &Path, package: &str, name: &str) -> PathBuf {
    let mut path = src_dir.to_path_buf();
    for segment in package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{name}.kt"));
    path
}

/// Write `contents` to `path` through a temporary file in the same
/// directory, so readers never see a partial file.
pub fn write_atomically(path: &Path, contents: &str) -> AvkResult<()> {
    let parent = path
        .parent()
        .ok_or_else(|| AvkError::Internal(format!("no parent directory for {}", path.display())))?;
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;
    temp.persist(path).map_err(|e| AvkError::Io(e.error))?;

    info!(path = %path.display(), bytes = contents.len(), "wrote source file");
    Ok(())
}

#[cfg(test)]
#[path = "emitter/emitter_tests.rs"]
mod emitter_tests;
