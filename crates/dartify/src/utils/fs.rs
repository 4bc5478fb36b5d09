//! Filesystem helpers

use crate::diagnostics::DartifyResult;
use std::fs;
use std::path::Path;

/// Create a directory and all of its parents
pub fn ensure_dir_exists(dir: impl AsRef<Path>) -> DartifyResult<()> {
    fs::create_dir_all(dir.as_ref())?;
    Ok(())
}

/// Write a file, creating its parent directories first
pub fn write_file(path: impl AsRef<Path>, content: &str) -> DartifyResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// File names of the `.dart` files directly inside `folder`, sorted.
///
/// Subdirectories and names listed in `exclude` are skipped.
pub fn list_dart_files(folder: impl AsRef<Path>, exclude: &[&str]) -> DartifyResult<Vec<String>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(folder.as_ref())? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".dart") && !exclude.contains(&name.as_str()) {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

/// Render a path with forward slashes
pub fn to_slash(path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}
