//! Declaration file discovery

use crate::diagnostics::{DartifyError, DartifyResult};
use crate::symbols::PlatformFilter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix of TypeScript declaration files
pub const DECLARATION_SUFFIX: &str = ".d.ts";

/// Whether a path names a `.d.ts` file
pub fn is_declaration_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(DECLARATION_SUFFIX))
}

/// Find every non-platform declaration file below `input_dir`, sorted by path.
///
/// Fails with [`DartifyError::NoDeclarationFiles`] when there are none.
pub fn discover_declaration_files(
    input_dir: impl AsRef<Path>,
    exclude: &PlatformFilter,
) -> DartifyResult<Vec<PathBuf>> {
    let input_dir = input_dir.as_ref();
    if !input_dir.is_dir() {
        return Err(DartifyError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input directory {} does not exist", input_dir.display()),
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir).follow_links(true) {
        let entry = entry.map_err(|e| DartifyError::Io(e.into()))?;
        let path = entry.path();

        if !entry.file_type().is_file() || !is_declaration_file(path) {
            continue;
        }
        if exclude.is_platform(path) {
            tracing::debug!("Excluding platform file {}", path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    if files.is_empty() {
        return Err(DartifyError::NoDeclarationFiles(input_dir.to_path_buf()));
    }

    files.sort();
    tracing::info!("Found {} declaration files in {}", files.len(), input_dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_declaration_file() {
        assert!(is_declaration_file(Path::new("ol/map.d.ts")));
        assert!(!is_declaration_file(Path::new("ol/map.ts")));
        assert!(!is_declaration_file(Path::new("ol/map.d.tsx")));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("ol/layer")).unwrap();
        fs::write(root.join("ol/view.d.ts"), "").unwrap();
        fs::write(root.join("ol/map.d.ts"), "").unwrap();
        fs::write(root.join("ol/layer/tile.d.ts"), "").unwrap();
        fs::write(root.join("ol/map.js"), "").unwrap();
        fs::write(root.join("lib.dom.d.ts"), "").unwrap();

        let files = discover_declaration_files(root, &PlatformFilter::default()).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("ol/layer/tile.d.ts"),
                root.join("ol/map.d.ts"),
                root.join("ol/view.d.ts"),
            ]
        );
    }

    #[test]
    fn test_discover_custom_exclusions() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("lib.dom.d.ts"), "").unwrap();
        fs::write(temp.path().join("vendor.shim.d.ts"), "").unwrap();

        let files = discover_declaration_files(temp.path(), &PlatformFilter::new(["vendor."])).unwrap();
        assert_eq!(files, vec![temp.path().join("lib.dom.d.ts")]);
    }

    #[test]
    fn test_discover_empty_tree() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.ts"), "").unwrap();

        let err = discover_declaration_files(temp.path(), &PlatformFilter::default()).unwrap_err();
        assert!(err.is_no_input());
    }

    #[test]
    fn test_discover_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = discover_declaration_files(temp.path().join("missing"), &PlatformFilter::default())
            .unwrap_err();
        assert!(matches!(err, DartifyError::Io(_)));
    }
}
