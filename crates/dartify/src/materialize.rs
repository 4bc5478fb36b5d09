//! Writing bindings to disk
//!
//! Turns the in-memory output records into `.dart` files and writes the
//! aggregator files that re-export them:
//!
//! ```text
//! out/
//! ├── control.dart          export './ol/control/control.dart';
//! └── ol/control/
//!     ├── control.dart      // Library file for control
//!     ├── bar.dart
//!     └── foo.dart
//! ```

use crate::diagnostics::{DartifyError, DartifyResult};
use crate::router::OutputRecords;
use crate::types::ImportSet;
use crate::utils::{list_dart_files, to_slash, write_file};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Aggregator file name never re-exported by folder aggregators
pub const BARREL_FILE: &str = "barrel.dart";

/// Files written by [`materialize`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Materialized {
    /// Binding files, sorted
    pub files: Vec<PathBuf>,
    /// Folders holding at least one binding file, sorted
    pub folders: Vec<PathBuf>,
    /// Folder and root aggregator files, in write order
    pub aggregators: Vec<PathBuf>,
}

/// Render a binding file: sorted imports, a blank line, then the code
pub fn render_dart_file(code: &str, imports: &ImportSet) -> String {
    let mut output = String::new();

    for import in imports {
        output.push_str(&format!("import '{}';\n", import));
    }
    if !imports.is_empty() {
        output.push('\n');
    }

    output.push_str(code);
    output
}

/// Write a binding file, creating its parent directories
pub fn write_dart_file(path: impl AsRef<Path>, code: &str, imports: &ImportSet) -> DartifyResult<()> {
    write_file(path, &render_dart_file(code, imports))
}

/// Write `<folder>/<folder name>.dart` re-exporting every sibling `.dart`
/// file, and return its path.
pub fn create_folder_barrel(folder: impl AsRef<Path>) -> DartifyResult<PathBuf> {
    let folder = folder.as_ref();
    let name = folder_name(folder)?;
    let own_file = format!("{}.dart", name);

    let files = list_dart_files(folder, &[BARREL_FILE, own_file.as_str()])?;
    let exports: Vec<String> = files.iter().map(|f| format!("export './{}';", f)).collect();

    let path = folder.join(&own_file);
    write_file(
        &path,
        &format!("// Library file for {}\n{}\n", name, exports.join("\n")),
    )?;
    Ok(path)
}

/// Write one `<folder name>.dart` per folder at the output root, each
/// re-exporting that folder's aggregator. Returns the written paths.
pub fn create_root_exports<'a, I>(folders: I, output_root: impl AsRef<Path>) -> DartifyResult<Vec<PathBuf>>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    let output_root = output_root.as_ref();
    let mut written = Vec::new();

    for folder in folders {
        let name = folder_name(folder)?;
        let aggregator = folder.join(format!("{}.dart", name));
        let relative = aggregator
            .strip_prefix(output_root)
            .map_err(|_| DartifyError::InvalidPath(aggregator.display().to_string()))?;

        let path = output_root.join(format!("{}.dart", name));
        write_file(&path, &format!("export './{}';\n", to_slash(relative)))?;
        written.push(path);
    }

    Ok(written)
}

/// Write every non-empty record, then the aggregators
pub fn materialize(
    records: &OutputRecords,
    output_root: impl AsRef<Path>,
    write_aggregators: bool,
) -> DartifyResult<Materialized> {
    let output_root = output_root.as_ref();
    let mut files = BTreeSet::new();
    let mut folders = BTreeSet::new();

    for (path, record) in records {
        if record.is_empty() {
            tracing::debug!("Nothing generated for {}, skipping", path);
            continue;
        }

        let path = PathBuf::from(path);
        write_dart_file(&path, &record.code(), &record.imports())?;
        if let Some(parent) = path.parent() {
            folders.insert(parent.to_path_buf());
        }
        files.insert(path);
    }
    tracing::info!("Wrote {} binding files", files.len());

    let mut aggregators = Vec::new();
    if write_aggregators {
        for folder in &folders {
            let barrel = create_folder_barrel(folder)?;
            if files.contains(&barrel) {
                tracing::warn!(
                    "Aggregator {} replaced a generated binding of the same name",
                    barrel.display()
                );
            }
            aggregators.push(barrel);
        }
        aggregators.extend(create_root_exports(&folders, output_root)?);
        tracing::info!("Wrote {} aggregator files", aggregators.len());
    }

    Ok(Materialized {
        files: files.into_iter().collect(),
        folders: folders.into_iter().collect(),
        aggregators,
    })
}

fn folder_name(folder: &Path) -> DartifyResult<String> {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| DartifyError::InvalidPath(folder.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{route, OutputLayout};
    use crate::symbols::{PlatformFilter, SymbolTable};
    use crate::test::{mock_class, mock_file};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_dart_file() {
        let imports: ImportSet = ["./ol/view.dart", "./ol/layer/tile.dart"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            render_dart_file("class A {}\n", &imports),
            "import './ol/layer/tile.dart';\nimport './ol/view.dart';\n\nclass A {}\n"
        );
        assert_eq!(render_dart_file("class A {}\n", &ImportSet::new()), "class A {}\n");
    }

    #[test]
    fn test_write_dart_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/test.dart");
        let imports: ImportSet = ["foo.dart".to_string()].into_iter().collect();

        write_dart_file(&path, "void main() {}", &imports).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("import 'foo.dart';"));
        assert!(content.ends_with("void main() {}"));
    }

    #[test]
    fn test_folder_barrel_excludes_existing_aggregators() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("barreldir");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("foo.dart"), "// foo").unwrap();
        fs::write(folder.join("bar.dart"), "// bar").unwrap();
        fs::write(folder.join("barrel.dart"), "// old").unwrap();
        fs::write(folder.join("barreldir.dart"), "// stale").unwrap();

        let path = create_folder_barrel(&folder).unwrap();
        assert_eq!(path, folder.join("barreldir.dart"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "// Library file for barreldir\nexport './bar.dart';\nexport './foo.dart';\n"
        );
    }

    #[test]
    fn test_root_exports() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_path_buf();
        let folders = vec![out.join("ol/control"), out.join("ol/layer")];

        let written = create_root_exports(&folders, &out).unwrap();
        assert_eq!(written, vec![out.join("control.dart"), out.join("layer.dart")]);
        assert_eq!(
            fs::read_to_string(out.join("control.dart")).unwrap(),
            "export './ol/control/control.dart';\n"
        );
    }

    #[test]
    fn test_root_exports_reject_foreign_folder() {
        let temp = TempDir::new().unwrap();
        let folders = vec![PathBuf::from("/somewhere/else")];
        let result = create_root_exports(&folders, temp.path());
        assert!(matches!(result, Err(DartifyError::InvalidPath(_))));
    }

    #[test]
    fn test_materialize_records() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let files = vec![mock_file("in/ol/control.d.ts", vec![mock_class("Foo"), mock_class("Bar")])];
        let table = SymbolTable::build(&files, &PlatformFilter::default());
        let records = route(&files, &table, &OutputLayout::new("in", &out));

        let written = materialize(&records, &out, true).unwrap();
        let folder = out.join("ol/control");
        assert_eq!(
            written.files,
            vec![folder.join("bar.dart"), folder.join("foo.dart")]
        );
        assert_eq!(written.folders, vec![folder.clone()]);
        assert_eq!(
            written.aggregators,
            vec![folder.join("control.dart"), out.join("control.dart")]
        );
        assert!(fs::read_to_string(folder.join("foo.dart"))
            .unwrap()
            .starts_with("@JS('Foo')"));
    }

    #[test]
    fn test_materialize_without_aggregators() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let files = vec![mock_file("in/view.d.ts", vec![mock_class("View")])];
        let table = SymbolTable::build(&files, &PlatformFilter::default());
        let records = route(&files, &table, &OutputLayout::new("in", &out));

        let written = materialize(&records, &out, false).unwrap();
        assert_eq!(written.files.len(), 1);
        assert!(written.aggregators.is_empty());
        assert!(!out.join("view.dart").exists());
    }
}
