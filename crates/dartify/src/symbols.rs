//! Symbol table
//!
//! Maps every class, interface and type alias declared anywhere in the input
//! tree to the declaration file that defines it. The table is built once,
//! before any code is generated, and is read-only afterwards: resolution of
//! a type reference never depends on the order files are visited in.

use crate::decl::{DeclFile, DeclItem};
use indexmap::IndexMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// File-name prefix of platform declaration files (`lib.dom.d.ts`, ...)
pub const DEFAULT_PLATFORM_PREFIX: &str = "lib.";

/// Namespace-qualified symbol name, e.g. `ol.layer.Tile`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Qualify `name` with the namespace segments of `namespace`
    pub fn new(namespace: &NamespacePath, name: &str) -> Self {
        if namespace.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", namespace.segments().join("."), name))
        }
    }

    /// Get the dotted name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// All segments before the last one
    pub fn namespace_segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.0.split('.').collect();
        segments.pop();
        segments
    }

    /// The last segment
    pub fn symbol_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Enclosing namespaces of a declaration, outermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespacePath(Vec<String>);

impl NamespacePath {
    /// The empty (top-level) path
    pub fn root() -> Self {
        Self::default()
    }

    /// Path one level deeper
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for NamespacePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Recognizes platform declaration files by file-name prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformFilter {
    prefixes: Vec<String>,
}

impl Default for PlatformFilter {
    fn default() -> Self {
        Self::new([DEFAULT_PLATFORM_PREFIX])
    }
}

impl PlatformFilter {
    /// Create a filter from file-name prefixes
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `path` names a platform declaration file
    pub fn is_platform(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.prefixes
            .iter()
            .any(|prefix| file_name.starts_with(prefix.as_str()))
    }
}

/// Qualified name → defining declaration file
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<QualifiedName, PathBuf>,
    platform: PlatformFilter,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every declaration file, in order.
    ///
    /// When two files declare the same qualified name the later file wins.
    pub fn build(files: &[DeclFile], platform: &PlatformFilter) -> Self {
        let mut table = Self {
            symbols: IndexMap::new(),
            platform: platform.clone(),
        };

        for file in files {
            if platform.is_platform(&file.path) {
                tracing::trace!("Skipping platform file {}", file.path.display());
                continue;
            }
            table.scan(&file.items, &file.path, &NamespacePath::root());
        }

        tracing::debug!("Symbol table holds {} symbols", table.len());
        table
    }

    fn scan(&mut self, items: &[DeclItem], file: &Path, namespace: &NamespacePath) {
        for item in items {
            match item {
                DeclItem::Class(_) | DeclItem::Interface(_) | DeclItem::TypeAlias(_) => {
                    self.insert(QualifiedName::new(namespace, item.name()), file);
                }
                DeclItem::Namespace(ns) => self.scan(&ns.body, file, &namespace.child(&ns.name)),
                DeclItem::Function(_) => {}
            }
        }
    }

    /// Record a symbol, replacing any earlier definition
    pub fn insert(&mut self, name: QualifiedName, file: impl Into<PathBuf>) {
        let file = file.into();
        if let Some(previous) = self.symbols.get(&name) {
            if previous != &file {
                tracing::trace!(
                    "{} redeclared in {}, shadowing {}",
                    name,
                    file.display(),
                    previous.display()
                );
            }
        }
        self.symbols.insert(name, file);
    }

    /// Look up the file that defines a symbol
    pub fn lookup(&self, name: &QualifiedName) -> Option<&Path> {
        self.symbols.get(name).map(|p| p.as_path())
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.symbols.contains_key(name)
    }

    /// Whether `path` is a platform declaration file
    pub fn is_platform(&self, path: &Path) -> bool {
        self.platform.is_platform(path)
    }

    /// Iterate over all symbols in scan order
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &Path)> {
        self.symbols.iter().map(|(k, v)| (k, v.as_path()))
    }

    /// Get the number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
