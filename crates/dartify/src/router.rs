//! Traversal and output routing
//!
//! Walks every declaration file, descends into namespace blocks, and sends
//! each class, function and type alias to the output file it belongs in.
//! Output is accumulated in memory as one [`OutputRecord`] per output path;
//! nothing touches the filesystem here.

use crate::decl::{DeclFile, DeclItem};
use crate::emit::{emit_class, emit_function, emit_type_alias, EmitContext, MemberSignatures};
use crate::symbols::{NamespacePath, QualifiedName, SymbolTable};
use crate::types::{ImportSet, Scope};
use crate::utils::to_slash;
use indexmap::IndexMap;
use std::path::{Component, Path, PathBuf};

/// Output records keyed by output path, in first-routed order
pub type OutputRecords = IndexMap<String, OutputRecord>;

/// Input and output roots of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl OutputLayout {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }

    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Output file of a symbol.
    ///
    /// Namespaced symbols go to `<out>/<namespace, lowercased>/<name>.dart`.
    /// Everything else goes to a folder named after the source file:
    /// `<out>/<source relative to input root, .d.ts stripped>/<name>.dart`.
    pub fn output_path(&self, name: &str, namespace: &NamespacePath, source: &Path) -> String {
        let mut path = self.output_root.clone();

        if namespace.is_empty() {
            let relative = to_slash(self.relative_source(source));
            let folder = relative.strip_suffix(".d.ts").unwrap_or(&relative);
            path.push(folder);
        } else {
            for segment in namespace.segments() {
                path.push(segment.to_lowercase());
            }
        }

        path.push(format!("{}.dart", name.to_lowercase()));
        to_slash(path)
    }

    fn relative_source(&self, source: &Path) -> PathBuf {
        match source.strip_prefix(&self.input_root) {
            Ok(relative) => relative.to_path_buf(),
            // Outside the input root: keep only the plain components
            Err(_) => source
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect(),
        }
    }
}

/// Generated code of one declaration visit and the imports it needs
#[derive(Debug, Clone, Default)]
struct Chunk {
    code: String,
    imports: ImportSet,
}

/// Accumulated output of one binding file
#[derive(Debug, Clone, Default)]
pub struct OutputRecord {
    chunks: Vec<Chunk>,
    typedefs: IndexMap<QualifiedName, usize>,
    emitted: MemberSignatures,
}

impl OutputRecord {
    /// Generated source, in emission order
    pub fn code(&self) -> String {
        self.chunks.iter().map(|c| c.code.as_str()).collect()
    }

    /// Imports the generated source needs
    pub fn imports(&self) -> ImportSet {
        self.chunks
            .iter()
            .flat_map(|c| c.imports.iter().cloned())
            .collect()
    }

    /// Member signatures emitted so far, per symbol
    pub fn emitted(&self) -> &MemberSignatures {
        &self.emitted
    }

    /// Check if no code was generated
    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|c| c.code.is_empty())
    }

    fn push(&mut self, code: String, imports: ImportSet) {
        if !code.is_empty() {
            self.chunks.push(Chunk { code, imports });
        }
    }

    /// Set the typedef of `name`, replacing an earlier one and its imports in place
    fn set_typedef(&mut self, name: QualifiedName, code: String, imports: ImportSet) {
        let chunk = Chunk { code, imports };
        match self.typedefs.get(&name) {
            Some(&slot) => {
                tracing::debug!("Replacing typedef {}", name);
                self.chunks[slot] = chunk;
            }
            None => {
                self.typedefs.insert(name, self.chunks.len());
                self.chunks.push(chunk);
            }
        }
    }
}

/// Routes declarations into output records
pub struct Router<'a> {
    symbols: &'a SymbolTable,
    layout: &'a OutputLayout,
    records: OutputRecords,
}

impl<'a> Router<'a> {
    pub fn new(symbols: &'a SymbolTable, layout: &'a OutputLayout) -> Self {
        Self {
            symbols,
            layout,
            records: OutputRecords::new(),
        }
    }

    /// Route every declaration of a file. Platform files are skipped.
    pub fn route_file(&mut self, file: &DeclFile) {
        if self.symbols.is_platform(&file.path) {
            tracing::trace!("Not routing platform file {}", file.path.display());
            return;
        }
        self.visit(&file.items, &file.path, &NamespacePath::root());
    }

    fn visit(&mut self, items: &[DeclItem], file: &Path, namespace: &NamespacePath) {
        for item in items {
            match item {
                DeclItem::Namespace(ns) => self.visit(&ns.body, file, &namespace.child(&ns.name)),
                DeclItem::Interface(_) => {}
                DeclItem::Class(_) | DeclItem::Function(_) | DeclItem::TypeAlias(_) => {
                    self.emit(item, file, namespace)
                }
            }
        }
    }

    fn emit(&mut self, item: &DeclItem, file: &Path, namespace: &NamespacePath) {
        let path = self.layout.output_path(item.name(), namespace, file);
        let scope = Scope::new(self.symbols, file, namespace);
        tracing::debug!("Routing {} to {}", scope.qualify(item.name()), path);

        let record = self.records.entry(path).or_default();
        let mut imports = ImportSet::new();
        let mut ctx = EmitContext::new(scope, &mut imports, &mut record.emitted);

        match item {
            DeclItem::Class(class) => {
                let code = emit_class(class, &mut ctx);
                record.push(code, imports);
            }
            DeclItem::Function(function) => {
                let code = emit_function(function, &mut ctx);
                record.push(code, imports);
            }
            DeclItem::TypeAlias(alias) => {
                let code = emit_type_alias(alias, &mut ctx);
                record.set_typedef(scope.qualify(&alias.name), code, imports);
            }
            DeclItem::Interface(_) | DeclItem::Namespace(_) => {}
        }
    }

    /// Finish routing
    pub fn into_records(self) -> OutputRecords {
        self.records
    }
}

/// Route all files, in order, into output records
pub fn route(files: &[DeclFile], symbols: &SymbolTable, layout: &OutputLayout) -> OutputRecords {
    let mut router = Router::new(symbols, layout);
    for file in files {
        router.route_file(file);
    }
    router.into_records()
}
