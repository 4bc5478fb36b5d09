//! Type mapping
//!
//! Turns TypeScript type annotations into Dart JS-interop type names. Only
//! the scalar keywords, arrays and references to declared symbols have a
//! binding; everything else becomes [`JS_OBJECT`].

use crate::decl::{Keyword, TypeNode};
use crate::symbols::{NamespacePath, QualifiedName, SymbolTable};
use std::collections::BTreeSet;
use std::path::Path;

/// Opaque fallback type
pub const JS_OBJECT: &str = "JSObject";
pub const JS_STRING: &str = "JSString";
pub const JS_NUMBER: &str = "JSNumber";
pub const JS_BOOLEAN: &str = "JSBoolean";
pub const DART_VOID: &str = "void";

/// Import paths required by one output file
pub type ImportSet = BTreeSet<String>;

/// Where a declaration is being emitted from
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Read-only symbol table of the whole run
    pub symbols: &'a SymbolTable,
    /// Declaration file that holds the declaration
    pub current_file: &'a Path,
    /// Namespaces enclosing the declaration
    pub namespace: &'a NamespacePath,
}

impl<'a> Scope<'a> {
    pub fn new(symbols: &'a SymbolTable, current_file: &'a Path, namespace: &'a NamespacePath) -> Self {
        Self {
            symbols,
            current_file,
            namespace,
        }
    }

    /// Qualified name of a symbol declared in this scope
    pub fn qualify(&self, name: &str) -> QualifiedName {
        QualifiedName::new(self.namespace, name)
    }

    /// Map a type annotation, recording any import it needs
    pub fn map_type(&self, ty: Option<&TypeNode>, imports: &mut ImportSet) -> String {
        map_type(ty, self.symbols, imports, self.current_file, self.namespace)
    }
}

/// Map a TypeScript type annotation to a Dart type name.
///
/// References resolve only against the enclosing namespace: `Foo` inside
/// `namespace ol` looks up `ol.Foo` and nothing else. A resolved reference
/// declared in another, non-platform file adds an import to `imports`.
pub fn map_type(
    ty: Option<&TypeNode>,
    symbols: &SymbolTable,
    imports: &mut ImportSet,
    current_file: &Path,
    namespace: &NamespacePath,
) -> String {
    let Some(ty) = ty else {
        return JS_OBJECT.to_string();
    };

    match ty {
        TypeNode::Reference { name } => {
            let qualified = QualifiedName::new(namespace, name);
            match symbols.lookup(&qualified) {
                Some(file) => {
                    if file != current_file && !symbols.is_platform(file) {
                        imports.insert(import_path(&qualified));
                    }
                    qualified.symbol_name().to_string()
                }
                None => {
                    tracing::trace!("Unresolved type {}, using {}", qualified, JS_OBJECT);
                    JS_OBJECT.to_string()
                }
            }
        }
        TypeNode::Array { element } => format!(
            "JSArray<{}>",
            map_type(Some(element.as_ref()), symbols, imports, current_file, namespace)
        ),
        TypeNode::Keyword { keyword } => keyword_type(*keyword).to_string(),
        TypeNode::Literal { .. } | TypeNode::Other => JS_OBJECT.to_string(),
    }
}

/// Binding type of a keyword
pub fn keyword_type(keyword: Keyword) -> &'static str {
    match keyword {
        Keyword::String => JS_STRING,
        Keyword::Number => JS_NUMBER,
        Keyword::Boolean => JS_BOOLEAN,
        Keyword::Void => DART_VOID,
        Keyword::Any
        | Keyword::Object
        | Keyword::Unknown
        | Keyword::Never
        | Keyword::Undefined
        | Keyword::Null
        | Keyword::Symbol
        | Keyword::BigInt
        | Keyword::Intrinsic => JS_OBJECT,
    }
}

/// Import path of a referenced symbol.
///
/// The directory part comes from the symbol's namespace segments only, so
/// for a symbol without a namespace this is `./<name>.dart` regardless of
/// which folder its binding is written to.
pub fn import_path(name: &QualifiedName) -> String {
    let mut parts: Vec<String> = name
        .namespace_segments()
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    parts.push(format!("{}.dart", name.symbol_name().to_lowercase()));

    let path = parts.join("/");
    if path.starts_with('.') {
        path
    } else {
        format!("./{}", path)
    }
}
