//! SWC/deno_ast TypeScript parsing utilities
//!
//! This module wraps deno_ast (which wraps SWC) for reading declaration
//! files. It handles:
//! - Parsing `.d.ts` sources into a module AST
//! - Turning SWC names and strings into owned Rust strings

use crate::diagnostics::{DartifyError, DartifyResult};
use deno_ast::swc::ast as swc_ast;
use deno_ast::{MediaType, ParseParams, ParsedSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A parsed TypeScript module together with the path it came from
#[derive(Debug)]
pub struct ParsedModule {
    /// The parsed source from deno_ast
    pub source: ParsedSource,
    /// The file path as given by the caller
    pub path: PathBuf,
}

impl ParsedModule {
    /// Get the module AST
    pub fn module(&self) -> DartifyResult<&swc_ast::Module> {
        match self.source.program_ref() {
            deno_ast::ProgramRef::Module(m) => Ok(m),
            deno_ast::ProgramRef::Script(_) => Err(DartifyError::parse(
                &self.path,
                "expected a module but got a script",
            )),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse a TypeScript file from disk
pub fn parse_typescript_file(path: impl AsRef<Path>) -> DartifyResult<ParsedModule> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        DartifyError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", path.display(), e),
        ))
    })?;

    parse_typescript_source(path, text)
}

/// Parse TypeScript source code from a string
pub fn parse_typescript_source(
    path: impl AsRef<Path>,
    source: impl Into<Arc<str>>,
) -> DartifyResult<ParsedModule> {
    let path = path.as_ref();

    // Media type follows the extension, so `.d.ts` parses as a declaration file
    let media_type = MediaType::from_path(path);

    // deno_ast wants an absolute file specifier
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let specifier = deno_ast::ModuleSpecifier::from_file_path(&absolute)
        .map_err(|_| DartifyError::InvalidPath(path.display().to_string()))?;

    let parsed = deno_ast::parse_module(ParseParams {
        specifier,
        text: source.into(),
        media_type,
        capture_tokens: false,
        scope_analysis: false,
        maybe_syntax: None,
    })
    .map_err(|e| DartifyError::parse(path, e.to_string()))?;

    Ok(ParsedModule {
        source: parsed,
        path: path.to_path_buf(),
    })
}

/// Helper to convert Wtf8Atom to String
pub fn wtf8_to_string(s: &swc_ast::Str) -> String {
    // Wtf8Atom stores WTF-8 encoded data which is a superset of UTF-8
    String::from_utf8_lossy(s.value.as_bytes()).into_owned()
}

/// Name of a class member key, as written in source
pub fn prop_name_to_string(name: &swc_ast::PropName) -> String {
    match name {
        swc_ast::PropName::Ident(i) => i.sym.to_string(),
        swc_ast::PropName::Str(s) => wtf8_to_string(s),
        swc_ast::PropName::Num(n) => n.value.to_string(),
        swc_ast::PropName::BigInt(b) => b.value.to_string(),
        swc_ast::PropName::Computed(c) => match expr_to_name(&c.expr) {
            Some(name) => format!("[{}]", name),
            None => "[computed]".to_string(),
        },
    }
}

/// Dotted name of an entity (`Foo`, `ns.Foo`)
pub fn entity_name_to_string(name: &swc_ast::TsEntityName) -> String {
    match name {
        swc_ast::TsEntityName::Ident(i) => i.sym.to_string(),
        swc_ast::TsEntityName::TsQualifiedName(q) => {
            format!("{}.{}", entity_name_to_string(&q.left), q.right.sym)
        }
    }
}

/// Get the name from an expression (for computed properties)
fn expr_to_name(expr: &swc_ast::Expr) -> Option<String> {
    match expr {
        swc_ast::Expr::Ident(i) => Some(i.sym.to_string()),
        swc_ast::Expr::Lit(swc_ast::Lit::Str(s)) => Some(wtf8_to_string(s)),
        swc_ast::Expr::Member(m) => {
            // Handle Symbol.iterator etc.
            let obj = expr_to_name(&m.obj)?;
            match &m.prop {
                swc_ast::MemberProp::Ident(i) => Some(format!("{}.{}", obj, i.sym)),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declaration_source() {
        let source = r#"
            export declare class Map {
                getView(): View;
            }
            export declare function fromLonLat(coordinate: number[]): number[];
        "#;

        let parsed = parse_typescript_source("/tmp/ol/map.d.ts", source).unwrap();
        assert_eq!(parsed.module().unwrap().body.len(), 2);
        assert_eq!(parsed.path(), Path::new("/tmp/ol/map.d.ts"));
    }

    #[test]
    fn test_relative_path_is_kept() {
        let parsed = parse_typescript_source("ol/view.d.ts", "export declare class View {}").unwrap();
        assert_eq!(parsed.path(), Path::new("ol/view.d.ts"));
    }

    #[test]
    fn test_parse_error() {
        let result = parse_typescript_source("/tmp/broken.d.ts", "export declare class {");
        assert!(matches!(
            result,
            Err(DartifyError::TypeScriptParse { .. })
        ));
    }
}
