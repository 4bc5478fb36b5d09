//! Dart binding emitters
//!
//! One emitter per declaration kind. Each turns a single declaration into
//! Dart JS-interop source text, mapping every annotated type through the
//! enclosing [`Scope`] and recording the imports those types need.
//!
//! Class and function emitters consult the per-record [`MemberSignatures`]
//! so that merged declarations of one symbol never emit the same member
//! twice. Emitters only ever add to it.

pub mod class;
pub mod function;
pub mod type_alias;

pub use class::emit_class;
pub use function::emit_function;
pub use type_alias::emit_type_alias;

use crate::decl::{ParamDecl, TypeNode};
use crate::symbols::QualifiedName;
use crate::types::{ImportSet, Scope};
use indexmap::{IndexMap, IndexSet};

/// Member signatures already emitted, per symbol
pub type MemberSignatures = IndexMap<QualifiedName, IndexSet<String>>;

/// Everything an emitter reads from or writes to
pub struct EmitContext<'a> {
    /// Where the declaration lives
    pub scope: Scope<'a>,
    /// Imports of the output file being written
    pub imports: &'a mut ImportSet,
    /// Member signatures of the output file being written
    pub emitted: &'a mut MemberSignatures,
}

impl<'a> EmitContext<'a> {
    pub fn new(scope: Scope<'a>, imports: &'a mut ImportSet, emitted: &'a mut MemberSignatures) -> Self {
        Self {
            scope,
            imports,
            emitted,
        }
    }

    /// Map a type annotation in the current scope
    pub fn map_type(&mut self, ty: Option<&TypeNode>) -> String {
        self.scope.map_type(ty, self.imports)
    }

    /// Render a parameter list as `T a, T? b`
    pub fn params(&mut self, params: &[ParamDecl]) -> String {
        params
            .iter()
            .map(|param| {
                let ty = self.map_type(param.ts_type.as_ref());
                let nullable = if param.optional { "?" } else { "" };
                format!("{}{} {}", ty, nullable, param.name)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Signature key of a callable: `name(a, b)`
pub fn call_signature(name: &str, params: &[ParamDecl]) -> String {
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    format!("{}({})", name, names.join(", "))
}

/// Signature key of a property: `get name`
pub fn property_signature(name: &str) -> String {
    format!("get {}", name)
}
