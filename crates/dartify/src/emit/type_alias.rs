//! Type alias bindings

use super::EmitContext;
use crate::decl::{Keyword, TypeAliasDecl, TypeMember, TypeNode};
use crate::types::JS_OBJECT;

/// Emit `typedef <Name> = <Type>;` for a type alias.
///
/// Object-like aliases always become `JSObject`; everything else goes
/// through the type mapper.
pub fn emit_type_alias(alias: &TypeAliasDecl, ctx: &mut EmitContext<'_>) -> String {
    let qualified = ctx.scope.qualify(&alias.name);
    let dart_type = if is_object_like(&alias.ts_type) {
        JS_OBJECT.to_string()
    } else {
        ctx.map_type(Some(&alias.ts_type))
    };

    format!(
        "@JS('{}')\n@staticInterop\ntypedef {} = {};\n\n",
        qualified, alias.name, dart_type
    )
}

/// Whether an aliased type is a plain JS object: a literal consisting of a
/// single index signature, the `object` keyword, or a reference to `Object`.
pub fn is_object_like(ty: &TypeNode) -> bool {
    match ty {
        TypeNode::Literal { members } => {
            matches!(members.as_slice(), [TypeMember::IndexSignature])
        }
        TypeNode::Keyword { keyword } => *keyword == Keyword::Object,
        TypeNode::Reference { name } => name == "Object",
        _ => false,
    }
}
