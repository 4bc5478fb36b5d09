//! Top-level function bindings

use super::{call_signature, EmitContext};
use crate::decl::FunctionDecl;

/// Emit `@JS('<name>') external R f(...);` for a function.
///
/// A function whose `name(params)` signature was already emitted for the
/// same qualified name produces an empty string and no imports.
pub fn emit_function(function: &FunctionDecl, ctx: &mut EmitContext<'_>) -> String {
    let qualified = ctx.scope.qualify(&function.name);
    let signature = call_signature(&function.name, &function.params);

    if ctx
        .emitted
        .get(&qualified)
        .is_some_and(|signatures| signatures.contains(&signature))
    {
        tracing::debug!("Skipping duplicate function {}", signature);
        return String::new();
    }

    let params = ctx.params(&function.params);
    let return_type = ctx.map_type(function.return_type.as_ref());
    ctx.emitted.entry(qualified.clone()).or_default().insert(signature);

    format!(
        "@JS('{}')\nexternal {} {}({});\n\n",
        qualified, return_type, function.name, params
    )
}
