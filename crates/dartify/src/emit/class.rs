//! Class bindings
//!
//! A class becomes a `@staticInterop` stub carrying only a factory
//! constructor, plus an extension holding its instance members:
//!
//! ```dart
//! @JS('ol.Map')
//! @staticInterop
//! class Map {
//!   external factory Map(JSObject? opt_options);
//! }
//!
//! extension MapExtension on Map {
//!   external View getView();
//!   external JSNumber get zoom;
//!   external set zoom(JSNumber value);
//! }
//! ```
//!
//! Later declarations of the same class (declaration merging) emit only an
//! extension with the members not seen before.

use super::{call_signature, property_signature, EmitContext};
use crate::decl::{ClassDecl, ClassMember};
use crate::symbols::QualifiedName;
use indexmap::IndexSet;

/// Emit the binding for a class declaration.
///
/// Returns an empty string when the class was already declared in this
/// output file and contributes no new member.
pub fn emit_class(class: &ClassDecl, ctx: &mut EmitContext<'_>) -> String {
    let qualified = ctx.scope.qualify(&class.name);
    let mut output = String::new();

    if ctx.emitted.contains_key(&qualified) {
        tracing::debug!("Merging further members into {}", qualified);
    } else {
        output.push_str(&stub(&qualified, &class.name));
        ctx.emitted.insert(qualified.clone(), IndexSet::new());
    }

    let mut body = String::new();
    for member in &class.members {
        match member {
            ClassMember::Method(method) => {
                let signature = call_signature(&method.name, &method.params);
                if is_emitted(ctx, &qualified, &signature) {
                    tracing::debug!("Skipping duplicate {}.{}", qualified, signature);
                    continue;
                }

                let params = ctx.params(&method.params);
                let return_type = ctx.map_type(method.return_type.as_ref());
                body.push_str(&format!(
                    "  external {} {}({});\n",
                    return_type, method.name, params
                ));
                record(ctx, &qualified, signature);
            }
            ClassMember::Property(property) => {
                let signature = property_signature(&property.name);
                if is_emitted(ctx, &qualified, &signature) {
                    tracing::debug!("Skipping duplicate {}.{}", qualified, signature);
                    continue;
                }

                let ty = ctx.map_type(property.ts_type.as_ref());
                body.push_str(&format!("  external {} get {};\n", ty, property.name));
                if !property.readonly {
                    body.push_str(&format!(
                        "  external set {}({} value);\n",
                        property.name, ty
                    ));
                }
                record(ctx, &qualified, signature);
            }
        }
    }

    if !body.is_empty() {
        output.push_str(&format!(
            "extension {}Extension on {} {{\n{}}}\n\n",
            class.name, class.name, body
        ));
    }

    output
}

fn stub(qualified: &QualifiedName, name: &str) -> String {
    format!(
        "@JS('{}')\n@staticInterop\nclass {} {{\n  external factory {}(JSObject? opt_options);\n}}\n\n",
        qualified, name, name
    )
}

fn is_emitted(ctx: &EmitContext<'_>, qualified: &QualifiedName, signature: &str) -> bool {
    ctx.emitted
        .get(qualified)
        .is_some_and(|signatures| signatures.contains(signature))
}

fn record(ctx: &mut EmitContext<'_>, qualified: &QualifiedName, signature: String) {
    ctx.emitted
        .entry(qualified.clone())
        .or_default()
        .insert(signature);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{DeclItem, Keyword, TypeNode};
    use crate::emit::MemberSignatures;
    use crate::symbols::{NamespacePath, SymbolTable};
    use crate::test::{
        mock_class_with, mock_method, mock_optional_param, mock_param, mock_property,
    };
    use crate::types::{ImportSet, Scope};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn class(item: DeclItem) -> ClassDecl {
        match item {
            DeclItem::Class(class) => class,
            other => panic!("expected class, got {:?}", other),
        }
    }

    fn emit(
        item: DeclItem,
        table: &SymbolTable,
        namespace: &NamespacePath,
        imports: &mut ImportSet,
        emitted: &mut MemberSignatures,
    ) -> String {
        let scope = Scope::new(table, Path::new("in/ol/map.d.ts"), namespace);
        let mut ctx = EmitContext::new(scope, imports, emitted);
        emit_class(&class(item), &mut ctx)
    }

    #[test]
    fn test_empty_class_emits_stub_only() {
        let table = SymbolTable::new();
        let mut imports = ImportSet::new();
        let mut emitted = MemberSignatures::new();

        let code = emit(
            mock_class_with("Foo", vec![]),
            &table,
            &NamespacePath::root(),
            &mut imports,
            &mut emitted,
        );
        assert_eq!(
            code,
            "@JS('Foo')\n@staticInterop\nclass Foo {\n  external factory Foo(JSObject? opt_options);\n}\n\n"
        );
        assert!(emitted.contains_key(&QualifiedName::new(&NamespacePath::root(), "Foo")));
    }

    #[test]
    fn test_class_members() {
        let mut table = SymbolTable::new();
        let ol = NamespacePath::root().child("ol");
        table.insert(QualifiedName::new(&ol, "View"), "in/ol/view.d.ts");
        let mut imports = ImportSet::new();
        let mut emitted = MemberSignatures::new();

        let item = mock_class_with(
            "Map",
            vec![
                mock_method("getView", vec![], Some(TypeNode::reference("View"))),
                mock_method(
                    "setTarget",
                    vec![
                        mock_param("target", Some(TypeNode::keyword(Keyword::String))),
                        mock_optional_param("force", Some(TypeNode::keyword(Keyword::Boolean))),
                    ],
                    Some(TypeNode::keyword(Keyword::Void)),
                ),
                mock_property("zoom", Some(TypeNode::keyword(Keyword::Number)), false),
                mock_property("layers", Some(TypeNode::array(TypeNode::reference("View"))), true),
            ],
        );
        let code = emit(item, &table, &ol, &mut imports, &mut emitted);

        assert_eq!(
            code,
            "@JS('ol.Map')\n\
             @staticInterop\n\
             class Map {\n  external factory Map(JSObject? opt_options);\n}\n\n\
             extension MapExtension on Map {\n\
             \x20 external View getView();\n\
             \x20 external void setTarget(JSString target, JSBoolean? force);\n\
             \x20 external JSNumber get zoom;\n\
             \x20 external set zoom(JSNumber value);\n\
             \x20 external JSArray<View> get layers;\n\
             }\n\n"
        );
        assert_eq!(imports.into_iter().collect::<Vec<_>>(), vec!["./ol/view.dart"]);
    }

    #[test]
    fn test_merged_class_emits_each_member_once() {
        let table = SymbolTable::new();
        let root = NamespacePath::root();
        let mut imports = ImportSet::new();
        let mut emitted = MemberSignatures::new();

        let first = mock_class_with(
            "Foo",
            vec![mock_method("a", vec![], None), mock_property("p", None, true)],
        );
        let second = mock_class_with(
            "Foo",
            vec![
                mock_method("a", vec![], None),
                mock_method("b", vec![mock_param("x", None)], None),
                mock_property("p", None, true),
            ],
        );

        let code1 = emit(first, &table, &root, &mut imports, &mut emitted);
        let code2 = emit(second.clone(), &table, &root, &mut imports, &mut emitted);
        let code3 = emit(second, &table, &root, &mut imports, &mut emitted);

        assert!(code1.contains("class Foo {"));
        assert!(code1.contains("external JSObject a();"));
        assert_eq!(
            code2,
            "extension FooExtension on Foo {\n  external JSObject b(JSObject x);\n}\n\n"
        );
        assert_eq!(code3, "");

        let combined = format!("{}{}", code1, code2);
        assert_eq!(combined.matches("class Foo {").count(), 1);
        assert_eq!(combined.matches(" a(").count(), 1);
        assert_eq!(combined.matches("get p;").count(), 1);

        let signatures = &emitted[&QualifiedName::new(&root, "Foo")];
        assert_eq!(
            signatures.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["a()", "get p", "b(x)"]
        );
    }

    #[test]
    fn test_overloads_with_same_parameter_names_collapse() {
        let table = SymbolTable::new();
        let mut imports = ImportSet::new();
        let mut emitted = MemberSignatures::new();

        let item = mock_class_with(
            "Source",
            vec![
                mock_method("on", vec![mock_param("type", Some(TypeNode::keyword(Keyword::String)))], None),
                mock_method("on", vec![mock_param("type", None)], None),
            ],
        );
        let code = emit(item, &table, &NamespacePath::root(), &mut imports, &mut emitted);
        assert_eq!(code.matches("external JSObject on(").count(), 1);
        assert!(code.contains("on(JSString type)"));
    }
}
