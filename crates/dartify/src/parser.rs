//! Declaration reader
//!
//! Parses a `.d.ts` file with deno_ast/SWC and lowers the module AST into
//! the declaration tree from [`crate::decl`]. Export and `declare` wrappers
//! are looked through; constructs without a binding (enums, variables,
//! imports, re-exports) are dropped here so that later stages only ever see
//! what they can emit.

use crate::decl::{
    ClassDecl, ClassMember, DeclFile, DeclItem, FunctionDecl, InterfaceDecl, Keyword,
    MethodDecl, NamespaceDecl, ParamDecl, PropertyDecl, TypeAliasDecl, TypeMember, TypeNode,
};
use crate::diagnostics::DartifyResult;
use crate::utils::swc::{
    entity_name_to_string, parse_typescript_file, parse_typescript_source, prop_name_to_string,
    wtf8_to_string, ParsedModule,
};
use deno_ast::swc::ast as swc_ast;
use std::path::Path;

/// Parse a declaration file from disk
pub fn parse_declaration_file(path: impl AsRef<Path>) -> DartifyResult<DeclFile> {
    let parsed = parse_typescript_file(path)?;
    lower_module(&parsed)
}

/// Parse declaration source text that belongs to `path`
pub fn parse_declaration_source(path: impl AsRef<Path>, source: &str) -> DartifyResult<DeclFile> {
    let parsed = parse_typescript_source(path, source)?;
    lower_module(&parsed)
}

/// Lower a parsed module into a declaration file
fn lower_module(parsed: &ParsedModule) -> DartifyResult<DeclFile> {
    let module = parsed.module()?;
    let items = lower_items(&module.body);
    Ok(DeclFile::new(parsed.path(), items))
}

fn lower_items(items: &[swc_ast::ModuleItem]) -> Vec<DeclItem> {
    items.iter().filter_map(lower_module_item).collect()
}

fn lower_module_item(item: &swc_ast::ModuleItem) -> Option<DeclItem> {
    match item {
        swc_ast::ModuleItem::ModuleDecl(decl) => match decl {
            swc_ast::ModuleDecl::ExportDecl(export) => lower_decl(&export.decl),
            swc_ast::ModuleDecl::ExportDefaultDecl(export) => lower_default_decl(&export.decl),
            // Import declarations, re-exports, export assignments
            _ => None,
        },
        swc_ast::ModuleItem::Stmt(swc_ast::Stmt::Decl(decl)) => lower_decl(decl),
        swc_ast::ModuleItem::Stmt(_) => None,
    }
}

fn lower_decl(decl: &swc_ast::Decl) -> Option<DeclItem> {
    match decl {
        swc_ast::Decl::Class(class_decl) => Some(DeclItem::Class(lower_class(
            class_decl.ident.sym.to_string(),
            &class_decl.class,
        ))),
        swc_ast::Decl::Fn(fn_decl) => Some(DeclItem::Function(lower_function(
            fn_decl.ident.sym.to_string(),
            &fn_decl.function,
        ))),
        swc_ast::Decl::TsInterface(iface) => Some(DeclItem::Interface(InterfaceDecl {
            name: iface.id.sym.to_string(),
        })),
        swc_ast::Decl::TsTypeAlias(alias) => Some(DeclItem::TypeAlias(TypeAliasDecl {
            name: alias.id.sym.to_string(),
            ts_type: lower_type(&alias.type_ann),
        })),
        swc_ast::Decl::TsModule(module) => lower_namespace(module).map(DeclItem::Namespace),
        swc_ast::Decl::Var(_) | swc_ast::Decl::TsEnum(_) | swc_ast::Decl::Using(_) => None,
    }
}

fn lower_default_decl(decl: &swc_ast::DefaultDecl) -> Option<DeclItem> {
    match decl {
        swc_ast::DefaultDecl::Class(class_expr) => {
            let name = class_expr
                .ident
                .as_ref()
                .map(|i| i.sym.to_string())
                .unwrap_or_else(|| "Anonymous".to_string());
            Some(DeclItem::Class(lower_class(name, &class_expr.class)))
        }
        swc_ast::DefaultDecl::Fn(fn_expr) => {
            let name = fn_expr
                .ident
                .as_ref()
                .map(|i| i.sym.to_string())
                .unwrap_or_else(|| "anonymous".to_string());
            Some(DeclItem::Function(lower_function(name, &fn_expr.function)))
        }
        swc_ast::DefaultDecl::TsInterfaceDecl(iface) => Some(DeclItem::Interface(InterfaceDecl {
            name: iface.id.sym.to_string(),
        })),
    }
}

/// Lower `namespace x {}` / `module "x" {}`.
///
/// A dotted `namespace a.b {}` comes out of SWC as nested namespace bodies
/// and is lowered into nested namespaces. `declare global` and bodiless
/// module declarations produce nothing.
fn lower_namespace(module: &swc_ast::TsModuleDecl) -> Option<NamespaceDecl> {
    if module.global {
        return None;
    }
    let name = match &module.id {
        swc_ast::TsModuleName::Ident(i) => i.sym.to_string(),
        swc_ast::TsModuleName::Str(s) => wtf8_to_string(s),
    };
    let body = lower_namespace_body(module.body.as_ref()?);
    Some(NamespaceDecl { name, body })
}

fn lower_namespace_body(body: &swc_ast::TsNamespaceBody) -> Vec<DeclItem> {
    match body {
        swc_ast::TsNamespaceBody::TsModuleBlock(block) => lower_items(&block.body),
        swc_ast::TsNamespaceBody::TsNamespaceDecl(inner) => {
            vec![DeclItem::Namespace(NamespaceDecl {
                name: inner.id.sym.to_string(),
                body: lower_namespace_body(&inner.body),
            })]
        }
    }
}

fn lower_class(name: String, class: &swc_ast::Class) -> ClassDecl {
    let mut members = Vec::new();

    for member in &class.body {
        match member {
            swc_ast::ClassMember::Method(method)
                if matches!(method.kind, swc_ast::MethodKind::Method) =>
            {
                members.push(ClassMember::Method(MethodDecl {
                    name: prop_name_to_string(&method.key),
                    params: lower_params(&method.function.params),
                    return_type: lower_type_ann(method.function.return_type.as_deref()),
                }));
            }
            swc_ast::ClassMember::ClassProp(prop) => {
                members.push(ClassMember::Property(PropertyDecl {
                    name: prop_name_to_string(&prop.key),
                    ts_type: lower_type_ann(prop.type_ann.as_deref()),
                    readonly: prop.readonly,
                }));
            }
            // Accessors, constructors, index signatures, #private members
            _ => {}
        }
    }

    ClassDecl { name, members }
}

fn lower_function(name: String, function: &swc_ast::Function) -> FunctionDecl {
    FunctionDecl {
        name,
        params: lower_params(&function.params),
        return_type: lower_type_ann(function.return_type.as_deref()),
    }
}

fn lower_params(params: &[swc_ast::Param]) -> Vec<ParamDecl> {
    params.iter().map(|p| lower_param(&p.pat)).collect()
}

fn lower_param(pat: &swc_ast::Pat) -> ParamDecl {
    match pat {
        swc_ast::Pat::Ident(i) => ParamDecl {
            name: i.sym.to_string(),
            ts_type: lower_type_ann(i.type_ann.as_deref()),
            optional: i.optional,
        },
        swc_ast::Pat::Rest(r) => {
            let mut param = lower_param(&r.arg);
            // `...args: T[]` carries the annotation on the rest pattern
            if let Some(ann) = r.type_ann.as_deref() {
                param.ts_type = Some(lower_type(&ann.type_ann));
            }
            param
        }
        swc_ast::Pat::Assign(a) => {
            let mut param = lower_param(&a.left);
            param.optional = true;
            param
        }
        swc_ast::Pat::Array(arr) => ParamDecl {
            name: "destructured".to_string(),
            ts_type: lower_type_ann(arr.type_ann.as_deref()),
            optional: arr.optional,
        },
        swc_ast::Pat::Object(obj) => ParamDecl {
            name: "destructured".to_string(),
            ts_type: lower_type_ann(obj.type_ann.as_deref()),
            optional: obj.optional,
        },
        swc_ast::Pat::Expr(_) | swc_ast::Pat::Invalid(_) => ParamDecl {
            name: "unknown".to_string(),
            ts_type: None,
            optional: false,
        },
    }
}

fn lower_type_ann(ann: Option<&swc_ast::TsTypeAnn>) -> Option<TypeNode> {
    ann.map(|t| lower_type(&t.type_ann))
}

/// Convert an SWC type into a [`TypeNode`]
fn lower_type(ty: &swc_ast::TsType) -> TypeNode {
    match ty {
        swc_ast::TsType::TsKeywordType(kw) => TypeNode::keyword(match kw.kind {
            swc_ast::TsKeywordTypeKind::TsStringKeyword => Keyword::String,
            swc_ast::TsKeywordTypeKind::TsNumberKeyword => Keyword::Number,
            swc_ast::TsKeywordTypeKind::TsBooleanKeyword => Keyword::Boolean,
            swc_ast::TsKeywordTypeKind::TsVoidKeyword => Keyword::Void,
            swc_ast::TsKeywordTypeKind::TsAnyKeyword => Keyword::Any,
            swc_ast::TsKeywordTypeKind::TsObjectKeyword => Keyword::Object,
            swc_ast::TsKeywordTypeKind::TsUnknownKeyword => Keyword::Unknown,
            swc_ast::TsKeywordTypeKind::TsNeverKeyword => Keyword::Never,
            swc_ast::TsKeywordTypeKind::TsUndefinedKeyword => Keyword::Undefined,
            swc_ast::TsKeywordTypeKind::TsNullKeyword => Keyword::Null,
            swc_ast::TsKeywordTypeKind::TsSymbolKeyword => Keyword::Symbol,
            swc_ast::TsKeywordTypeKind::TsBigIntKeyword => Keyword::BigInt,
            swc_ast::TsKeywordTypeKind::TsIntrinsicKeyword => Keyword::Intrinsic,
        }),
        swc_ast::TsType::TsTypeRef(type_ref) => {
            TypeNode::reference(entity_name_to_string(&type_ref.type_name))
        }
        swc_ast::TsType::TsArrayType(arr) => TypeNode::array(lower_type(&arr.elem_type)),
        swc_ast::TsType::TsTypeLit(lit) => {
            TypeNode::literal(lit.members.iter().map(lower_type_member).collect())
        }
        swc_ast::TsType::TsParenthesizedType(paren) => lower_type(&paren.type_ann),
        _ => TypeNode::Other,
    }
}

fn lower_type_member(member: &swc_ast::TsTypeElement) -> TypeMember {
    match member {
        swc_ast::TsTypeElement::TsIndexSignature(_) => TypeMember::IndexSignature,
        swc_ast::TsTypeElement::TsPropertySignature(prop) => match prop.key.as_ref() {
            swc_ast::Expr::Ident(i) => TypeMember::Property {
                name: i.sym.to_string(),
            },
            _ => TypeMember::Other,
        },
        swc_ast::TsTypeElement::TsMethodSignature(method) => match method.key.as_ref() {
            swc_ast::Expr::Ident(i) => TypeMember::Method {
                name: i.sym.to_string(),
            },
            _ => TypeMember::Other,
        },
        _ => TypeMember::Other,
    }
}
