//! Declaration tree
//!
//! The lowered form of a `.d.ts` file that the rest of the pipeline works
//! on. Only the constructs the binding generator understands are kept:
//! classes, interfaces (by name only), functions, type aliases and
//! namespaces. Everything else is dropped by the reader.

use std::path::{Path, PathBuf};

/// A parsed declaration file
#[derive(Debug, Clone, PartialEq)]
pub struct DeclFile {
    /// Path of the file as it was discovered
    pub path: PathBuf,
    /// Top-level declarations in document order
    pub items: Vec<DeclItem>,
}

impl DeclFile {
    /// Create a declaration file
    pub fn new(path: impl Into<PathBuf>, items: Vec<DeclItem>) -> Self {
        Self {
            path: path.into(),
            items,
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A single declaration
#[derive(Debug, Clone, PartialEq)]
pub enum DeclItem {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Function(FunctionDecl),
    TypeAlias(TypeAliasDecl),
    Namespace(NamespaceDecl),
}

impl DeclItem {
    /// The declared name
    pub fn name(&self) -> &str {
        match self {
            DeclItem::Class(c) => &c.name,
            DeclItem::Interface(i) => &i.name,
            DeclItem::Function(f) => &f.name,
            DeclItem::TypeAlias(t) => &t.name,
            DeclItem::Namespace(n) => &n.name,
        }
    }
}

/// Class declaration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub members: Vec<ClassMember>,
}

/// Class body member
#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Method(MethodDecl),
    Property(PropertyDecl),
}

/// Method in a class body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<ParamDecl>,
    pub return_type: Option<TypeNode>,
}

/// Property in a class body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDecl {
    pub name: String,
    pub ts_type: Option<TypeNode>,
    pub readonly: bool,
}

/// Function or method parameter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub ts_type: Option<TypeNode>,
    pub optional: bool,
}

/// Interface declaration. Interfaces resolve as types but emit nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
}

/// Top-level function declaration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<ParamDecl>,
    pub return_type: Option<TypeNode>,
}

/// Type alias declaration
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    pub name: String,
    pub ts_type: TypeNode,
}

/// Namespace or module block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceDecl {
    pub name: String,
    pub body: Vec<DeclItem>,
}

/// A type annotation
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    /// Keyword type such as `string` or `any`
    Keyword { keyword: Keyword },
    /// Named reference; `name` keeps qualified references dotted (`ns.Foo`)
    Reference { name: String },
    /// `T[]`
    Array { element: Box<TypeNode> },
    /// `{ ... }` object type literal
    Literal { members: Vec<TypeMember> },
    /// Any construct without a binding
    Other,
}

impl TypeNode {
    pub fn keyword(keyword: Keyword) -> Self {
        TypeNode::Keyword { keyword }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference { name: name.into() }
    }

    pub fn array(element: TypeNode) -> Self {
        TypeNode::Array {
            element: Box::new(element),
        }
    }

    pub fn literal(members: Vec<TypeMember>) -> Self {
        TypeNode::Literal { members }
    }
}

/// Keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    String,
    Number,
    Boolean,
    Void,
    Any,
    Object,
    Unknown,
    Never,
    Undefined,
    Null,
    Symbol,
    BigInt,
    Intrinsic,
}

/// Member of an object type literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMember {
    IndexSignature,
    Property { name: String },
    Method { name: String },
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_name() {
        let item = DeclItem::Namespace(NamespaceDecl {
            name: "ol".to_string(),
            body: vec![DeclItem::Interface(InterfaceDecl {
                name: "Options".to_string(),
            })],
        });
        assert_eq!(item.name(), "ol");
    }

    #[test]
    fn test_type_node_constructors() {
        let node = TypeNode::array(TypeNode::keyword(Keyword::Number));
        assert_eq!(
            node,
            TypeNode::Array {
                element: Box::new(TypeNode::Keyword {
                    keyword: Keyword::Number
                })
            }
        );
    }
}
