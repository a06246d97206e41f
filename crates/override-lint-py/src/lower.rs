//! Lowering from the tree-sitter-python concrete syntax tree into the
//! [`override_lint_core::syntax`] model.
//!
//! Only the shapes rules care about are modelled: class and function
//! definitions with their decorators and bases, and the nested bodies of
//! compound statements. Everything else becomes [`Stmt::Simple`] or
//! [`Expr::Other`].

use override_lint_core::syntax::{
    Attribute, Call, ClassDef, Compound, Expr, FunctionDef, Module, Name, Position, Stmt,
    Subscript,
};
use tree_sitter::Node;

pub(crate) struct Lowerer<'a> {
    src: &'a [u8],
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        Self { src }
    }

    fn text(&self, node: &Node<'_>) -> String {
        node.utf8_text(self.src).unwrap_or_default().to_owned()
    }

    fn position(node: &Node<'_>) -> Position {
        let start = node.start_position();
        Position::new(start.row + 1, start.column, node.start_byte())
    }

    /// Named children that are real syntax, not comments or continuations.
    fn syntax_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .collect()
    }

    pub(crate) fn module(&self, root: &Node<'_>) -> Module {
        Module {
            body: self.statements(root),
        }
    }

    fn statements(&self, parent: &Node<'_>) -> Vec<Stmt> {
        Self::syntax_children(parent)
            .iter()
            .map(|child| self.statement(child))
            .collect()
    }

    fn statement(&self, node: &Node<'_>) -> Stmt {
        match node.kind() {
            "class_definition" => Stmt::ClassDef(self.class_def(node, Vec::new())),
            "function_definition" => Stmt::FunctionDef(self.function_def(node, Vec::new())),
            "decorated_definition" => self.decorated(node),
            _ => {
                let body = self.nested_bodies(node);
                if body.is_empty() && !Self::has_block(node) {
                    Stmt::Simple(Self::position(node))
                } else {
                    Stmt::Compound(Compound {
                        kind: node.kind().to_owned(),
                        body,
                        position: Self::position(node),
                    })
                }
            }
        }
    }

    fn decorated(&self, node: &Node<'_>) -> Stmt {
        let decorators: Vec<Expr> = Self::syntax_children(node)
            .iter()
            .filter(|child| child.kind() == "decorator")
            .map(|decorator| {
                Self::syntax_children(decorator)
                    .first()
                    .map_or(Expr::Other(Self::position(decorator)), |expr| {
                        self.expr(expr)
                    })
            })
            .collect();

        match node.child_by_field_name("definition") {
            Some(def) if def.kind() == "class_definition" => {
                Stmt::ClassDef(self.class_def(&def, decorators))
            }
            Some(def) if def.kind() == "function_definition" => {
                Stmt::FunctionDef(self.function_def(&def, decorators))
            }
            _ => Stmt::Simple(Self::position(node)),
        }
    }

    fn class_def(&self, node: &Node<'_>, decorators: Vec<Expr>) -> ClassDef {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n))
            .unwrap_or_default();

        let bases = node
            .child_by_field_name("superclasses")
            .map(|args| {
                Self::syntax_children(&args)
                    .iter()
                    .filter(|arg| {
                        !matches!(
                            arg.kind(),
                            "keyword_argument" | "dictionary_splat"
                        )
                    })
                    .map(|arg| self.expr(arg))
                    .collect()
            })
            .unwrap_or_default();

        let body = node
            .child_by_field_name("body")
            .map(|block| self.statements(&block))
            .unwrap_or_default();

        ClassDef {
            name,
            bases,
            decorators,
            body,
            position: Self::position(node),
        }
    }

    fn function_def(&self, node: &Node<'_>, decorators: Vec<Expr>) -> FunctionDef {
        let name_node = node.child_by_field_name("name");
        let name = name_node.map(|n| self.text(&n)).unwrap_or_default();
        let name_position = name_node.map_or(Self::position(node), |n| Self::position(&n));
        let is_async = node.child(0).is_some_and(|first| first.kind() == "async");

        let body = node
            .child_by_field_name("body")
            .map(|block| self.statements(&block))
            .unwrap_or_default();

        FunctionDef {
            name,
            is_async,
            decorators,
            body,
            position: Self::position(node),
            name_position,
        }
    }

    /// Statements from every block nested in a compound statement's clauses,
    /// in source order.
    fn nested_bodies(&self, node: &Node<'_>) -> Vec<Stmt> {
        let mut body = Vec::new();
        for child in Self::syntax_children(node) {
            if child.kind() == "block" {
                body.extend(self.statements(&child));
            } else if child.named_child_count() > 0 {
                body.extend(self.nested_bodies(&child));
            }
        }
        body
    }

    fn has_block(node: &Node<'_>) -> bool {
        Self::syntax_children(node)
            .iter()
            .any(|child| child.kind() == "block" || Self::has_block(child))
    }

    fn expr(&self, node: &Node<'_>) -> Expr {
        let position = Self::position(node);
        match node.kind() {
            "identifier" => Expr::Name(Name {
                id: self.text(node),
                position,
            }),
            "attribute" => {
                match (
                    node.child_by_field_name("object"),
                    node.child_by_field_name("attribute"),
                ) {
                    (Some(object), Some(attr)) => Expr::Attribute(Attribute {
                        value: Box::new(self.expr(&object)),
                        attr: self.text(&attr),
                        position,
                    }),
                    _ => Expr::Other(position),
                }
            }
            "subscript" => node
                .child_by_field_name("value")
                .map_or(Expr::Other(position), |value| {
                    Expr::Subscript(Subscript {
                        value: Box::new(self.expr(&value)),
                        position,
                    })
                }),
            "call" => node
                .child_by_field_name("function")
                .map_or(Expr::Other(position), |func| {
                    Expr::Call(Call {
                        func: Box::new(self.expr(&func)),
                        position,
                    })
                }),
            "parenthesized_expression" => match Self::syntax_children(node).as_slice() {
                [inner] => self.expr(inner),
                _ => Expr::Other(position),
            },
            _ => Expr::Other(position),
        }
    }
}

/// Finds the first error or missing node, in source order.
pub(crate) fn first_error<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children
        .iter()
        .filter(|child| child.has_error())
        .find_map(|child| first_error(child))
}
