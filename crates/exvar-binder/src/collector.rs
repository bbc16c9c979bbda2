//! Declaration collection.
//!
//! The collector enumerates declarations in source order and does not
//! decide where they are scoped. Expression variables come out as
//! [`DeclarationSite`]s; every other named declaration as an
//! [`OrdinaryDeclaration`].

use crate::scope_tree::SymbolKind;
use crate::types::TypeRef;
use exvar_syntax::{NodeArena, NodeData, NodeIndex, SyntaxKind, TypeSyntax};
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SiteKind {
    /// `out var x` / `out T x` argument.
    OutArgument,
    /// `T x` designation in an `is` pattern or `case` label.
    Pattern,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DeclaredType {
    Explicit(TypeRef),
    /// `var`: determined from context.
    Inferred,
}

impl From<&TypeSyntax> for DeclaredType {
    fn from(ty: &TypeSyntax) -> Self {
        match ty {
            TypeSyntax::Var => DeclaredType::Inferred,
            TypeSyntax::Named(name) => DeclaredType::Explicit(TypeRef::new(name.as_str())),
        }
    }
}

/// An expression-variable declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeclarationSite {
    /// The `DeclarationExpression` or `DeclarationPattern` node.
    pub node: NodeIndex,
    pub name_node: NodeIndex,
    pub name: String,
    pub declared_type: DeclaredType,
    pub kind: SiteKind,
    /// Offset of the declared name.
    pub position: u32,
    /// Argument-list owner for `out` arguments; `is` expression or `case`
    /// label for patterns.
    pub containing_expression: NodeIndex,
}

/// A named declaration that is not an expression variable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrdinaryDeclaration {
    /// Declarator, parameter, clause or statement that declares the name.
    pub node: NodeIndex,
    pub name_node: NodeIndex,
    pub name: String,
    pub kind: SymbolKind,
    pub declared_type: DeclaredType,
    /// Whether the declaration assigns a value at its own position.
    pub has_initializer: bool,
    pub position: u32,
}

pub struct DeclarationCollector<'a> {
    arena: &'a NodeArena,
}

impl<'a> DeclarationCollector<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        DeclarationCollector { arena }
    }

    /// Expression-variable declarations under `root`, in source order.
    pub fn sites(&self, root: NodeIndex) -> Vec<DeclarationSite> {
        let sites: Vec<DeclarationSite> = self
            .arena
            .descendants(root)
            .into_iter()
            .filter_map(|node| self.site_at(node))
            .collect();
        debug!(count = sites.len(), "collected declaration sites");
        sites
    }

    /// The declaration site rooted at `node`, if any.
    pub fn site_at(&self, node: NodeIndex) -> Option<DeclarationSite> {
        let arena = self.arena;
        let (name_node, declared_type, kind, containing_expression) =
            match &arena.get(node)?.data {
                NodeData::DeclarationExpression(decl) => {
                    let argument = arena.parent(node);
                    (
                        decl.name,
                        DeclaredType::from(&decl.ty),
                        SiteKind::OutArgument,
                        arena.parent(argument),
                    )
                }
                NodeData::DeclarationPattern(pattern) if pattern.name.is_some() => (
                    pattern.name,
                    DeclaredType::from(&pattern.ty),
                    SiteKind::Pattern,
                    arena.parent(node),
                ),
                _ => return None,
            };
        Some(DeclarationSite {
            node,
            name_node,
            name: arena.name_text(name_node)?.to_string(),
            declared_type,
            kind,
            position: arena.span(name_node).pos,
            containing_expression,
        })
    }

    /// Ordinary declarations under `root`, in source order.
    pub fn ordinary_declarations(&self, root: NodeIndex) -> Vec<OrdinaryDeclaration> {
        let mut out = Vec::new();
        for node in self.arena.descendants(root) {
            self.push_ordinary(node, &mut out);
        }
        debug!(count = out.len(), "collected ordinary declarations");
        out
    }

    fn push_ordinary(&self, node: NodeIndex, out: &mut Vec<OrdinaryDeclaration>) {
        let arena = self.arena;
        let Some(data) = arena.get(node).map(|n| &n.data) else {
            return;
        };
        let mut push = |name_node: NodeIndex, kind: SymbolKind, ty: DeclaredType, init: bool| {
            if let Some(name) = arena.name_text(name_node) {
                out.push(OrdinaryDeclaration {
                    node,
                    name_node,
                    name: name.to_string(),
                    kind,
                    declared_type: ty,
                    has_initializer: init,
                    position: arena.span(name_node).pos,
                });
            }
        };

        match data {
            NodeData::VariableDeclarator(decl) => {
                let owner = arena.parent(node);
                let has_init = decl.initializer.is_some();
                match &arena.get(owner).map(|n| &n.data) {
                    Some(NodeData::LocalDeclaration(local)) => {
                        let kind = if local.is_const {
                            SymbolKind::Constant
                        } else {
                            SymbolKind::Local
                        };
                        push(decl.name, kind, DeclaredType::from(&local.ty), has_init);
                    }
                    Some(NodeData::Field(field)) => {
                        let ty = DeclaredType::from(&field.ty);
                        push(decl.name, SymbolKind::Member, ty, has_init);
                    }
                    Some(NodeData::Loop(stmt)) => {
                        push(decl.name, SymbolKind::Local, DeclaredType::from(&stmt.ty), has_init);
                    }
                    Some(NodeData::Resource(stmt)) => {
                        push(decl.name, SymbolKind::Local, DeclaredType::from(&stmt.ty), has_init);
                    }
                    _ => push(decl.name, SymbolKind::Local, DeclaredType::Inferred, has_init),
                }
            }
            NodeData::Property(prop) => {
                push(prop.name, SymbolKind::Member, DeclaredType::from(&prop.ty), true);
            }
            NodeData::Parameter(param) => {
                push(param.name, SymbolKind::Parameter, DeclaredType::from(&param.ty), true);
            }
            NodeData::Catch(clause) => {
                let ty = clause
                    .ty
                    .as_deref()
                    .map_or(DeclaredType::Inferred, |t| DeclaredType::Explicit(TypeRef::new(t)));
                push(clause.name, SymbolKind::CatchVariable, ty, true);
            }
            NodeData::ForEach(stmt) => {
                push(stmt.name, SymbolKind::IterationVariable, DeclaredType::from(&stmt.ty), true);
            }
            NodeData::RangeClause(clause) => {
                let ty = clause
                    .ty
                    .as_deref()
                    .map_or(DeclaredType::Inferred, |t| DeclaredType::Explicit(TypeRef::new(t)));
                push(clause.name, SymbolKind::RangeVariable, ty, true);
            }
            NodeData::Join(join) => {
                push(join.name, SymbolKind::RangeVariable, DeclaredType::Inferred, true);
                push(join.into_name, SymbolKind::RangeVariable, DeclaredType::Inferred, true);
            }
            NodeData::Query(query) if arena.kind(node) == Some(SyntaxKind::QueryContinuation) => {
                push(query.name, SymbolKind::RangeVariable, DeclaredType::Inferred, true);
            }
            NodeData::Function(func)
                if arena.kind(node) == Some(SyntaxKind::LocalFunctionStatement) =>
            {
                push(func.name_node, SymbolKind::LocalFunction, DeclaredType::Inferred, true);
            }
            _ => {}
        }
    }
}
