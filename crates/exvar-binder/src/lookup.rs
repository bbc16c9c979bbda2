//! Semantic model and lookup.
//!
//! A [`SemanticModel`] is the query side of a bound unit. It only reads the
//! frozen scope tree, so any number of threads may query it at once.

use crate::collector::DeclarationSite;
use crate::diagnostics::BindDiagnostic;
use crate::options::BinderOptions;
use crate::scope_tree::{LocalSymbol, ScopeId, ScopeNode, ScopeTree, SymbolId, SymbolKind};
use exvar_common::Span;
use exvar_syntax::{NodeArena, NodeIndex, SyntaxKind};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{Level, span, trace};

/// Outcome of resolving a name at a reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Resolution {
    Resolved(SymbolId),
    /// The nearest declaration of the name follows the reference in a
    /// linear scope.
    UsedBeforeDeclared(SymbolId),
    NotInScope,
}

impl Resolution {
    pub fn symbol(self) -> Option<SymbolId> {
        match self {
            Resolution::Resolved(id) => Some(id),
            _ => None,
        }
    }
}

pub struct SemanticModel<'a> {
    arena: &'a NodeArena,
    options: BinderOptions,
    pub(crate) tree: ScopeTree,
    sites: Vec<DeclarationSite>,
    site_symbols: Vec<SymbolId>,
    declared: FxHashMap<NodeIndex, SymbolId>,
    pub(crate) resolutions: FxHashMap<NodeIndex, Resolution>,
    diagnostics: Vec<BindDiagnostic>,
}

impl<'a> SemanticModel<'a> {
    pub(crate) fn new(
        arena: &'a NodeArena,
        options: BinderOptions,
        tree: ScopeTree,
        sites: Vec<DeclarationSite>,
        site_symbols: Vec<SymbolId>,
        declared: FxHashMap<NodeIndex, SymbolId>,
        resolutions: FxHashMap<NodeIndex, Resolution>,
        diagnostics: Vec<BindDiagnostic>,
    ) -> Self {
        SemanticModel {
            arena,
            options,
            tree,
            sites,
            site_symbols,
            declared,
            resolutions,
            diagnostics,
        }
    }

    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    pub fn options(&self) -> &BinderOptions {
        &self.options
    }

    pub fn scope_tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub fn diagnostics(&self) -> &[BindDiagnostic] {
        &self.diagnostics
    }

    /// Every expression-variable declaration, in source order.
    pub fn declaration_sites(&self) -> &[DeclarationSite] {
        &self.sites
    }

    /// Symbol bound to each entry of [`SemanticModel::declaration_sites`].
    pub fn site_symbols(&self) -> &[SymbolId] {
        &self.site_symbols
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&LocalSymbol> {
        self.tree.symbol(id)
    }

    pub fn scope(&self, id: ScopeId) -> Option<&ScopeNode> {
        self.tree.scope(id)
    }

    pub fn scope_of_symbol(&self, id: SymbolId) -> Option<&ScopeNode> {
        self.symbol(id).and_then(|symbol| self.tree.scope(symbol.scope))
    }

    /// Symbol declared by `node`: a declaration site, its argument, its name,
    /// or an ordinary declarator, parameter or clause.
    pub fn get_declared_symbol(&self, node: NodeIndex) -> Option<SymbolId> {
        self.declared.get(&node).copied()
    }

    /// Resolution of an identifier reference.
    pub fn resolve_identifier(&self, node: NodeIndex) -> Resolution {
        if let Some(&resolution) = self.resolutions.get(&node) {
            return resolution;
        }
        if self.arena.kind(node) != Some(SyntaxKind::IdentifierName) {
            return Resolution::NotInScope;
        }
        let Some(name) = self.arena.name_text(node) else {
            return Resolution::NotInScope;
        };
        resolve_name(&self.tree, self.arena, node, name, self.arena.span(node).pos)
    }

    /// Symbol that `name` binds to at `position`, if it is in scope there.
    pub fn lookup_symbol_at(&self, position: u32, name: &str) -> Option<SymbolId> {
        let node = self.arena.node_at(position);
        if node.is_none() {
            return None;
        }
        resolve_name(&self.tree, self.arena, node, name, position).symbol()
    }

    /// Names that bind to a symbol at `position`, sorted.
    pub fn lookup_names_at(&self, position: u32) -> Vec<String> {
        let node = self.arena.node_at(position);
        let Some(start) = start_scope(&self.tree, self.arena, node) else {
            return Vec::new();
        };

        let mut names = BTreeSet::new();
        for (_, scope) in self.tree.chain(start) {
            for name in scope.locals.keys() {
                if names.contains(name) {
                    continue;
                }
                let resolution = resolve_name(&self.tree, self.arena, node, name, position);
                if matches!(resolution, Resolution::Resolved(_)) {
                    names.insert(name.clone());
                }
            }
        }
        names.into_iter().collect()
    }

    /// Resolved identifier references, ordered by node.
    pub fn bound_references(&self) -> Vec<(NodeIndex, Resolution)> {
        let mut refs: Vec<(NodeIndex, Resolution)> =
            self.resolutions.iter().map(|(&node, &res)| (node, res)).collect();
        refs.sort_unstable_by_key(|(node, _)| *node);
        refs
    }

    /// Serializable view of the whole binding result.
    pub fn snapshot(&self) -> ModelSnapshot {
        let scopes = self
            .tree
            .scopes()
            .iter()
            .enumerate()
            .map(|(i, scope)| ScopeSnapshot {
                id: ScopeId(i as u32),
                kind: scope.kind.to_string(),
                anchor: scope.anchor,
                span: scope.span,
                parent: scope.parent,
                locals: scope
                    .locals
                    .iter()
                    .map(|(name, &id)| (name.clone(), id))
                    .collect(),
                duplicates: scope.duplicates.to_vec(),
            })
            .collect();
        ModelSnapshot {
            scopes,
            symbols: self.tree.symbols().to_vec(),
            diagnostics: self.diagnostics.clone(),
            references: self.bound_references(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScopeSnapshot {
    pub id: ScopeId,
    pub kind: String,
    pub anchor: NodeIndex,
    pub span: Span,
    pub parent: ScopeId,
    pub locals: Vec<(String, SymbolId)>,
    pub duplicates: Vec<SymbolId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelSnapshot {
    pub scopes: Vec<ScopeSnapshot>,
    pub symbols: Vec<LocalSymbol>,
    pub diagnostics: Vec<BindDiagnostic>,
    pub references: Vec<(NodeIndex, Resolution)>,
}

/// Innermost existing scope for lookups at `node`, including a scope
/// anchored at `node` itself.
pub(crate) fn start_scope(tree: &ScopeTree, arena: &NodeArena, node: NodeIndex) -> Option<ScopeId> {
    if node.is_none() {
        return None;
    }
    tree.scope_at_anchor(node)
        .or_else(|| tree.enclosing_scope(arena, node))
}

/// Query scope and join clause when `node` lies in a join's inner key.
///
/// Only the join's own variable is visible there; range variables of
/// earlier clauses are hidden.
fn enclosing_inner_key(arena: &NodeArena, node: NodeIndex) -> Option<(NodeIndex, NodeIndex)> {
    let mut child = node;
    let mut current = arena.parent(node);
    while current.is_some() {
        match arena.kind(current) {
            Some(SyntaxKind::JoinClause) => {
                let join = arena.get_join(current)?;
                if join.right_key == child {
                    return Some((arena.parent(current), current));
                }
                return None;
            }
            Some(SyntaxKind::QueryExpression | SyntaxKind::QueryContinuation) => return None,
            _ => {}
        }
        child = current;
        current = arena.parent(current);
    }
    None
}

/// Resolve `name` as seen from `node` at `offset`.
///
/// Walks the scope chain outward. Range variables outside their window are
/// skipped. Any other symbol declared after `offset` stops the walk with
/// `UsedBeforeDeclared`.
pub(crate) fn resolve_name(
    tree: &ScopeTree,
    arena: &NodeArena,
    node: NodeIndex,
    name: &str,
    offset: u32,
) -> Resolution {
    let _span = span!(Level::TRACE, "resolve_name", node = node.0, name).entered();
    let Some(start) = start_scope(tree, arena, node) else {
        return Resolution::NotInScope;
    };
    let inner_key = enclosing_inner_key(arena, node);

    for (scope_id, scope) in tree.chain(start) {
        let Some(symbol_id) = scope.get(name) else {
            continue;
        };
        let Some(symbol) = tree.symbol(symbol_id) else {
            continue;
        };

        if symbol.kind == SymbolKind::RangeVariable {
            if !symbol.is_visible_at(offset) {
                continue;
            }
            if let Some((query, join)) = inner_key {
                if scope.anchor == query && symbol.declaration != join {
                    continue;
                }
            }
        } else if offset < symbol.visible_from {
            trace!(scope = scope_id.0, symbol = symbol_id.0, "declared after reference");
            return Resolution::UsedBeforeDeclared(symbol_id);
        }

        trace!(scope = scope_id.0, symbol = symbol_id.0, "resolved");
        return Resolution::Resolved(symbol_id);
    }
    Resolution::NotInScope
}
