//! Scope tree and symbol table.
//!
//! Scopes and symbols live in arenas addressed by [`ScopeId`] and
//! [`SymbolId`]. Each scope records its parent index; there are no owning
//! back-references. Construction goes through [`ScopeTreeBuilder`], the only
//! type with `declare`. [`ScopeTreeBuilder::finish`] freezes it into a
//! [`ScopeTree`] that only answers queries.

use crate::classifier::{Anchor, ScopeKind, classify};
use crate::types::TypeRef;
use exvar_common::Span;
use exvar_common::limits::{MAX_SCOPE_WALK_ITERATIONS, SYMBOL_ARENA_INITIAL_CAPACITY};
use exvar_syntax::{NodeArena, NodeIndex};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    /// `out var x` / `out T x`.
    ExpressionVariable,
    /// `T x` designation in a pattern.
    PatternVariable,
    Local,
    Constant,
    Parameter,
    CatchVariable,
    IterationVariable,
    RangeVariable,
    LocalFunction,
    /// Field or property.
    Member,
}

impl SymbolKind {
    /// Symbols visible throughout their scope regardless of position.
    pub const fn is_order_independent(self) -> bool {
        matches!(
            self,
            SymbolKind::Parameter | SymbolKind::LocalFunction | SymbolKind::Member
        )
    }

    /// Symbols subject to the enclosing-scope conflict check.
    pub const fn is_local_like(self) -> bool {
        !matches!(self, SymbolKind::Member)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SymbolType {
    Known(TypeRef),
    /// Left to the type checker.
    Deferred,
    /// Inference failed; reported as `TypeInferenceFailed`.
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SymbolState {
    Active,
    /// A second declaration of a name in the same scope; bound but never
    /// found by lookup.
    DuplicateInScope,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocalSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: SymbolType,
    /// Declaring node (site node for expression variables).
    pub declaration: NodeIndex,
    pub name_node: NodeIndex,
    pub name_span: Span,
    pub scope: ScopeId,
    /// First offset at which a reference binds to the symbol.
    pub visible_from: u32,
    /// End of visibility; only range variables narrow it.
    pub visible_until: u32,
    pub state: SymbolState,
}

impl LocalSymbol {
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        ty: SymbolType,
        declaration: NodeIndex,
        name_node: NodeIndex,
        name_span: Span,
    ) -> Self {
        LocalSymbol {
            name: name.into(),
            kind,
            ty,
            declaration,
            name_node,
            name_span,
            scope: ScopeId::NONE,
            visible_from: if kind.is_order_independent() {
                0
            } else {
                name_span.pos
            },
            visible_until: u32::MAX,
            state: SymbolState::Active,
        }
    }

    pub fn with_visibility(mut self, from: u32, until: u32) -> Self {
        self.visible_from = from;
        self.visible_until = until;
        self
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == SymbolState::Active
    }

    #[inline]
    pub fn is_visible_at(&self, offset: u32) -> bool {
        offset >= self.visible_from && offset < self.visible_until
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScopeNode {
    pub kind: ScopeKind,
    pub anchor: NodeIndex,
    pub span: Span,
    pub parent: ScopeId,
    pub children: SmallVec<[ScopeId; 4]>,
    /// Active symbols in declaration order.
    pub locals: IndexMap<String, SymbolId, FxBuildHasher>,
    /// Inactive duplicates, in declaration order.
    pub duplicates: SmallVec<[SymbolId; 2]>,
}

impl ScopeNode {
    fn new(anchor: Anchor, span: Span, parent: ScopeId) -> Self {
        ScopeNode {
            kind: anchor.kind,
            anchor: anchor.node,
            span,
            parent,
            children: SmallVec::new(),
            locals: IndexMap::default(),
            duplicates: SmallVec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.locals.get(name).copied()
    }
}

/// Result of [`ScopeTreeBuilder::declare`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Declared {
    pub symbol: SymbolId,
    /// Active symbol of the same name already in the scope.
    pub existing: Option<SymbolId>,
}

/// Mutable phase of the scope tree.
#[derive(Debug, Default)]
pub struct ScopeTreeBuilder {
    scopes: Vec<ScopeNode>,
    symbols: Vec<LocalSymbol>,
    anchor_scopes: FxHashMap<NodeIndex, ScopeId>,
}

impl ScopeTreeBuilder {
    pub fn new() -> Self {
        ScopeTreeBuilder {
            scopes: Vec::new(),
            symbols: Vec::with_capacity(SYMBOL_ARENA_INITIAL_CAPACITY),
            anchor_scopes: FxHashMap::default(),
        }
    }

    /// Scope anchored at `anchor`, creating it and any missing ancestors.
    pub fn ensure_scope(&mut self, arena: &NodeArena, anchor: Anchor) -> ScopeId {
        if let Some(&existing) = self.anchor_scopes.get(&anchor.node) {
            return existing;
        }

        // Collect the missing part of the chain innermost-first, then create
        // it outermost-first so parents exist before their children.
        let mut missing: SmallVec<[Anchor; 8]> = SmallVec::new();
        missing.push(anchor);
        let mut parent = ScopeId::NONE;
        let mut current = anchor;
        while missing.len() < MAX_SCOPE_WALK_ITERATIONS {
            let Some(outer) = classify(arena, current.node) else {
                break;
            };
            if let Some(&existing) = self.anchor_scopes.get(&outer.node) {
                parent = existing;
                break;
            }
            missing.push(outer);
            current = outer;
        }

        let mut id = parent;
        for anchor in missing.into_iter().rev() {
            id = self.create_scope(arena, anchor, parent);
            parent = id;
        }
        id
    }

    /// Scope capturing `node`, created on demand.
    pub fn scope_for_node(&mut self, arena: &NodeArena, node: NodeIndex) -> Option<ScopeId> {
        classify(arena, node).map(|anchor| self.ensure_scope(arena, anchor))
    }

    fn create_scope(&mut self, arena: &NodeArena, anchor: Anchor, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes
            .push(ScopeNode::new(anchor, arena.span(anchor.node), parent));
        if let Some(parent_scope) = self.scopes.get_mut(parent.0 as usize) {
            parent_scope.children.push(id);
        }
        self.anchor_scopes.insert(anchor.node, id);
        debug!(
            scope = id.0,
            kind = ?anchor.kind,
            anchor = anchor.node.0,
            parent = parent.0,
            "created scope"
        );
        id
    }

    /// Add `symbol` to `scope`.
    ///
    /// A name already bound to an active symbol in the same scope makes the
    /// new symbol an inactive duplicate. It is still stored and returned.
    pub fn declare(&mut self, scope: ScopeId, mut symbol: LocalSymbol) -> Declared {
        let id = SymbolId(self.symbols.len() as u32);
        symbol.scope = scope;

        let Some(scope_node) = self.scopes.get_mut(scope.0 as usize) else {
            self.symbols.push(symbol);
            return Declared {
                symbol: id,
                existing: None,
            };
        };

        let existing = scope_node.get(&symbol.name);
        match existing {
            Some(_) => {
                symbol.state = SymbolState::DuplicateInScope;
                scope_node.duplicates.push(id);
            }
            None => {
                scope_node.locals.insert(symbol.name.clone(), id);
            }
        }
        self.symbols.push(symbol);
        Declared {
            symbol: id,
            existing,
        }
    }

    pub fn scope(&self, id: ScopeId) -> Option<&ScopeNode> {
        self.scopes.get(id.0 as usize)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&LocalSymbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn finish(self) -> ScopeTree {
        debug!(
            scopes = self.scopes.len(),
            symbols = self.symbols.len(),
            "scope tree finished"
        );
        ScopeTree {
            scopes: self.scopes,
            symbols: self.symbols,
            anchor_scopes: self.anchor_scopes,
        }
    }
}

/// Frozen scope tree. Read-only, so it can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct ScopeTree {
    scopes: Vec<ScopeNode>,
    symbols: Vec<LocalSymbol>,
    anchor_scopes: FxHashMap<NodeIndex, ScopeId>,
}

impl ScopeTree {
    pub fn scope(&self, id: ScopeId) -> Option<&ScopeNode> {
        if id.is_none() {
            return None;
        }
        self.scopes.get(id.0 as usize)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&LocalSymbol> {
        if id.is_none() {
            return None;
        }
        self.symbols.get(id.0 as usize)
    }

    pub fn scopes(&self) -> &[ScopeNode] {
        &self.scopes
    }

    pub fn symbols(&self) -> &[LocalSymbol] {
        &self.symbols
    }

    pub fn symbol_ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.symbols.len() as u32).map(SymbolId)
    }

    /// Scope anchored exactly at `node`.
    pub fn scope_at_anchor(&self, node: NodeIndex) -> Option<ScopeId> {
        self.anchor_scopes.get(&node).copied()
    }

    /// Innermost existing scope capturing `node` (excluding a scope anchored
    /// at `node` itself).
    pub fn enclosing_scope(&self, arena: &NodeArena, node: NodeIndex) -> Option<ScopeId> {
        let mut current = node;
        for _ in 0..MAX_SCOPE_WALK_ITERATIONS {
            let anchor = classify(arena, current)?;
            if let Some(id) = self.scope_at_anchor(anchor.node) {
                return Some(id);
            }
            current = anchor.node;
        }
        None
    }

    /// `id` and its ancestors, innermost first.
    pub fn chain(&self, id: ScopeId) -> ScopeChain<'_> {
        ScopeChain {
            tree: self,
            next: id,
            steps: 0,
        }
    }
}

/// Iterator over a scope and its ancestors.
pub struct ScopeChain<'a> {
    tree: &'a ScopeTree,
    next: ScopeId,
    steps: usize,
}

impl<'a> Iterator for ScopeChain<'a> {
    type Item = (ScopeId, &'a ScopeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if self.steps >= MAX_SCOPE_WALK_ITERATIONS {
            return None;
        }
        let id = self.next;
        let scope = self.tree.scope(id)?;
        self.next = scope.parent;
        self.steps += 1;
        Some((id, scope))
    }
}
