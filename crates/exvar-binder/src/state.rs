//! Binding driver.
//!
//! [`bind_unit`] runs the passes over one compilation unit:
//!
//! 1. collect declaration sites and ordinary declarations, merged in source order
//! 2. classify and declare each one (duplicates are detected here)
//! 3. freeze the scope tree
//! 4. check every local against enclosing scopes of the same member
//! 5. report declarations in constant contexts and version-gated contexts
//! 6. resolve every identifier reference
//!
//! The result is an immutable [`SemanticModel`].

use crate::classifier::ScopeKind;
use crate::collector::{
    DeclarationCollector, DeclarationSite, DeclaredType, OrdinaryDeclaration, SiteKind,
};
use crate::diagnostics::{BindDiagnostic, DiagnosticKind};
use crate::lookup::{Resolution, SemanticModel, resolve_name};
use crate::options::BinderOptions;
use crate::scope_tree::{
    LocalSymbol, ScopeId, ScopeTree, ScopeTreeBuilder, SymbolId, SymbolKind, SymbolType,
};
use crate::types::{CallSite, TypeOracle, TypeRef};
use exvar_syntax::{NodeArena, NodeData, NodeIndex, RefKind, SyntaxKind};
use rustc_hash::FxHashMap;
use tracing::{Level, debug, span};

/// Bind the unit rooted at `arena.root()`.
pub fn bind_unit<'a, O>(
    arena: &'a NodeArena,
    oracle: &O,
    options: &BinderOptions,
) -> SemanticModel<'a>
where
    O: TypeOracle + ?Sized,
{
    let _span = span!(Level::DEBUG, "bind_unit", nodes = arena.len()).entered();
    let binder = Binder {
        arena,
        oracle,
        options,
        builder: ScopeTreeBuilder::new(),
        declared: FxHashMap::default(),
        site_symbols: Vec::new(),
        diagnostics: Vec::new(),
    };
    binder.run()
}

enum Pending<'s> {
    Site(&'s DeclarationSite),
    Ordinary(&'s OrdinaryDeclaration),
}

impl Pending<'_> {
    fn position(&self) -> u32 {
        match self {
            Pending::Site(site) => site.position,
            Pending::Ordinary(decl) => decl.position,
        }
    }
}

struct Binder<'a, 'o, O: ?Sized> {
    arena: &'a NodeArena,
    oracle: &'o O,
    options: &'o BinderOptions,
    builder: ScopeTreeBuilder,
    declared: FxHashMap<NodeIndex, SymbolId>,
    site_symbols: Vec<SymbolId>,
    diagnostics: Vec<BindDiagnostic>,
}

impl<'a, O: TypeOracle + ?Sized> Binder<'a, '_, O> {
    fn run(mut self) -> SemanticModel<'a> {
        let root = self.arena.root();
        let collector = DeclarationCollector::new(self.arena);
        let sites = collector.sites(root);
        let ordinary = collector.ordinary_declarations(root);

        let mut pending: Vec<Pending<'_>> = sites
            .iter()
            .map(Pending::Site)
            .chain(ordinary.iter().map(Pending::Ordinary))
            .collect();
        pending.sort_by_key(Pending::position);

        self.site_symbols = vec![SymbolId::NONE; sites.len()];
        let site_index: FxHashMap<NodeIndex, usize> = sites
            .iter()
            .enumerate()
            .map(|(i, site)| (site.node, i))
            .collect();

        for item in &pending {
            match item {
                Pending::Site(site) => {
                    let symbol = self.declare_site(site);
                    if let Some(&i) = site_index.get(&site.node) {
                        self.site_symbols[i] = symbol;
                    }
                }
                Pending::Ordinary(decl) => {
                    self.declare_ordinary(decl);
                }
            }
        }

        let tree = self.builder.finish();
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        check_enclosing_conflicts(&tree, self.options, &mut diagnostics);
        for (site, &symbol) in sites.iter().zip(&self.site_symbols) {
            check_site_context(self.arena, &tree, self.options, site, symbol, &mut diagnostics);
        }
        let resolutions = resolve_references(self.arena, &tree, &mut diagnostics);

        diagnostics.sort_by_key(|d| (d.span.pos, d.kind));
        debug!(diagnostics = diagnostics.len(), "binding finished");

        SemanticModel::new(
            self.arena,
            self.options.clone(),
            tree,
            sites,
            self.site_symbols,
            self.declared,
            resolutions,
            diagnostics,
        )
    }

    fn declare_site(&mut self, site: &DeclarationSite) -> SymbolId {
        let arena = self.arena;
        let kind = match site.kind {
            SiteKind::OutArgument => SymbolKind::ExpressionVariable,
            SiteKind::Pattern => SymbolKind::PatternVariable,
        };
        let ty = self.site_type(site);
        let failed = ty == SymbolType::Error;

        let symbol = LocalSymbol::new(
            site.name.as_str(),
            kind,
            ty,
            site.node,
            site.name_node,
            arena.span(site.name_node),
        );
        let id = self.declare(site.node, symbol);
        self.remember(site.node, id);
        self.remember(site.name_node, id);
        if site.kind == SiteKind::OutArgument {
            self.remember(arena.parent(site.node), id);
        }

        if failed {
            self.diagnostics.push(
                BindDiagnostic::new(
                    DiagnosticKind::TypeInferenceFailed,
                    arena.span(site.name_node),
                    site.name.as_str(),
                )
                .with_symbol(id),
            );
        }
        id
    }

    fn declare_ordinary(&mut self, decl: &OrdinaryDeclaration) -> SymbolId {
        let arena = self.arena;
        let ty = match &decl.declared_type {
            DeclaredType::Explicit(ty) => SymbolType::Known(ty.clone()),
            DeclaredType::Inferred => SymbolType::Deferred,
        };
        let mut symbol = LocalSymbol::new(
            decl.name.as_str(),
            decl.kind,
            ty,
            decl.node,
            decl.name_node,
            arena.span(decl.name_node),
        );
        if let Some((from, until)) = declared_visibility(arena, decl) {
            symbol = symbol.with_visibility(from, until);
        }

        let id = self.declare(decl.name_node, symbol);
        self.remember(decl.node, id);
        self.remember(decl.name_node, id);
        id
    }

    fn declare(&mut self, node: NodeIndex, symbol: LocalSymbol) -> SymbolId {
        let scope = self
            .builder
            .scope_for_node(self.arena, node)
            .unwrap_or(ScopeId::NONE);
        let name_span = symbol.name_span;
        let name = symbol.name.clone();
        let declared = self.builder.declare(scope, symbol);

        if let Some(existing) = declared.existing {
            let related = self.builder.symbol(existing).map(|s| s.name_span);
            debug!(name = %name, symbol = declared.symbol.0, "duplicate declaration in scope");
            let mut diag = BindDiagnostic::new(DiagnosticKind::DuplicateInScope, name_span, name)
                .with_symbol(declared.symbol);
            if let Some(related) = related {
                diag = diag.with_related(related);
            }
            self.diagnostics.push(diag);
        }
        declared.symbol
    }

    fn remember(&mut self, node: NodeIndex, symbol: SymbolId) {
        if node.is_some() {
            self.declared.entry(node).or_insert(symbol);
        }
    }

    fn site_type(&self, site: &DeclarationSite) -> SymbolType {
        match (&site.declared_type, site.kind) {
            (DeclaredType::Explicit(ty), _) => SymbolType::Known(ty.clone()),
            (DeclaredType::Inferred, SiteKind::Pattern) => SymbolType::Deferred,
            (DeclaredType::Inferred, SiteKind::OutArgument) => self
                .infer_out_type(site)
                .map_or(SymbolType::Error, SymbolType::Known),
        }
    }

    fn infer_out_type(&self, site: &DeclarationSite) -> Option<TypeRef> {
        let arena = self.arena;
        let argument = arena.parent(site.node);
        let ref_kind = arena.get_argument(argument)?.ref_kind;
        if ref_kind != RefKind::Out {
            return None;
        }
        let owner = site.containing_expression;
        let owner_node = arena.get(owner)?;
        let (callee, arguments) = match &owner_node.data {
            NodeData::Call(call) => (call.callee.as_str(), &call.arguments),
            NodeData::ConstructorInitializer(init) => {
                (if init.is_base { "base" } else { "this" }, &init.arguments)
            }
            NodeData::Attribute(attr) => (attr.name.as_str(), &attr.arguments),
            _ => return None,
        };
        let index = arguments.iter().position(|&arg| arg == argument)?;
        let call = CallSite {
            callee,
            owner: owner_node.kind,
            arity: arguments.len(),
            index,
            ref_kind,
        };
        let ty = self.oracle.out_argument_type(&call);
        debug!(callee, index, resolved = ty.is_some(), "out variable type");
        ty
    }
}

/// Visibility window for declarations that do not become visible at their
/// own name: range variables and iteration variables.
fn declared_visibility(arena: &NodeArena, decl: &OrdinaryDeclaration) -> Option<(u32, u32)> {
    let data = &arena.get(decl.node)?.data;
    match (decl.kind, data) {
        (SymbolKind::IterationVariable, NodeData::ForEach(stmt)) => {
            Some((arena.span(stmt.collection).end, u32::MAX))
        }
        (SymbolKind::RangeVariable, NodeData::Join(join)) => {
            let inner_key = arena.span(join.right_key);
            Some(if decl.name_node == join.into_name {
                (arena.span(decl.node).end, u32::MAX)
            } else if join.into_name.is_some() {
                (inner_key.pos, inner_key.end)
            } else {
                (inner_key.pos, u32::MAX)
            })
        }
        (SymbolKind::RangeVariable, NodeData::Query(_)) => {
            Some((arena.span(decl.name_node).end, u32::MAX))
        }
        (SymbolKind::RangeVariable, _) => Some((arena.span(decl.node).end, u32::MAX)),
        _ => None,
    }
}

/// Whether the enclosing-scope walk ends at `kind` (after checking it).
fn stops_conflict_walk(kind: ScopeKind, options: &BinderOptions) -> bool {
    kind.is_member_boundary()
        || (kind.is_nested_function()
            && options.language_version.allows_nested_function_shadowing())
}

/// Report locals whose name is already declared in an enclosing scope of
/// the same member. Runs after all declarations, so textual order between
/// the two declarations does not matter.
fn check_enclosing_conflicts(
    tree: &ScopeTree,
    options: &BinderOptions,
    out: &mut Vec<BindDiagnostic>,
) {
    for id in tree.symbol_ids() {
        let Some(symbol) = tree.symbol(id) else {
            continue;
        };
        if !symbol.is_active() || !symbol.kind.is_local_like() {
            continue;
        }
        let Some(scope) = tree.scope(symbol.scope) else {
            continue;
        };
        if stops_conflict_walk(scope.kind, options) {
            continue;
        }

        for (_, outer) in tree.chain(scope.parent) {
            if outer.kind == ScopeKind::Type {
                break;
            }
            let conflict = outer
                .get(&symbol.name)
                .and_then(|other| tree.symbol(other))
                .filter(|other| other.kind.is_local_like());
            if let Some(other) = conflict {
                let kind = if symbol.kind == SymbolKind::RangeVariable
                    || other.kind == SymbolKind::RangeVariable
                {
                    DiagnosticKind::RangeVariableShadow
                } else {
                    DiagnosticKind::IllegalOverride
                };
                debug!(name = %symbol.name, ?kind, "conflict with enclosing scope");
                out.push(
                    BindDiagnostic::new(kind, symbol.name_span, symbol.name.as_str())
                        .with_symbol(id)
                        .with_related(other.name_span),
                );
                break;
            }
            if stops_conflict_walk(outer.kind, options) {
                break;
            }
        }
    }
}

/// Constant-context and language-version checks for one site.
fn check_site_context(
    arena: &NodeArena,
    tree: &ScopeTree,
    options: &BinderOptions,
    site: &DeclarationSite,
    symbol: SymbolId,
    out: &mut Vec<BindDiagnostic>,
) {
    let Some(scope) = tree.symbol(symbol).map(|s| s.scope) else {
        return;
    };
    let span = arena.span(site.name_node);
    let chain: Vec<ScopeKind> = tree
        .chain(scope)
        .map(|(_, s)| s.kind)
        .take_while(|kind| *kind != ScopeKind::Type)
        .collect();

    if chain.iter().any(|kind| kind.is_constant_context()) || in_const_local(arena, site.node) {
        out.push(
            BindDiagnostic::new(DiagnosticKind::InvalidInConstantContext, span, site.name.as_str())
                .with_symbol(symbol),
        );
    }

    let version = options.language_version;
    if !version.allows_expression_variables_in_initializers() {
        if let Some(kind) = chain.iter().find(|kind| kind.needs_initializer_feature()) {
            out.push(
                BindDiagnostic::new(DiagnosticKind::FeatureUnavailable, span, site.name.as_str())
                    .with_symbol(symbol)
                    .with_args([kind.describe().to_string(), version.to_string()]),
            );
        }
    }
}

/// Whether `node` sits in the initializer of a `const` local declaration.
fn in_const_local(arena: &NodeArena, node: NodeIndex) -> bool {
    let mut current = arena.parent(node);
    while current.is_some() {
        match arena.kind(current) {
            Some(SyntaxKind::LocalDeclarationStatement) => {
                return arena.get_local_declaration(current).is_some_and(|d| d.is_const);
            }
            Some(kind) if kind.is_statement() || kind.is_function_like() => return false,
            Some(_) => {}
            None => return false,
        }
        current = arena.parent(current);
    }
    false
}

fn resolve_references(
    arena: &NodeArena,
    tree: &ScopeTree,
    out: &mut Vec<BindDiagnostic>,
) -> FxHashMap<NodeIndex, Resolution> {
    let mut resolutions = FxHashMap::default();
    for node in arena.descendants(arena.root()) {
        if arena.kind(node) != Some(SyntaxKind::IdentifierName) {
            continue;
        }
        let Some(name) = arena.name_text(node) else {
            continue;
        };
        let span = arena.span(node);
        let resolution = resolve_name(tree, arena, node, name, span.pos);
        match resolution {
            Resolution::Resolved(_) => {}
            Resolution::UsedBeforeDeclared(symbol) => {
                let mut diag = BindDiagnostic::new(DiagnosticKind::UsedBeforeDeclared, span, name)
                    .with_symbol(symbol);
                if let Some(declared) = tree.symbol(symbol) {
                    diag = diag.with_related(declared.name_span);
                }
                out.push(diag);
            }
            Resolution::NotInScope => {
                out.push(BindDiagnostic::new(DiagnosticKind::NotInScope, span, name));
            }
        }
        resolutions.insert(node, resolution);
    }
    resolutions
}
