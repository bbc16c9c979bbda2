//! Tests for the scope tree builder and the frozen scope tree.

use exvar_binder::{
    FunctionKind, LocalSymbol, ScopeId, ScopeKind, ScopeTreeBuilder, SymbolId, SymbolKind,
    SymbolState, SymbolType, classify,
};
use exvar_common::Span;
use exvar_syntax::{NodeArena, NodeIndex, TreeBuilder};

struct Sample {
    arena: NodeArena,
    class: NodeIndex,
    method: NodeIndex,
    body: NodeIndex,
    inner: NodeIndex,
    x_decl: NodeIndex,
}

/// `class C { void M() { { F(out var x); } } }`
fn sample() -> Sample {
    let mut b = TreeBuilder::new();
    let out_x = b.out_var("x");
    let call = b.call("F", vec![out_x]);
    let stmt = b.stmt(call);
    let inner = b.block(vec![stmt]);
    let body = b.block(vec![inner]);
    let method = b.method("M", vec![], body);
    let class = b.class("C", vec![method]);
    let unit = b.unit(vec![class]);
    let arena = b.finish(unit);
    let x_decl = arena.children(out_x)[0];
    Sample {
        arena,
        class,
        method,
        body,
        inner,
        x_decl,
    }
}

fn local(name: &str, kind: SymbolKind, name_span: Span) -> LocalSymbol {
    LocalSymbol::new(
        name,
        kind,
        SymbolType::Deferred,
        NodeIndex::NONE,
        NodeIndex::NONE,
        name_span,
    )
}

#[test]
fn test_ensure_scope_creates_missing_ancestors() {
    let s = sample();
    let mut builder = ScopeTreeBuilder::new();
    let scope = builder
        .scope_for_node(&s.arena, s.x_decl)
        .expect("scope for declaration");

    let kinds: Vec<ScopeKind> = builder_chain(&builder, scope);
    assert_eq!(
        kinds,
        [
            ScopeKind::Block,
            ScopeKind::Block,
            ScopeKind::Parameters(FunctionKind::Method),
            ScopeKind::Type,
            ScopeKind::CompilationUnit,
        ]
    );

    let inner = builder.scope(scope).expect("inner scope");
    assert_eq!(inner.anchor, s.inner);
    assert_eq!(inner.span, s.arena.span(s.inner));

    // Outermost scopes are created first.
    assert_eq!(
        builder.scope(ScopeId(0)).map(|scope| scope.kind),
        Some(ScopeKind::CompilationUnit)
    );
    assert!(builder.scope(ScopeId(0)).is_some_and(|s| s.parent.is_none()));
}

fn builder_chain(builder: &ScopeTreeBuilder, mut id: ScopeId) -> Vec<ScopeKind> {
    let mut kinds = Vec::new();
    while let Some(scope) = builder.scope(id) {
        kinds.push(scope.kind);
        if scope.parent.is_none() {
            break;
        }
        id = scope.parent;
    }
    kinds
}

#[test]
fn test_ensure_scope_is_idempotent() {
    let s = sample();
    let mut builder = ScopeTreeBuilder::new();
    let anchor = classify(&s.arena, s.x_decl).expect("anchor");
    let first = builder.ensure_scope(&s.arena, anchor);
    let second = builder.ensure_scope(&s.arena, anchor);
    assert_eq!(first, second);

    let tree = builder.finish();
    assert_eq!(tree.scopes().len(), 5);
}

#[test]
fn test_parent_children_links() {
    let s = sample();
    let mut builder = ScopeTreeBuilder::new();
    let inner = builder
        .scope_for_node(&s.arena, s.x_decl)
        .expect("inner scope");
    let tree = builder.finish();

    for (index, scope) in tree.scopes().iter().enumerate() {
        let id = ScopeId(index as u32);
        if let Some(parent) = tree.scope(scope.parent) {
            assert!(parent.children.contains(&id));
        }
        for &child in &scope.children {
            assert_eq!(tree.scope(child).map(|c| c.parent), Some(id));
        }
    }

    assert_eq!(tree.scope_at_anchor(s.inner), Some(inner));
    let body = tree.scope_at_anchor(s.body).expect("body scope");
    let method = tree.scope_at_anchor(s.method).expect("method scope");
    let class = tree.scope_at_anchor(s.class).expect("class scope");
    let chain: Vec<ScopeId> = tree.chain(inner).map(|(id, _)| id).collect();
    assert_eq!(&chain[..4], &[inner, body, method, class]);
}

#[test]
fn test_declare_rejects_second_active_symbol() {
    let s = sample();
    let mut builder = ScopeTreeBuilder::new();
    let scope = builder
        .scope_for_node(&s.arena, s.x_decl)
        .expect("scope");

    let first = builder.declare(scope, local("x", SymbolKind::Local, Span::new(3, 4)));
    assert_eq!(first.existing, None);
    let second = builder.declare(
        scope,
        local("x", SymbolKind::ExpressionVariable, Span::new(7, 8)),
    );
    assert_eq!(second.existing, Some(first.symbol));
    assert_ne!(first.symbol, second.symbol);
    let other = builder.declare(scope, local("y", SymbolKind::Local, Span::new(9, 10)));
    assert_eq!(other.existing, None);

    let tree = builder.finish();
    let node = tree.scope(scope).expect("scope");
    assert_eq!(node.get("x"), Some(first.symbol));
    assert_eq!(node.duplicates.as_slice(), &[second.symbol]);
    let names: Vec<&str> = node.locals.keys().map(String::as_str).collect();
    assert_eq!(names, ["x", "y"]);

    let dup = tree.symbol(second.symbol).expect("duplicate");
    assert_eq!(dup.state, SymbolState::DuplicateInScope);
    assert_eq!(dup.scope, scope);
    assert!(tree.symbol(first.symbol).is_some_and(LocalSymbol::is_active));
}

#[test]
fn test_enclosing_scope_uses_existing_scopes_only() {
    let s = sample();
    let mut builder = ScopeTreeBuilder::new();
    // Only the method body scope exists.
    let anchor = classify(&s.arena, s.inner).expect("anchor");
    let body = builder.ensure_scope(&s.arena, anchor);
    let tree = builder.finish();

    assert_eq!(tree.enclosing_scope(&s.arena, s.x_decl), Some(body));
    assert_eq!(tree.scope_at_anchor(s.inner), None);
    assert_eq!(tree.enclosing_scope(&s.arena, s.arena.root()), None);
}

#[test]
fn test_none_ids_are_absent() {
    let tree = ScopeTreeBuilder::new().finish();
    assert!(tree.scope(ScopeId::NONE).is_none());
    assert!(tree.symbol(SymbolId::NONE).is_none());
    assert_eq!(tree.chain(ScopeId::NONE).count(), 0);
    assert_eq!(tree.symbol_ids().count(), 0);
}

#[test]
fn test_symbol_visibility() {
    let span = Span::new(10, 11);
    let local = local("x", SymbolKind::ExpressionVariable, span);
    assert_eq!(local.visible_from, 10);
    assert!(!local.is_visible_at(9));
    assert!(local.is_visible_at(10));
    assert!(local.is_visible_at(u32::MAX - 1));

    let param = LocalSymbol::new(
        "p",
        SymbolKind::Parameter,
        SymbolType::Deferred,
        NodeIndex::NONE,
        NodeIndex::NONE,
        span,
    );
    assert_eq!(param.visible_from, 0);

    let range = local.with_visibility(12, 20);
    assert!(!range.is_visible_at(11));
    assert!(range.is_visible_at(12));
    assert!(!range.is_visible_at(20));
}

#[test]
fn test_symbol_kind_classes() {
    assert!(SymbolKind::Parameter.is_order_independent());
    assert!(SymbolKind::LocalFunction.is_order_independent());
    assert!(SymbolKind::Member.is_order_independent());
    assert!(!SymbolKind::ExpressionVariable.is_order_independent());
    assert!(!SymbolKind::Member.is_local_like());
    assert!(SymbolKind::RangeVariable.is_local_like());
}
