//! Tests for SemanticModel queries.

use exvar_binder::{
    BinderOptions, DiagnosticKind, NoTypeInfo, Resolution, SemanticModel, bind_unit,
};
use exvar_syntax::{NodeArena, NodeIndex, SyntaxKind, TreeBuilder};

struct Sample {
    arena: NodeArena,
    call_f: NodeIndex,
    out_b: NodeIndex,
    ref_b: NodeIndex,
    ref_p: NodeIndex,
}

/// `void M(int p) { var a = F(out var b); G(b, p); }`
fn sample() -> Sample {
    let mut b = TreeBuilder::new();
    let p = b.param("p", "int");
    let out_b = b.out_var("b");
    let call_f = b.call("F", vec![out_b]);
    let local = b.local("a", call_f);
    let ref_b = b.ident("b");
    let ref_p = b.ident("p");
    let call_g = b.call("G", vec![ref_b, ref_p]);
    let stmt = b.stmt(call_g);
    let body = b.block(vec![local, stmt]);
    let method = b.method("M", vec![p], body);
    let class = b.class("C", vec![method]);
    let unit = b.unit(vec![class]);
    Sample {
        arena: b.finish(unit),
        call_f,
        out_b,
        ref_b,
        ref_p,
    }
}

fn bind(arena: &NodeArena) -> SemanticModel<'_> {
    bind_unit(arena, &NoTypeInfo, &BinderOptions::default())
}

#[test]
fn test_get_declared_symbol_accepts_site_argument_and_name() {
    let s = sample();
    let model = bind(&s.arena);

    let declaration = s.arena.children(s.out_b)[0];
    let name = s.arena.children(declaration)[0];
    let symbol = model.get_declared_symbol(declaration).expect("symbol");
    assert_eq!(model.get_declared_symbol(s.out_b), Some(symbol));
    assert_eq!(model.get_declared_symbol(name), Some(symbol));
    assert_eq!(model.get_declared_symbol(s.call_f), None);
    assert_eq!(model.symbol(symbol).map(|s| s.name.as_str()), Some("b"));
}

#[test]
fn test_resolve_identifier() {
    let s = sample();
    let model = bind(&s.arena);

    let b = model
        .get_declared_symbol(s.out_b)
        .expect("out variable symbol");
    assert_eq!(model.resolve_identifier(s.ref_b), Resolution::Resolved(b));
    let p = model.resolve_identifier(s.ref_p).symbol().expect("parameter");
    assert_eq!(model.symbol(p).map(|s| s.name.as_str()), Some("p"));

    // Not an identifier reference.
    assert_eq!(model.resolve_identifier(s.call_f), Resolution::NotInScope);
    assert_eq!(
        model.resolve_identifier(NodeIndex::NONE),
        Resolution::NotInScope
    );
}

#[test]
fn test_lookup_symbol_at_respects_declaration_order() {
    let s = sample();
    let model = bind(&s.arena);
    let b = model.get_declared_symbol(s.out_b).expect("b");

    let after = s.arena.span(s.ref_b).pos;
    assert_eq!(model.lookup_symbol_at(after, "b"), Some(b));

    // Inside the call that declares `b`, before the declaration itself.
    let before = s.arena.span(s.call_f).pos;
    assert_eq!(model.lookup_symbol_at(before, "b"), None);

    // Parameters are visible everywhere in the body.
    assert!(model.lookup_symbol_at(before, "p").is_some());
    assert_eq!(model.lookup_symbol_at(after, "missing"), None);
    assert_eq!(model.lookup_symbol_at(u32::MAX, "b"), None);
}

#[test]
fn test_lookup_names_at() {
    let s = sample();
    let model = bind(&s.arena);

    assert_eq!(
        model.lookup_names_at(s.arena.span(s.ref_b).pos),
        ["a", "b", "p"]
    );
    assert_eq!(
        model.lookup_names_at(s.arena.span(s.call_f).pos),
        ["a", "p"]
    );
    assert!(model.lookup_names_at(u32::MAX).is_empty());
}

#[test]
fn test_bound_references_are_ordered() {
    let s = sample();
    let model = bind(&s.arena);

    let refs = model.bound_references();
    let nodes: Vec<NodeIndex> = refs.iter().map(|(node, _)| *node).collect();
    assert_eq!(nodes, [s.ref_b, s.ref_p]);
    assert!(
        refs.iter()
            .all(|(_, resolution)| matches!(resolution, Resolution::Resolved(_)))
    );
}

#[test]
fn test_type_inference_failure_without_oracle() {
    let s = sample();
    let model = bind(&s.arena);

    let kinds: Vec<DiagnosticKind> = model.diagnostics().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, [DiagnosticKind::TypeInferenceFailed]);
    let diagnostic = model.diagnostics()[0].to_diagnostic("test.cs");
    assert_eq!(diagnostic.code, 7005);
    assert_eq!(diagnostic.file, "test.cs");
    assert_eq!(
        diagnostic.message_text,
        "Cannot infer the type of implicitly-typed out variable 'b'."
    );
}

#[test]
fn test_snapshot_and_json() {
    let s = sample();
    let model = bind(&s.arena);

    let snapshot = model.snapshot();
    assert_eq!(snapshot.symbols.len(), model.scope_tree().symbols().len());
    assert_eq!(snapshot.scopes.len(), model.scope_tree().scopes().len());
    assert_eq!(snapshot.references.len(), 2);
    assert!(snapshot.scopes.iter().any(|scope| scope.kind == "a block"));

    let json = model.to_json().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    let names: Vec<&str> = value["symbols"]
        .as_array()
        .expect("symbols array")
        .iter()
        .filter_map(|symbol| symbol["name"].as_str())
        .collect();
    assert_eq!(names, ["p", "a", "b"]);
}

#[test]
fn test_shared_model_across_threads() {
    let s = sample();
    let model = bind(&s.arena);
    let position = s.arena.span(s.ref_b).pos;
    let expected = model.lookup_names_at(position);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| model.lookup_names_at(position)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), expected);
        }
    });
}

#[test]
fn test_scope_kinds_are_recorded_for_identifier_scopes() {
    let s = sample();
    let model = bind(&s.arena);
    let b = model.get_declared_symbol(s.out_b).expect("b");
    let scope = model.scope_of_symbol(b).expect("scope");
    assert_eq!(s.arena.kind(scope.anchor), Some(SyntaxKind::Block));
    assert!(scope.span.contains(s.arena.span(s.ref_b).pos));
}
