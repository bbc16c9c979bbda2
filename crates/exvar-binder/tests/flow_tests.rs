//! Tests for the data-flow region interface.

use exvar_binder::{
    BinderOptions, RegionFlow, SemanticModel, SignatureTable, SymbolId, bind_unit,
};
use exvar_syntax::{NodeArena, NodeIndex, RefKind, TreeBuilder};

fn bind(arena: &NodeArena) -> SemanticModel<'_> {
    let oracle = SignatureTable::new()
        .with_method("F", &[("int", RefKind::Out)])
        .with_method("G", &[("int", RefKind::Out)]);
    bind_unit(arena, &oracle, &BinderOptions::default())
}

fn in_method(b: &mut TreeBuilder, params: Vec<NodeIndex>, statements: Vec<NodeIndex>) -> NodeIndex {
    let body = b.block(statements);
    let method = b.method("M", params, body);
    let class = b.class("C", vec![method]);
    b.unit(vec![class])
}

fn sorted(mut ids: Vec<SymbolId>) -> Vec<SymbolId> {
    ids.sort();
    ids
}

fn declared(model: &SemanticModel<'_>, node: NodeIndex) -> SymbolId {
    model
        .get_declared_symbol(node)
        .unwrap_or_else(|| panic!("no symbol declared by node {}", node.0))
}

struct Sample {
    arena: NodeArena,
    c: NodeIndex,
    a: NodeIndex,
    out_x: NodeIndex,
    out_y: NodeIndex,
    x_statement: NodeIndex,
    if_statement: NodeIndex,
}

/// `void M(bool c) { var a = 0; F(out var x); if (c) G(out var y); H(x, a); }`
fn sample() -> Sample {
    let mut b = TreeBuilder::new();
    let c = b.param("c", "bool");
    let zero = b.lit("0");
    let a_stmt = b.local("a", zero);
    let a = b.arena().children(a_stmt)[0];

    let out_x = b.out_var("x");
    let call_f = b.call("F", vec![out_x]);
    let x_statement = b.stmt(call_f);

    let cond = b.ident("c");
    let out_y = b.out_var("y");
    let call_g = b.call("G", vec![out_y]);
    let then_stmt = b.stmt(call_g);
    let if_statement = b.if_stmt(cond, then_stmt, NodeIndex::NONE);

    let x_ref = b.ident("x");
    let a_ref = b.ident("a");
    let call_h = b.call("H", vec![x_ref, a_ref]);
    let h_stmt = b.stmt(call_h);

    let unit = in_method(
        &mut b,
        vec![c],
        vec![a_stmt, x_statement, if_statement, h_stmt],
    );
    Sample {
        arena: b.finish(unit),
        c,
        a,
        out_x,
        out_y,
        x_statement,
        if_statement,
    }
}

#[test]
fn test_unconditional_declaration_region() {
    let s = sample();
    let model = bind(&s.arena);
    let c = declared(&model, s.c);
    let a = declared(&model, s.a);
    let x = declared(&model, s.out_x);
    let y = declared(&model, s.out_y);

    let flow = model.analyze_region(s.arena.span(s.x_statement));
    assert_eq!(
        flow,
        RegionFlow {
            variables_declared: vec![x],
            always_assigned: vec![x],
            read_inside: vec![],
            written_inside: vec![x],
            read_outside: sorted(vec![c, a, x]),
            written_outside: sorted(vec![c, a, y]),
        }
    );
}

#[test]
fn test_conditional_declaration_region() {
    let s = sample();
    let model = bind(&s.arena);
    let c = declared(&model, s.c);
    let a = declared(&model, s.a);
    let x = declared(&model, s.out_x);
    let y = declared(&model, s.out_y);

    let flow = model.analyze_region(s.arena.span(s.if_statement));
    assert_eq!(flow.variables_declared, [y]);
    assert!(flow.always_assigned.is_empty());
    assert_eq!(flow.written_inside, [y]);
    assert_eq!(flow.read_inside, [c]);
    assert_eq!(flow.read_outside, sorted(vec![a, x]));
    assert_eq!(flow.written_outside, sorted(vec![c, a, x]));
}

#[test]
fn test_declared_in_region_is_source_ordered() {
    let s = sample();
    let model = bind(&s.arena);
    let whole = s.arena.span(s.arena.root());
    let names: Vec<String> = model
        .declared_in_region(whole)
        .into_iter()
        .filter_map(|id| model.symbol(id).map(|s| s.name.clone()))
        .collect();
    assert_eq!(names, ["c", "a", "x", "y"]);
}

#[test]
fn test_short_circuit_right_operand_is_conditional() {
    // var r = F(out var p) && F(out var q);
    let mut b = TreeBuilder::new();
    let out_p = b.out_var("p");
    let left = b.call("F", vec![out_p]);
    let out_q = b.out_var("q");
    let right = b.call("F", vec![out_q]);
    let both = b.and(left, right);
    let statement = b.local("r", both);
    let r = b.arena().children(statement)[0];
    let unit = in_method(&mut b, vec![], vec![statement]);
    let arena = b.finish(unit);
    let model = bind(&arena);

    let r = declared(&model, r);
    let p = declared(&model, out_p);
    let q = declared(&model, out_q);
    let flow = model.analyze_region(arena.span(statement));
    assert_eq!(flow.variables_declared, [r, p, q]);
    assert_eq!(flow.always_assigned, sorted(vec![r, p]));
    assert_eq!(flow.written_inside, sorted(vec![r, p, q]));
}

#[test]
fn test_pattern_variable_is_never_always_assigned() {
    // if (o is int i) Use(i);
    let mut b = TreeBuilder::new();
    let o = b.param("o", "object");
    let o_ref = b.ident("o");
    let is_i = b.is_type(o_ref, "int", "i");
    let i_ref = b.ident("i");
    let use_i = b.call("Use", vec![i_ref]);
    let then_stmt = b.stmt(use_i);
    let statement = b.if_stmt(is_i, then_stmt, NodeIndex::NONE);
    let unit = in_method(&mut b, vec![o], vec![statement]);
    let arena = b.finish(unit);
    let model = bind(&arena);

    let o = declared(&model, o);
    let i = model.site_symbols()[0];
    let flow = model.analyze_region(arena.span(statement));
    assert_eq!(flow.variables_declared, [i]);
    assert!(flow.always_assigned.is_empty());
    assert_eq!(flow.written_inside, [i]);
    assert_eq!(flow.read_inside, sorted(vec![o, i]));
    assert_eq!(flow.written_outside, [o]);
}

#[test]
fn test_assignment_and_ref_arguments() {
    // int z; z = 1; Modify(ref z);
    let mut b = TreeBuilder::new();
    let z_decl = b.declarator("z", NodeIndex::NONE);
    let z_stmt = b.local_typed("int", vec![z_decl]);
    let target = b.ident("z");
    let one = b.lit("1");
    let assign = b.assign(target, one);
    let assign_stmt = b.stmt(assign);
    let by_ref = b.ref_arg("z");
    let modify = b.call("Modify", vec![by_ref]);
    let modify_stmt = b.stmt(modify);
    let unit = in_method(&mut b, vec![], vec![z_stmt, assign_stmt, modify_stmt]);
    let arena = b.finish(unit);
    let model = bind(&arena);
    let z = declared(&model, z_decl);

    let assigned = model.analyze_region(arena.span(assign_stmt));
    assert!(assigned.variables_declared.is_empty());
    assert_eq!(assigned.written_inside, [z]);
    assert_eq!(assigned.always_assigned, [z]);
    assert!(assigned.read_inside.is_empty());
    assert_eq!(assigned.read_outside, [z]);
    assert_eq!(assigned.written_outside, [z]);

    let modified = model.analyze_region(arena.span(modify_stmt));
    assert_eq!(modified.read_inside, [z]);
    assert_eq!(modified.written_inside, [z]);

    // The declaration alone assigns nothing.
    let declaration = model.analyze_region(arena.span(z_stmt));
    assert_eq!(declaration.variables_declared, [z]);
    assert!(declaration.written_inside.is_empty());
}

#[test]
fn test_lambda_body_is_conditional() {
    // var f = () => F(out var w);
    let mut b = TreeBuilder::new();
    let out_w = b.out_var("w");
    let body = b.call("F", vec![out_w]);
    let lambda = b.lambda(vec![], body);
    let statement = b.local("f", lambda);
    let f = b.arena().children(statement)[0];
    let unit = in_method(&mut b, vec![], vec![statement]);
    let arena = b.finish(unit);
    let model = bind(&arena);

    let f = declared(&model, f);
    let w = declared(&model, out_w);
    let flow = model.analyze_region(arena.span(statement));
    assert_eq!(flow.always_assigned, [f]);
    assert_eq!(flow.written_inside, sorted(vec![f, w]));
}

#[test]
fn test_local_functions_are_declared_but_not_variables() {
    let mut b = TreeBuilder::new();
    let body = b.block(vec![]);
    let local_fn = b.local_function("Helper", vec![], body);
    let unit = in_method(&mut b, vec![], vec![local_fn]);
    let arena = b.finish(unit);
    let model = bind(&arena);

    let helper = declared(&model, local_fn);
    let region = arena.span(local_fn);
    assert_eq!(model.declared_in_region(region), [helper]);
    assert!(model.analyze_region(region).variables_declared.is_empty());
}
