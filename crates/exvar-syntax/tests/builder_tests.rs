//! Tests for TreeBuilder construction and span synthesis.

use exvar_common::Span;
use exvar_syntax::{BinaryOperator, RefKind, SyntaxKind, TreeBuilder, TypeSyntax};

#[test]
fn test_spans_nest_and_follow_source_order() {
    let mut b = TreeBuilder::new();
    let x = b.ident("x");
    let first = b.stmt(x);
    let y = b.ident("y");
    let second = b.stmt(y);
    let block = b.block(vec![first, second]);
    let arena = b.finish(block);

    assert_eq!(arena.span(block), Span::new(0, 5));
    assert_eq!(arena.span(first), Span::new(1, 3));
    assert_eq!(arena.span(x), Span::new(2, 3));
    assert_eq!(arena.span(second), Span::new(3, 5));
    assert!(arena.span(first).end <= arena.span(second).pos);
}

#[test]
fn test_call_wraps_plain_arguments() {
    let mut b = TreeBuilder::new();
    let x = b.ident("x");
    let out = b.out_var("y");
    let call = b.call("F", vec![x, out]);
    let arena = b.finish(call);

    let data = arena.get_call(call).expect("call");
    assert_eq!(data.callee, "F");
    let kinds: Vec<RefKind> = data
        .arguments
        .iter()
        .map(|&arg| arena.get_argument(arg).expect("argument").ref_kind)
        .collect();
    assert_eq!(kinds, vec![RefKind::None, RefKind::Out]);
}

#[test]
fn test_out_typed_records_explicit_type() {
    let mut b = TreeBuilder::new();
    let out = b.out_typed("int", "n");
    let arena = b.finish(out);
    let arg = arena.get_argument(out).expect("argument");
    let decl = arena
        .get_declaration_expression(arg.expression)
        .expect("declaration");
    assert_eq!(decl.ty, TypeSyntax::named("int"));
    assert_eq!(decl.ty.to_string(), "int");
}

#[test]
fn test_do_statement_children_put_body_first() {
    let mut b = TreeBuilder::new();
    let body = b.block(vec![]);
    let cond = b.ident("c");
    let stmt = b.do_stmt(body, cond);
    let arena = b.finish(stmt);
    assert_eq!(arena.children(stmt).as_slice(), &[body, cond]);
    assert!(arena.span(body).pos < arena.span(cond).pos);
}

#[test]
fn test_for_statement_children_order() {
    let mut b = TreeBuilder::new();
    let zero = b.lit("0");
    let init = b.declarator("i", zero);
    let cond = b.ident("c");
    let inc = b.ident("i");
    let body = b.block(vec![]);
    let stmt = b.for_stmt(vec![init], cond, vec![inc], body);
    let arena = b.finish(stmt);
    assert_eq!(arena.children(stmt).as_slice(), &[init, cond, inc, body]);
}

#[test]
fn test_optional_children_are_skipped() {
    let mut b = TreeBuilder::new();
    let block = b.block(vec![]);
    let catch = b.catch_clause(None, None, exvar_syntax::NodeIndex::NONE, block);
    let arena = b.finish(catch);
    assert_eq!(arena.children(catch).as_slice(), &[block]);
    assert!(arena.get_catch(catch).expect("catch").ty.is_none());
}

#[test]
fn test_query_shapes() {
    let mut b = TreeBuilder::new();
    let source = b.ident("xs");
    let from = b.from_clause("x", source);
    let other = b.ident("ys");
    let lk = b.ident("x");
    let rk = b.ident("y");
    let join = b.join_into("y", other, lk, rk, "g");
    let sel = b.ident("g");
    let select = b.select(sel);
    let tail = b.ident("z");
    let tail_select = b.select(tail);
    let cont = b.continuation("z", vec![tail_select], exvar_syntax::NodeIndex::NONE);
    let query = b.query(from, vec![join, select], cont);
    let arena = b.finish(query);

    assert_eq!(arena.kind(cont), Some(SyntaxKind::QueryContinuation));
    assert_eq!(arena.parent(cont), query);
    let join_data = arena.get_join(join).expect("join");
    assert_eq!(arena.name_text(join_data.into_name), Some("g"));
    assert_eq!(arena.children(query).as_slice(), &[from, join, select, cont]);
}

#[test]
fn test_with_attributes_on_field() {
    let mut b = TreeBuilder::new();
    let out = b.out_var("v");
    let attr = b.attribute("Obsolete", vec![out]);
    let value = b.lit("1");
    let decl = b.declarator("f", value);
    let field = b.field("int", vec![decl]);
    let field = b.with_attributes(field, vec![attr]);
    let arena = b.finish(field);
    assert_eq!(arena.children(field).as_slice(), &[attr, decl]);
    assert_eq!(arena.parent(out), attr);
}

#[test]
fn test_type_syntax_from_var() {
    assert_eq!(TypeSyntax::from("var"), TypeSyntax::Var);
    assert_eq!(TypeSyntax::from("int").name(), Some("int"));
}

#[test]
fn test_nodes_with_several_children_list_all_of_them() {
    let mut b = TreeBuilder::new();
    let cond = b.ident("c");
    let then_stmt = b.block(vec![]);
    let else_stmt = b.block(vec![]);
    let if_stmt = b.if_stmt(cond, then_stmt, else_stmt);

    let left = b.ident("a");
    let right = b.ident("b");
    let sum = b.binary(BinaryOperator::Add, left, right);

    let filter = b.ident("f");
    let handler = b.block(vec![]);
    let catch = b.catch_clause(Some("Exception"), Some("e"), filter, handler);

    let zero = b.lit("0");
    let declarator = b.declarator("x", zero);

    let block = b.block(vec![if_stmt, sum, catch, declarator]);
    let arena = b.finish(block);

    assert_eq!(
        arena.children(if_stmt).as_slice(),
        &[cond, then_stmt, else_stmt]
    );
    assert_eq!(arena.children(sum).as_slice(), &[left, right]);
    let catch_name = arena.get_catch(catch).expect("catch").name;
    assert_eq!(
        arena.children(catch).as_slice(),
        &[catch_name, filter, handler]
    );
    let declarator_name = arena.get_declarator(declarator).expect("declarator").name;
    assert_eq!(
        arena.children(declarator).as_slice(),
        &[declarator_name, zero]
    );
    assert_eq!(arena.parent(else_stmt), if_stmt);
    assert_eq!(arena.parent(right), sum);
    assert_eq!(arena.parent(handler), catch);
}

#[test]
fn test_header_declarators_keep_their_type() {
    let mut b = TreeBuilder::new();
    let zero = b.lit("0");
    let i = b.declarator("i", zero);
    let for_body = b.block(vec![]);
    let for_stmt = b.for_typed("int", vec![i], exvar_syntax::NodeIndex::NONE, vec![], for_body);

    let open = b.call("Open", vec![]);
    let s = b.declarator("s", open);
    let using_body = b.block(vec![]);
    let using = b.using_typed("Stream", vec![s], exvar_syntax::NodeIndex::NONE, using_body);

    let buffer = b.ident("buffer");
    let p = b.declarator("p", buffer);
    let fixed_body = b.block(vec![]);
    let fixed = b.fixed_stmt("byte*", vec![p], fixed_body);

    let gate = b.ident("gate");
    let lock_body = b.block(vec![]);
    let lock = b.lock_stmt(gate, lock_body);

    let block = b.block(vec![for_stmt, using, fixed, lock]);
    let arena = b.finish(block);

    let ty_of = |node| arena.get_resource(node).map(|data| data.ty.clone());
    assert_eq!(
        arena.get_loop(for_stmt).map(|data| data.ty.clone()),
        Some(TypeSyntax::named("int"))
    );
    assert_eq!(ty_of(using), Some(TypeSyntax::named("Stream")));
    assert_eq!(ty_of(fixed), Some(TypeSyntax::named("byte*")));
    assert!(arena.get_resource(lock).expect("lock").ty.is_var());
}
