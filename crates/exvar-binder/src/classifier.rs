//! Scope classification.
//!
//! [`classify`] walks the ancestors of a node and returns the anchor of the
//! scope that captures it: the innermost construct with a scoping rule. The
//! same walk serves declarations, references, and the parent link of a scope
//! node (the parent of the scope anchored at `n` is `classify(n)`).
//!
//! Rules are looked up for each `(ancestor, child-on-path)` pair, innermost
//! first. A rule either skips the ancestor, anchors the scope at the
//! ancestor itself, anchors it at the child (initializers and expression
//! bodies own only that child), or escapes an enclosing query expression.

use exvar_common::limits::MAX_TREE_WALK_ITERATIONS;
use exvar_syntax::{NodeArena, NodeIndex, SyntaxKind};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LoopKind {
    For,
    While,
    Do,
    ForEach,
    Using,
    Lock,
    Fixed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum InitializerKind {
    Field,
    Constant,
    Property,
    ParameterDefault,
    AttributeArguments,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FunctionKind {
    Method,
    Operator,
    Indexer,
    Constructor,
    LocalFunction,
    Lambda,
    Property,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum QueryClauseKind {
    From,
    Let,
    Join,
    Where,
    Ordering,
    Select,
    Group,
}

/// Kind of a scope node, one variant per scoping construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ScopeKind {
    CompilationUnit,
    /// Members of a type declaration.
    Type,
    Block,
    SwitchSection,
    /// A statement that is not directly inside a statement list.
    EmbeddedStatement,
    LoopHeader(LoopKind),
    Initializer(InitializerKind),
    ExpressionBody(FunctionKind),
    ConstructorInitializer,
    Catch,
    QueryClause(QueryClauseKind),
    /// Range variables of a query expression or continuation.
    Query,
    Parameters(FunctionKind),
}

impl ScopeKind {
    /// Parameter scopes of members. Conflict checks never look past them.
    pub const fn is_member_boundary(self) -> bool {
        matches!(
            self,
            ScopeKind::Parameters(
                FunctionKind::Method
                    | FunctionKind::Operator
                    | FunctionKind::Indexer
                    | FunctionKind::Constructor
            )
        )
    }

    /// Parameter scopes of lambdas and local functions.
    pub const fn is_nested_function(self) -> bool {
        matches!(
            self,
            ScopeKind::Parameters(FunctionKind::Lambda | FunctionKind::LocalFunction)
        )
    }

    /// Scopes whose whole expression must be a compile-time constant.
    pub const fn is_constant_context(self) -> bool {
        matches!(
            self,
            ScopeKind::Initializer(
                InitializerKind::Constant
                    | InitializerKind::ParameterDefault
                    | InitializerKind::AttributeArguments
            )
        )
    }

    /// Contexts where expression variables need language version 7.3.
    pub const fn needs_initializer_feature(self) -> bool {
        matches!(
            self,
            ScopeKind::Initializer(_)
                | ScopeKind::ConstructorInitializer
                | ScopeKind::QueryClause(_)
        )
    }

    pub fn describe(self) -> &'static str {
        match self {
            ScopeKind::CompilationUnit => "top-level statements",
            ScopeKind::Type => "a type declaration",
            ScopeKind::Block => "a block",
            ScopeKind::SwitchSection => "a switch section",
            ScopeKind::EmbeddedStatement => "an embedded statement",
            ScopeKind::LoopHeader(_) => "a loop or resource header",
            ScopeKind::Initializer(InitializerKind::Field) => "a field initializer",
            ScopeKind::Initializer(InitializerKind::Constant) => "a constant initializer",
            ScopeKind::Initializer(InitializerKind::Property) => "a property initializer",
            ScopeKind::Initializer(InitializerKind::ParameterDefault) => {
                "a parameter default value"
            }
            ScopeKind::Initializer(InitializerKind::AttributeArguments) => {
                "an attribute argument list"
            }
            ScopeKind::ExpressionBody(_) => "an expression body",
            ScopeKind::ConstructorInitializer => "a constructor initializer",
            ScopeKind::Catch => "a catch clause",
            ScopeKind::QueryClause(_) => "a query clause",
            ScopeKind::Query => "a query expression",
            ScopeKind::Parameters(_) => "a parameter list",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The node a scope is attached to, with its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Anchor {
    pub node: NodeIndex,
    pub kind: ScopeKind,
}

enum Rule {
    Continue,
    SelfAnchor(ScopeKind),
    ChildAnchor(ScopeKind),
    EscapeQuery,
}

/// Anchor of the scope capturing `origin`, or `None` above the root.
pub fn classify(arena: &NodeArena, origin: NodeIndex) -> Option<Anchor> {
    let mut child = origin;
    let mut current = arena.parent(origin);
    let mut iterations = 0;

    while current.is_some() {
        iterations += 1;
        if iterations > MAX_TREE_WALK_ITERATIONS {
            return None;
        }

        match rule_for(arena, current, child) {
            Rule::Continue => {}
            Rule::SelfAnchor(kind) => {
                return Some(Anchor {
                    node: current,
                    kind,
                });
            }
            Rule::ChildAnchor(kind) if child != origin => {
                return Some(Anchor { node: child, kind });
            }
            // The origin is itself the anchored child; its enclosing scope is
            // whatever captures the owner.
            Rule::ChildAnchor(_) => {
                if let Some(kind) = owner_rule(arena, current) {
                    return Some(Anchor {
                        node: current,
                        kind,
                    });
                }
            }
            Rule::EscapeQuery => {
                let query = owning_query(arena, current);
                child = query;
                current = arena.parent(query);
                continue;
            }
        }

        child = current;
        current = arena.parent(current);
    }

    None
}

fn rule_for(arena: &NodeArena, current: NodeIndex, child: NodeIndex) -> Rule {
    let Some(kind) = arena.kind(current) else {
        return Rule::Continue;
    };

    match kind {
        SyntaxKind::CompilationUnit => Rule::SelfAnchor(ScopeKind::CompilationUnit),
        SyntaxKind::ClassDeclaration => Rule::SelfAnchor(ScopeKind::Type),
        SyntaxKind::Block => Rule::SelfAnchor(ScopeKind::Block),
        SyntaxKind::SwitchSection => Rule::SelfAnchor(ScopeKind::SwitchSection),
        SyntaxKind::CatchClause => Rule::SelfAnchor(ScopeKind::Catch),
        SyntaxKind::ConstructorInitializer => Rule::SelfAnchor(ScopeKind::ConstructorInitializer),
        SyntaxKind::Attribute => {
            Rule::SelfAnchor(ScopeKind::Initializer(InitializerKind::AttributeArguments))
        }

        k if k.is_statement_container() => container_rule(arena, current),
        k if k.is_loop_or_resource() => Rule::SelfAnchor(ScopeKind::LoopHeader(loop_kind(k))),

        SyntaxKind::LambdaExpression => {
            let body = arena.get_lambda(current).map_or(NodeIndex::NONE, |l| l.body);
            function_rule(arena, FunctionKind::Lambda, child, body)
        }
        SyntaxKind::LocalFunctionStatement
        | SyntaxKind::MethodDeclaration
        | SyntaxKind::OperatorDeclaration
        | SyntaxKind::IndexerDeclaration
        | SyntaxKind::ConstructorDeclaration => {
            let Some(func) = arena.get_function(current) else {
                return Rule::Continue;
            };
            if kind == SyntaxKind::LocalFunctionStatement && child == func.name_node {
                return container_rule(arena, current);
            }
            if arena.kind(child) == Some(SyntaxKind::Attribute) {
                return Rule::Continue;
            }
            function_rule(arena, function_kind(kind), child, func.body)
        }

        SyntaxKind::VariableDeclarator => {
            let is_initializer = arena
                .get_declarator(current)
                .is_some_and(|d| d.initializer == child);
            let field = arena.parent(current);
            match arena.get_field(field) {
                Some(data) if is_initializer => Rule::ChildAnchor(ScopeKind::Initializer(
                    if data.is_const {
                        InitializerKind::Constant
                    } else {
                        InitializerKind::Field
                    },
                )),
                _ => Rule::Continue,
            }
        }
        SyntaxKind::PropertyDeclaration => match arena.get_property(current) {
            Some(prop) if prop.initializer == child => {
                Rule::ChildAnchor(ScopeKind::Initializer(InitializerKind::Property))
            }
            Some(prop) if prop.expression_body == child => {
                Rule::ChildAnchor(ScopeKind::ExpressionBody(FunctionKind::Property))
            }
            _ => Rule::Continue,
        },
        SyntaxKind::Parameter => match arena.get_parameter(current) {
            Some(param) if param.default == child => {
                Rule::ChildAnchor(ScopeKind::Initializer(InitializerKind::ParameterDefault))
            }
            _ => Rule::Continue,
        },

        SyntaxKind::FromClause => match arena.get_range_clause(current) {
            Some(clause) if clause.expression == child => {
                let query = arena.parent(current);
                let is_first = arena
                    .get_query(query)
                    .is_some_and(|q| q.from_clause == current);
                if is_first {
                    Rule::EscapeQuery
                } else {
                    Rule::SelfAnchor(ScopeKind::QueryClause(QueryClauseKind::From))
                }
            }
            _ => Rule::Continue,
        },
        SyntaxKind::LetClause => match arena.get_range_clause(current) {
            Some(clause) if clause.expression == child => {
                Rule::SelfAnchor(ScopeKind::QueryClause(QueryClauseKind::Let))
            }
            _ => Rule::Continue,
        },
        SyntaxKind::JoinClause => match arena.get_join(current) {
            Some(join) if join.in_expression == child => Rule::EscapeQuery,
            Some(join) if join.left_key == child || join.right_key == child => {
                Rule::SelfAnchor(ScopeKind::QueryClause(QueryClauseKind::Join))
            }
            _ => Rule::Continue,
        },
        SyntaxKind::WhereClause => Rule::SelfAnchor(ScopeKind::QueryClause(QueryClauseKind::Where)),
        SyntaxKind::Ordering => Rule::SelfAnchor(ScopeKind::QueryClause(QueryClauseKind::Ordering)),
        SyntaxKind::SelectClause => {
            Rule::SelfAnchor(ScopeKind::QueryClause(QueryClauseKind::Select))
        }
        SyntaxKind::GroupClause => Rule::SelfAnchor(ScopeKind::QueryClause(QueryClauseKind::Group)),
        SyntaxKind::QueryExpression | SyntaxKind::QueryContinuation => {
            match arena.get_query(current) {
                Some(query) if query.continuation == child => Rule::EscapeQuery,
                _ => Rule::SelfAnchor(ScopeKind::Query),
            }
        }

        _ => Rule::Continue,
    }
}

/// Statements directly in a list declare into the list; embedded
/// statements get their own scope.
fn container_rule(arena: &NodeArena, statement: NodeIndex) -> Rule {
    let in_list = arena
        .kind(arena.parent(statement))
        .is_some_and(SyntaxKind::is_statement_list);
    if in_list {
        Rule::Continue
    } else {
        Rule::SelfAnchor(ScopeKind::EmbeddedStatement)
    }
}

fn function_rule(arena: &NodeArena, kind: FunctionKind, child: NodeIndex, body: NodeIndex) -> Rule {
    if child == body && arena.kind(body) != Some(SyntaxKind::Block) {
        Rule::ChildAnchor(ScopeKind::ExpressionBody(kind))
    } else {
        Rule::SelfAnchor(ScopeKind::Parameters(kind))
    }
}

/// Scope of the owner of a child-anchored node, when the owner has one.
fn owner_rule(arena: &NodeArena, owner: NodeIndex) -> Option<ScopeKind> {
    let kind = arena.kind(owner)?;
    kind.is_function_like()
        .then_some(ScopeKind::Parameters(function_kind(kind)))
}

/// The query expression owning `node`, following continuations outward.
fn owning_query(arena: &NodeArena, node: NodeIndex) -> NodeIndex {
    let mut current = node;
    let mut iterations = 0;
    while current.is_some() && arena.kind(current) != Some(SyntaxKind::QueryExpression) {
        iterations += 1;
        if iterations > MAX_TREE_WALK_ITERATIONS {
            break;
        }
        current = arena.parent(current);
    }
    if current.is_none() { node } else { current }
}

fn loop_kind(kind: SyntaxKind) -> LoopKind {
    match kind {
        SyntaxKind::WhileStatement => LoopKind::While,
        SyntaxKind::DoStatement => LoopKind::Do,
        SyntaxKind::ForEachStatement => LoopKind::ForEach,
        SyntaxKind::UsingStatement => LoopKind::Using,
        SyntaxKind::LockStatement => LoopKind::Lock,
        SyntaxKind::FixedStatement => LoopKind::Fixed,
        _ => LoopKind::For,
    }
}

fn function_kind(kind: SyntaxKind) -> FunctionKind {
    match kind {
        SyntaxKind::OperatorDeclaration => FunctionKind::Operator,
        SyntaxKind::IndexerDeclaration => FunctionKind::Indexer,
        SyntaxKind::ConstructorDeclaration => FunctionKind::Constructor,
        SyntaxKind::LocalFunctionStatement => FunctionKind::LocalFunction,
        SyntaxKind::LambdaExpression => FunctionKind::Lambda,
        _ => FunctionKind::Method,
    }
}
