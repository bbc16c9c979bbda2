//! Node records and per-kind data.

use crate::base::{NodeIndex, NodeList};
use crate::kind::SyntaxKind;
use exvar_common::Span;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Child indices of one node, in source order.
pub type ChildList = SmallVec<[NodeIndex; 6]>;

/// A declared type: either spelled out or the `var` placeholder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TypeSyntax {
    /// `var`: the type comes from context.
    #[default]
    Var,
    Named(String),
}

impl TypeSyntax {
    pub fn named(name: impl Into<String>) -> Self {
        TypeSyntax::Named(name.into())
    }

    pub fn is_var(&self) -> bool {
        matches!(self, TypeSyntax::Var)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            TypeSyntax::Var => None,
            TypeSyntax::Named(name) => Some(name),
        }
    }
}

impl From<&str> for TypeSyntax {
    /// `"var"` maps to [`TypeSyntax::Var`], anything else is a named type.
    fn from(text: &str) -> Self {
        if text == "var" {
            TypeSyntax::Var
        } else {
            TypeSyntax::Named(text.to_string())
        }
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Var => f.write_str("var"),
            TypeSyntax::Named(name) => f.write_str(name),
        }
    }
}

/// Passing mode of an argument or parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefKind {
    #[default]
    None,
    Out,
    Ref,
    In,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    LogicalAnd,
    LogicalOr,
    Coalesce,
    Add,
    Subtract,
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
}

impl BinaryOperator {
    /// Operators whose right operand is evaluated only for some left values.
    pub const fn is_short_circuit(self) -> bool {
        matches!(
            self,
            BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr | BinaryOperator::Coalesce
        )
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: SyntaxKind,
    pub span: Span,
    pub data: NodeData,
}

impl Node {
    pub fn new(kind: SyntaxKind, data: NodeData) -> Self {
        Node {
            kind,
            span: Span::EMPTY,
            data,
        }
    }

    /// Child indices in source order. Absent optional children are skipped.
    pub fn children(&self) -> ChildList {
        let mut out = ChildList::new();
        self.data.push_children(self.kind, &mut out);
        out
    }
}

#[derive(Clone, Debug)]
pub enum NodeData {
    None,
    CompilationUnit(UnitData),
    Class(ClassData),
    Field(FieldData),
    Property(PropertyData),
    Function(FunctionData),
    ConstructorInitializer(ConstructorInitializerData),
    Parameter(ParameterData),
    Attribute(AttributeData),
    Block(BlockData),
    Expr(ExprData),
    LocalDeclaration(LocalDeclarationData),
    VariableDeclarator(VariableDeclaratorData),
    If(IfData),
    Loop(LoopData),
    ForEach(ForEachData),
    Resource(ResourceData),
    Switch(SwitchData),
    SwitchSection(SwitchSectionData),
    CaseLabel(CaseLabelData),
    Try(TryData),
    Catch(CatchData),
    Name(NameData),
    Literal(LiteralData),
    Call(CallData),
    Argument(ArgumentData),
    DeclarationExpression(DeclarationExpressionData),
    IsPattern(IsPatternData),
    DeclarationPattern(DeclarationPatternData),
    Binary(BinaryData),
    Conditional(ConditionalData),
    Assignment(AssignmentData),
    Lambda(LambdaData),
    Query(QueryData),
    RangeClause(RangeClauseData),
    Join(JoinData),
    OrderBy(OrderByData),
    Group(GroupData),
}

#[derive(Clone, Debug, Default)]
pub struct UnitData {
    /// Type declarations and top-level statements, in source order.
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct ClassData {
    pub name: String,
    pub attributes: NodeList,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct FieldData {
    pub attributes: NodeList,
    pub ty: TypeSyntax,
    pub declarators: NodeList,
    pub is_const: bool,
}

#[derive(Clone, Debug)]
pub struct PropertyData {
    pub attributes: NodeList,
    pub ty: TypeSyntax,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
    pub expression_body: NodeIndex,
}

/// Methods, operators, indexers, constructors and local functions.
#[derive(Clone, Debug)]
pub struct FunctionData {
    pub name: String,
    /// Declared name node; only local functions introduce their name into a
    /// statement list.
    pub name_node: NodeIndex,
    pub attributes: NodeList,
    pub parameters: NodeList,
    /// Constructor forwarding call (`: this(...)` / `: base(...)`).
    pub initializer: NodeIndex,
    /// A `Block`, or an expression for expression-bodied members.
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConstructorInitializerData {
    pub is_base: bool,
    pub arguments: NodeList,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub name: NodeIndex,
    pub ty: TypeSyntax,
    pub ref_kind: RefKind,
    pub default: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct AttributeData {
    pub name: String,
    pub arguments: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Single-expression statements and query clauses (`where`, `select`,
/// orderings).
#[derive(Clone, Debug)]
pub struct ExprData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct LocalDeclarationData {
    pub ty: TypeSyntax,
    pub declarators: NodeList,
    pub is_const: bool,
}

#[derive(Clone, Debug)]
pub struct VariableDeclaratorData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IfData {
    pub condition: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `while`, `do` and `for` statements.
#[derive(Clone, Debug, Default)]
pub struct LoopData {
    /// `for` only: type of the declarators in the init section.
    pub ty: TypeSyntax,
    /// `for` only: declarators or expressions of the init section.
    pub initializers: NodeList,
    pub condition: NodeIndex,
    /// `for` only.
    pub incrementors: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForEachData {
    pub ty: TypeSyntax,
    pub name: NodeIndex,
    pub collection: NodeIndex,
    pub body: NodeIndex,
}

/// `using`, `lock` and `fixed` statements.
#[derive(Clone, Debug, Default)]
pub struct ResourceData {
    /// Type of `declarators`; `var` when there are none.
    pub ty: TypeSyntax,
    pub declarators: NodeList,
    pub expression: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub sections: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct SwitchSectionData {
    pub labels: NodeList,
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct CaseLabelData {
    /// A constant expression or a `DeclarationPattern`; NONE for `default:`.
    pub pattern: NodeIndex,
    pub guard: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TryData {
    pub block: NodeIndex,
    pub catches: NodeList,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CatchData {
    pub ty: Option<String>,
    pub name: NodeIndex,
    pub filter: NodeIndex,
    pub block: NodeIndex,
}

/// Text of a `Name` or `IdentifierName` node.
#[derive(Clone, Debug)]
pub struct NameData {
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    pub text: String,
}

/// Invocations (`callee` is the method name) and object creations
/// (`callee` is the type name).
#[derive(Clone, Debug)]
pub struct CallData {
    pub callee: String,
    pub arguments: NodeList,
}

#[derive(Clone, Debug)]
pub struct ArgumentData {
    pub ref_kind: RefKind,
    pub expression: NodeIndex,
}

/// `out var x` / `out int x`.
#[derive(Clone, Debug)]
pub struct DeclarationExpressionData {
    pub ty: TypeSyntax,
    pub name: NodeIndex,
}

/// `expr is <pattern>`.
#[derive(Clone, Debug)]
pub struct IsPatternData {
    pub expression: NodeIndex,
    pub pattern: NodeIndex,
}

/// `T x` inside `is` or `case`; `name` is NONE for a bare type test.
#[derive(Clone, Debug)]
pub struct DeclarationPatternData {
    pub ty: TypeSyntax,
    pub name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BinaryData {
    pub operator: BinaryOperator,
    pub left: NodeIndex,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct AssignmentData {
    pub target: NodeIndex,
    pub value: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct LambdaData {
    pub parameters: NodeList,
    /// A `Block` or an expression.
    pub body: NodeIndex,
}

/// A query expression (`from_clause` set) or a query continuation
/// (`name` set to the `into` variable).
#[derive(Clone, Debug, Default)]
pub struct QueryData {
    pub from_clause: NodeIndex,
    pub name: NodeIndex,
    pub clauses: NodeList,
    pub continuation: NodeIndex,
}

/// `from x in e` and `let x = e`.
#[derive(Clone, Debug)]
pub struct RangeClauseData {
    pub ty: Option<String>,
    pub name: NodeIndex,
    pub expression: NodeIndex,
}

/// `join y in e on k1 equals k2 [into g]`.
#[derive(Clone, Debug)]
pub struct JoinData {
    pub name: NodeIndex,
    pub in_expression: NodeIndex,
    pub left_key: NodeIndex,
    pub right_key: NodeIndex,
    pub into_name: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct OrderByData {
    pub orderings: NodeList,
}

/// `group element by key`.
#[derive(Clone, Debug)]
pub struct GroupData {
    pub element: NodeIndex,
    pub key: NodeIndex,
}

impl NodeData {
    pub(crate) fn push_children(&self, kind: SyntaxKind, out: &mut ChildList) {
        macro_rules! push {
            ($($idx:expr),+ $(,)?) => {{
                $(if $idx.is_some() { out.push($idx); })+
            }};
        }
        macro_rules! push_all {
            ($list:expr) => {
                out.extend($list.iter().copied().filter(|idx| idx.is_some()))
            };
        }

        match self {
            NodeData::None | NodeData::Name(_) | NodeData::Literal(_) => {}
            NodeData::CompilationUnit(unit) => push_all!(unit.members),
            NodeData::Class(class) => {
                push_all!(class.attributes);
                push_all!(class.members);
            }
            NodeData::Field(field) => {
                push_all!(field.attributes);
                push_all!(field.declarators);
            }
            NodeData::Property(prop) => {
                push_all!(prop.attributes);
                push!(prop.name, prop.initializer, prop.expression_body);
            }
            NodeData::Function(func) => {
                push_all!(func.attributes);
                push!(func.name_node);
                push_all!(func.parameters);
                push!(func.initializer, func.body);
            }
            NodeData::ConstructorInitializer(init) => push_all!(init.arguments),
            NodeData::Parameter(param) => push!(param.name, param.default),
            NodeData::Attribute(attr) => push_all!(attr.arguments),
            NodeData::Block(block) => push_all!(block.statements),
            NodeData::Expr(expr) => push!(expr.expression),
            NodeData::LocalDeclaration(decl) => push_all!(decl.declarators),
            NodeData::VariableDeclarator(decl) => push!(decl.name, decl.initializer),
            NodeData::If(stmt) => push!(stmt.condition, stmt.then_statement, stmt.else_statement),
            NodeData::Loop(stmt) => {
                if kind == SyntaxKind::DoStatement {
                    push!(stmt.body, stmt.condition);
                } else {
                    push_all!(stmt.initializers);
                    push!(stmt.condition);
                    push_all!(stmt.incrementors);
                    push!(stmt.body);
                }
            }
            NodeData::ForEach(stmt) => push!(stmt.name, stmt.collection, stmt.body),
            NodeData::Resource(stmt) => {
                push_all!(stmt.declarators);
                push!(stmt.expression, stmt.body);
            }
            NodeData::Switch(stmt) => {
                push!(stmt.expression);
                push_all!(stmt.sections);
            }
            NodeData::SwitchSection(section) => {
                push_all!(section.labels);
                push_all!(section.statements);
            }
            NodeData::CaseLabel(label) => push!(label.pattern, label.guard),
            NodeData::Try(stmt) => {
                push!(stmt.block);
                push_all!(stmt.catches);
                push!(stmt.finally_block);
            }
            NodeData::Catch(clause) => push!(clause.name, clause.filter, clause.block),
            NodeData::Call(call) => push_all!(call.arguments),
            NodeData::Argument(arg) => push!(arg.expression),
            NodeData::DeclarationExpression(decl) => push!(decl.name),
            NodeData::IsPattern(expr) => push!(expr.expression, expr.pattern),
            NodeData::DeclarationPattern(pattern) => push!(pattern.name),
            NodeData::Binary(expr) => push!(expr.left, expr.right),
            NodeData::Conditional(expr) => push!(expr.condition, expr.when_true, expr.when_false),
            NodeData::Assignment(expr) => push!(expr.target, expr.value),
            NodeData::Lambda(lambda) => {
                push_all!(lambda.parameters);
                push!(lambda.body);
            }
            NodeData::Query(query) => {
                push!(query.from_clause, query.name);
                push_all!(query.clauses);
                push!(query.continuation);
            }
            NodeData::RangeClause(clause) => push!(clause.name, clause.expression),
            NodeData::Join(join) => push!(
                join.name,
                join.in_expression,
                join.left_key,
                join.right_key,
                join.into_name
            ),
            NodeData::OrderBy(order) => push_all!(order.orderings),
            NodeData::Group(group) => push!(group.element, group.key),
        }
    }
}
