use serde::Serialize;

/// Node kinds of the consumed syntax tree.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    // Containers
    CompilationUnit,
    ClassDeclaration,

    // Members
    FieldDeclaration,
    PropertyDeclaration,
    MethodDeclaration,
    OperatorDeclaration,
    IndexerDeclaration,
    ConstructorDeclaration,
    ConstructorInitializer,
    Parameter,
    Attribute,

    // Statements
    Block,
    ExpressionStatement,
    ReturnStatement,
    ThrowStatement,
    YieldReturnStatement,
    LocalDeclarationStatement,
    VariableDeclarator,
    LocalFunctionStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForEachStatement,
    UsingStatement,
    LockStatement,
    FixedStatement,
    SwitchStatement,
    SwitchSection,
    CaseLabel,
    DefaultLabel,
    BreakStatement,
    TryStatement,
    CatchClause,
    EmptyStatement,

    // Expressions
    /// A declared name (declarator, parameter, designation, range variable).
    Name,
    /// A name used as an expression (a reference).
    IdentifierName,
    LiteralExpression,
    InvocationExpression,
    ObjectCreationExpression,
    Argument,
    DeclarationExpression,
    IsPatternExpression,
    DeclarationPattern,
    BinaryExpression,
    ConditionalExpression,
    AssignmentExpression,
    LambdaExpression,

    // Query expressions
    QueryExpression,
    FromClause,
    LetClause,
    JoinClause,
    WhereClause,
    OrderByClause,
    Ordering,
    SelectClause,
    GroupClause,
    QueryContinuation,
}

impl SyntaxKind {
    /// Nodes that own an ordered list of statements.
    pub const fn is_statement_list(self) -> bool {
        matches!(
            self,
            SyntaxKind::CompilationUnit | SyntaxKind::Block | SyntaxKind::SwitchSection
        )
    }

    /// Statements whose expressions declare into the enclosing statement list.
    pub const fn is_statement_container(self) -> bool {
        matches!(
            self,
            SyntaxKind::ExpressionStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::ThrowStatement
                | SyntaxKind::YieldReturnStatement
                | SyntaxKind::LocalDeclarationStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::SwitchStatement
        )
    }

    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::ThrowStatement
                | SyntaxKind::YieldReturnStatement
                | SyntaxKind::LocalDeclarationStatement
                | SyntaxKind::LocalFunctionStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::DoStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement
                | SyntaxKind::UsingStatement
                | SyntaxKind::LockStatement
                | SyntaxKind::FixedStatement
                | SyntaxKind::SwitchStatement
                | SyntaxKind::BreakStatement
                | SyntaxKind::TryStatement
                | SyntaxKind::EmptyStatement
        )
    }

    /// Loop and resource statements whose header shares one scope with the body.
    pub const fn is_loop_or_resource(self) -> bool {
        matches!(
            self,
            SyntaxKind::WhileStatement
                | SyntaxKind::DoStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement
                | SyntaxKind::UsingStatement
                | SyntaxKind::LockStatement
                | SyntaxKind::FixedStatement
        )
    }

    /// Members and nested functions that own a parameter list.
    pub const fn is_function_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::MethodDeclaration
                | SyntaxKind::OperatorDeclaration
                | SyntaxKind::IndexerDeclaration
                | SyntaxKind::ConstructorDeclaration
                | SyntaxKind::LocalFunctionStatement
                | SyntaxKind::LambdaExpression
        )
    }

    /// Query clauses translated into one operator application each.
    pub const fn is_query_clause(self) -> bool {
        matches!(
            self,
            SyntaxKind::FromClause
                | SyntaxKind::LetClause
                | SyntaxKind::JoinClause
                | SyntaxKind::WhereClause
                | SyntaxKind::OrderByClause
                | SyntaxKind::Ordering
                | SyntaxKind::SelectClause
                | SyntaxKind::GroupClause
        )
    }
}
