//! Programmatic construction of syntax trees.
//!
//! Nodes are created bottom-up: every constructor takes already-built child
//! indices and returns the new node's index. [`TreeBuilder::finish`] links
//! parent pointers and assigns spans in pre-order, so a node's `pos` is its
//! pre-order number and its `end` is one past the last node of its subtree.
//! The offsets are ordered the same way source text would be.

use crate::arena::NodeArena;
use crate::base::{NodeIndex, NodeList};
use crate::kind::SyntaxKind;
use crate::node::*;
use exvar_common::Span;

#[derive(Debug, Default)]
pub struct TreeBuilder {
    arena: NodeArena,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    /// Nodes built so far. Spans and parents are not set until `finish`.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Link parents under `root`, assign pre-order spans and hand back the arena.
    pub fn finish(mut self, root: NodeIndex) -> NodeArena {
        self.arena.link_parents(root);
        if self.arena.get(root).is_none() {
            return self.arena;
        }

        // (node, exiting) pairs; the exit marker closes the span once the
        // whole subtree has been numbered.
        let mut counter: u32 = 0;
        let mut stack = vec![(root, false)];
        while let Some((node, exiting)) = stack.pop() {
            if exiting {
                let pos = self.arena.span(node).pos;
                self.arena.set_span(node, Span::new(pos, counter));
                continue;
            }
            self.arena.set_span(node, Span::new(counter, counter));
            counter += 1;
            stack.push((node, true));
            let children = self.arena.children(node);
            stack.extend(children.into_iter().rev().map(|child| (child, false)));
        }
        self.arena
    }

    fn add(&mut self, kind: SyntaxKind, data: NodeData) -> NodeIndex {
        self.arena.add_node(kind, data)
    }

    fn expr_node(&mut self, kind: SyntaxKind, expression: NodeIndex) -> NodeIndex {
        self.add(kind, NodeData::Expr(ExprData { expression }))
    }

    /// A declared name.
    pub fn name(&mut self, text: &str) -> NodeIndex {
        self.add(
            SyntaxKind::Name,
            NodeData::Name(NameData {
                text: text.to_string(),
            }),
        )
    }

    fn optional_name(&mut self, text: Option<&str>) -> NodeIndex {
        text.map_or(NodeIndex::NONE, |text| self.name(text))
    }

    // =========================================================================
    // Units and members
    // =========================================================================

    pub fn unit(&mut self, members: NodeList) -> NodeIndex {
        self.add(
            SyntaxKind::CompilationUnit,
            NodeData::CompilationUnit(UnitData { members }),
        )
    }

    pub fn class(&mut self, name: &str, members: NodeList) -> NodeIndex {
        self.add(
            SyntaxKind::ClassDeclaration,
            NodeData::Class(ClassData {
                name: name.to_string(),
                attributes: NodeList::new(),
                members,
            }),
        )
    }

    pub fn field(&mut self, ty: &str, declarators: NodeList) -> NodeIndex {
        self.add(
            SyntaxKind::FieldDeclaration,
            NodeData::Field(FieldData {
                attributes: NodeList::new(),
                ty: ty.into(),
                declarators,
                is_const: false,
            }),
        )
    }

    pub fn const_field(&mut self, ty: &str, declarators: NodeList) -> NodeIndex {
        self.add(
            SyntaxKind::FieldDeclaration,
            NodeData::Field(FieldData {
                attributes: NodeList::new(),
                ty: ty.into(),
                declarators,
                is_const: true,
            }),
        )
    }

    /// Property with an optional initializer (`= e;`) and optional
    /// expression body (`=> e;`).
    pub fn property(
        &mut self,
        ty: &str,
        name: &str,
        initializer: NodeIndex,
        expression_body: NodeIndex,
    ) -> NodeIndex {
        let name = self.name(name);
        self.add(
            SyntaxKind::PropertyDeclaration,
            NodeData::Property(PropertyData {
                attributes: NodeList::new(),
                ty: ty.into(),
                name,
                initializer,
                expression_body,
            }),
        )
    }

    fn function(
        &mut self,
        kind: SyntaxKind,
        name: &str,
        name_node: NodeIndex,
        parameters: NodeList,
        initializer: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add(
            kind,
            NodeData::Function(FunctionData {
                name: name.to_string(),
                name_node,
                attributes: NodeList::new(),
                parameters,
                initializer,
                body,
            }),
        )
    }

    /// Method with a block or expression body.
    pub fn method(&mut self, name: &str, parameters: NodeList, body: NodeIndex) -> NodeIndex {
        self.function(
            SyntaxKind::MethodDeclaration,
            name,
            NodeIndex::NONE,
            parameters,
            NodeIndex::NONE,
            body,
        )
    }

    pub fn operator(&mut self, name: &str, parameters: NodeList, body: NodeIndex) -> NodeIndex {
        self.function(
            SyntaxKind::OperatorDeclaration,
            name,
            NodeIndex::NONE,
            parameters,
            NodeIndex::NONE,
            body,
        )
    }

    pub fn indexer(&mut self, parameters: NodeList, body: NodeIndex) -> NodeIndex {
        self.function(
            SyntaxKind::IndexerDeclaration,
            "this",
            NodeIndex::NONE,
            parameters,
            NodeIndex::NONE,
            body,
        )
    }

    pub fn constructor(
        &mut self,
        name: &str,
        parameters: NodeList,
        initializer: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.function(
            SyntaxKind::ConstructorDeclaration,
            name,
            NodeIndex::NONE,
            parameters,
            initializer,
            body,
        )
    }

    /// `: this(args)`
    pub fn this_init(&mut self, arguments: NodeList) -> NodeIndex {
        let arguments = self.wrap_arguments(arguments);
        self.add(
            SyntaxKind::ConstructorInitializer,
            NodeData::ConstructorInitializer(ConstructorInitializerData {
                is_base: false,
                arguments,
            }),
        )
    }

    /// `: base(args)`
    pub fn base_init(&mut self, arguments: NodeList) -> NodeIndex {
        let arguments = self.wrap_arguments(arguments);
        self.add(
            SyntaxKind::ConstructorInitializer,
            NodeData::ConstructorInitializer(ConstructorInitializerData {
                is_base: true,
                arguments,
            }),
        )
    }

    pub fn param(&mut self, name: &str, ty: &str) -> NodeIndex {
        self.param_with(name, ty, RefKind::None, NodeIndex::NONE)
    }

    /// Optional parameter with a default value.
    pub fn param_default(&mut self, name: &str, ty: &str, default: NodeIndex) -> NodeIndex {
        self.param_with(name, ty, RefKind::None, default)
    }

    pub fn param_with(
        &mut self,
        name: &str,
        ty: &str,
        ref_kind: RefKind,
        default: NodeIndex,
    ) -> NodeIndex {
        let name = self.name(name);
        self.add(
            SyntaxKind::Parameter,
            NodeData::Parameter(ParameterData {
                name,
                ty: ty.into(),
                ref_kind,
                default,
            }),
        )
    }

    pub fn attribute(&mut self, name: &str, arguments: NodeList) -> NodeIndex {
        let arguments = self.wrap_arguments(arguments);
        self.add(
            SyntaxKind::Attribute,
            NodeData::Attribute(AttributeData {
                name: name.to_string(),
                arguments,
            }),
        )
    }

    /// Attach attributes to a class, field, property or function-like
    /// member. Other nodes are left unchanged.
    pub fn with_attributes(&mut self, target: NodeIndex, attributes: NodeList) -> NodeIndex {
        if let Some(node) = self.arena.get_mut(target) {
            match &mut node.data {
                NodeData::Class(data) => data.attributes = attributes,
                NodeData::Field(data) => data.attributes = attributes,
                NodeData::Property(data) => data.attributes = attributes,
                NodeData::Function(data) => data.attributes = attributes,
                _ => {}
            }
        }
        target
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        self.expr_node(SyntaxKind::ExpressionStatement, expression)
    }

    pub fn ret(&mut self, expression: NodeIndex) -> NodeIndex {
        self.expr_node(SyntaxKind::ReturnStatement, expression)
    }

    pub fn throw(&mut self, expression: NodeIndex) -> NodeIndex {
        self.expr_node(SyntaxKind::ThrowStatement, expression)
    }

    pub fn yield_return(&mut self, expression: NodeIndex) -> NodeIndex {
        self.expr_node(SyntaxKind::YieldReturnStatement, expression)
    }

    /// `var name = initializer;`
    pub fn local(&mut self, name: &str, initializer: NodeIndex) -> NodeIndex {
        let declarator = self.declarator(name, initializer);
        self.local_typed("var", vec![declarator])
    }

    pub fn local_typed(&mut self, ty: &str, declarators: NodeList) -> NodeIndex {
        self.add(
            SyntaxKind::LocalDeclarationStatement,
            NodeData::LocalDeclaration(LocalDeclarationData {
                ty: ty.into(),
                declarators,
                is_const: false,
            }),
        )
    }

    pub fn local_const(&mut self, ty: &str, declarators: NodeList) -> NodeIndex {
        self.add(
            SyntaxKind::LocalDeclarationStatement,
            NodeData::LocalDeclaration(LocalDeclarationData {
                ty: ty.into(),
                declarators,
                is_const: true,
            }),
        )
    }

    pub fn declarator(&mut self, name: &str, initializer: NodeIndex) -> NodeIndex {
        let name = self.name(name);
        self.add(
            SyntaxKind::VariableDeclarator,
            NodeData::VariableDeclarator(VariableDeclaratorData { name, initializer }),
        )
    }

    pub fn if_stmt(
        &mut self,
        condition: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    ) -> NodeIndex {
        self.add(
            SyntaxKind::IfStatement,
            NodeData::If(IfData {
                condition,
                then_statement,
                else_statement,
            }),
        )
    }

    pub fn while_stmt(&mut self, condition: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::WhileStatement,
            NodeData::Loop(LoopData {
                condition,
                body,
                ..LoopData::default()
            }),
        )
    }

    pub fn do_stmt(&mut self, body: NodeIndex, condition: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::DoStatement,
            NodeData::Loop(LoopData {
                condition,
                body,
                ..LoopData::default()
            }),
        )
    }

    /// `for (initializers; condition; incrementors) body`. Initializers are
    /// variable declarators or expressions.
    pub fn for_stmt(
        &mut self,
        initializers: NodeList,
        condition: NodeIndex,
        incrementors: NodeList,
        body: NodeIndex,
    ) -> NodeIndex {
        self.for_typed("var", initializers, condition, incrementors, body)
    }

    /// `for (ty declarators; condition; incrementors) body`.
    pub fn for_typed(
        &mut self,
        ty: &str,
        initializers: NodeList,
        condition: NodeIndex,
        incrementors: NodeList,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add(
            SyntaxKind::ForStatement,
            NodeData::Loop(LoopData {
                ty: ty.into(),
                initializers,
                condition,
                incrementors,
                body,
            }),
        )
    }

    pub fn foreach_stmt(
        &mut self,
        ty: &str,
        name: &str,
        collection: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        let name = self.name(name);
        self.add(
            SyntaxKind::ForEachStatement,
            NodeData::ForEach(ForEachData {
                ty: ty.into(),
                name,
                collection,
                body,
            }),
        )
    }

    /// `using (var declarators) body` or `using (expression) body`.
    pub fn using_stmt(
        &mut self,
        declarators: NodeList,
        expression: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.using_typed("var", declarators, expression, body)
    }

    pub fn using_typed(
        &mut self,
        ty: &str,
        declarators: NodeList,
        expression: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add(
            SyntaxKind::UsingStatement,
            NodeData::Resource(ResourceData {
                ty: ty.into(),
                declarators,
                expression,
                body,
            }),
        )
    }

    pub fn lock_stmt(&mut self, expression: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::LockStatement,
            NodeData::Resource(ResourceData {
                expression,
                body,
                ..ResourceData::default()
            }),
        )
    }

    /// `fixed (ty declarators) body`; `ty` is the pointer type.
    pub fn fixed_stmt(&mut self, ty: &str, declarators: NodeList, body: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::FixedStatement,
            NodeData::Resource(ResourceData {
                ty: ty.into(),
                declarators,
                expression: NodeIndex::NONE,
                body,
            }),
        )
    }

    pub fn switch_stmt(&mut self, expression: NodeIndex, sections: NodeList) -> NodeIndex {
        self.add(
            SyntaxKind::SwitchStatement,
            NodeData::Switch(SwitchData {
                expression,
                sections,
            }),
        )
    }

    pub fn section(&mut self, labels: NodeList, statements: NodeList) -> NodeIndex {
        self.add(
            SyntaxKind::SwitchSection,
            NodeData::SwitchSection(SwitchSectionData { labels, statements }),
        )
    }

    /// `case pattern when guard:`; pass `NodeIndex::NONE` for no guard.
    pub fn case_label(&mut self, pattern: NodeIndex, guard: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::CaseLabel,
            NodeData::CaseLabel(CaseLabelData { pattern, guard }),
        )
    }

    /// `case T name when guard:`
    pub fn case_pattern(&mut self, ty: &str, name: &str, guard: NodeIndex) -> NodeIndex {
        let pattern = self.decl_pattern(ty, name);
        self.case_label(pattern, guard)
    }

    pub fn default_label(&mut self) -> NodeIndex {
        self.add(
            SyntaxKind::DefaultLabel,
            NodeData::CaseLabel(CaseLabelData {
                pattern: NodeIndex::NONE,
                guard: NodeIndex::NONE,
            }),
        )
    }

    pub fn break_stmt(&mut self) -> NodeIndex {
        self.add(SyntaxKind::BreakStatement, NodeData::None)
    }

    pub fn empty_stmt(&mut self) -> NodeIndex {
        self.add(SyntaxKind::EmptyStatement, NodeData::None)
    }

    pub fn block(&mut self, statements: NodeList) -> NodeIndex {
        self.add(SyntaxKind::Block, NodeData::Block(BlockData { statements }))
    }

    pub fn try_stmt(
        &mut self,
        block: NodeIndex,
        catches: NodeList,
        finally_block: NodeIndex,
    ) -> NodeIndex {
        self.add(
            SyntaxKind::TryStatement,
            NodeData::Try(TryData {
                block,
                catches,
                finally_block,
            }),
        )
    }

    /// `catch (ty name) when (filter) block`; every part but the block is
    /// optional.
    pub fn catch_clause(
        &mut self,
        ty: Option<&str>,
        name: Option<&str>,
        filter: NodeIndex,
        block: NodeIndex,
    ) -> NodeIndex {
        let name = self.optional_name(name);
        self.add(
            SyntaxKind::CatchClause,
            NodeData::Catch(CatchData {
                ty: ty.map(str::to_string),
                name,
                filter,
                block,
            }),
        )
    }

    pub fn local_function(
        &mut self,
        name: &str,
        parameters: NodeList,
        body: NodeIndex,
    ) -> NodeIndex {
        let name_node = self.name(name);
        self.function(
            SyntaxKind::LocalFunctionStatement,
            name,
            name_node,
            parameters,
            NodeIndex::NONE,
            body,
        )
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// A reference to a name.
    pub fn ident(&mut self, text: &str) -> NodeIndex {
        self.add(
            SyntaxKind::IdentifierName,
            NodeData::Name(NameData {
                text: text.to_string(),
            }),
        )
    }

    pub fn lit(&mut self, text: &str) -> NodeIndex {
        self.add(
            SyntaxKind::LiteralExpression,
            NodeData::Literal(LiteralData {
                text: text.to_string(),
            }),
        )
    }

    fn wrap_arguments(&mut self, arguments: NodeList) -> NodeList {
        arguments
            .into_iter()
            .map(|arg| {
                if self.arena.kind(arg) == Some(SyntaxKind::Argument) {
                    arg
                } else {
                    self.argument(RefKind::None, arg)
                }
            })
            .collect()
    }

    pub fn argument(&mut self, ref_kind: RefKind, expression: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::Argument,
            NodeData::Argument(ArgumentData {
                ref_kind,
                expression,
            }),
        )
    }

    /// `callee(args)`. Plain expressions are wrapped in by-value arguments.
    pub fn call(&mut self, callee: &str, arguments: NodeList) -> NodeIndex {
        let arguments = self.wrap_arguments(arguments);
        self.add(
            SyntaxKind::InvocationExpression,
            NodeData::Call(CallData {
                callee: callee.to_string(),
                arguments,
            }),
        )
    }

    /// `new ty(args)`
    pub fn new_object(&mut self, ty: &str, arguments: NodeList) -> NodeIndex {
        let arguments = self.wrap_arguments(arguments);
        self.add(
            SyntaxKind::ObjectCreationExpression,
            NodeData::Call(CallData {
                callee: ty.to_string(),
                arguments,
            }),
        )
    }

    /// `out var name` as an argument.
    pub fn out_var(&mut self, name: &str) -> NodeIndex {
        self.out_typed("var", name)
    }

    /// `out ty name` as an argument.
    pub fn out_typed(&mut self, ty: &str, name: &str) -> NodeIndex {
        let name = self.name(name);
        let declaration = self.add(
            SyntaxKind::DeclarationExpression,
            NodeData::DeclarationExpression(DeclarationExpressionData {
                ty: ty.into(),
                name,
            }),
        );
        self.argument(RefKind::Out, declaration)
    }

    /// `out name` passing an existing variable.
    pub fn out_ref(&mut self, name: &str) -> NodeIndex {
        let target = self.ident(name);
        self.argument(RefKind::Out, target)
    }

    /// `ref name`
    pub fn ref_arg(&mut self, name: &str) -> NodeIndex {
        let target = self.ident(name);
        self.argument(RefKind::Ref, target)
    }

    /// `ty name` designation; an empty `name` builds a bare type pattern.
    pub fn decl_pattern(&mut self, ty: &str, name: &str) -> NodeIndex {
        let name = if name.is_empty() {
            NodeIndex::NONE
        } else {
            self.name(name)
        };
        self.add(
            SyntaxKind::DeclarationPattern,
            NodeData::DeclarationPattern(DeclarationPatternData {
                ty: ty.into(),
                name,
            }),
        )
    }

    pub fn is_pattern(&mut self, expression: NodeIndex, pattern: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::IsPatternExpression,
            NodeData::IsPattern(IsPatternData {
                expression,
                pattern,
            }),
        )
    }

    /// `expression is ty name`
    pub fn is_type(&mut self, expression: NodeIndex, ty: &str, name: &str) -> NodeIndex {
        let pattern = self.decl_pattern(ty, name);
        self.is_pattern(expression, pattern)
    }

    pub fn binary(
        &mut self,
        operator: BinaryOperator,
        left: NodeIndex,
        right: NodeIndex,
    ) -> NodeIndex {
        self.add(
            SyntaxKind::BinaryExpression,
            NodeData::Binary(BinaryData {
                operator,
                left,
                right,
            }),
        )
    }

    pub fn and(&mut self, left: NodeIndex, right: NodeIndex) -> NodeIndex {
        self.binary(BinaryOperator::LogicalAnd, left, right)
    }

    pub fn or(&mut self, left: NodeIndex, right: NodeIndex) -> NodeIndex {
        self.binary(BinaryOperator::LogicalOr, left, right)
    }

    pub fn coalesce(&mut self, left: NodeIndex, right: NodeIndex) -> NodeIndex {
        self.binary(BinaryOperator::Coalesce, left, right)
    }

    pub fn conditional(
        &mut self,
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    ) -> NodeIndex {
        self.add(
            SyntaxKind::ConditionalExpression,
            NodeData::Conditional(ConditionalData {
                condition,
                when_true,
                when_false,
            }),
        )
    }

    pub fn assign(&mut self, target: NodeIndex, value: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::AssignmentExpression,
            NodeData::Assignment(AssignmentData { target, value }),
        )
    }

    /// `(parameters) => body` with a block or expression body.
    pub fn lambda(&mut self, parameters: NodeList, body: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::LambdaExpression,
            NodeData::Lambda(LambdaData { parameters, body }),
        )
    }

    // =========================================================================
    // Query expressions
    // =========================================================================

    pub fn query(
        &mut self,
        from_clause: NodeIndex,
        clauses: NodeList,
        continuation: NodeIndex,
    ) -> NodeIndex {
        self.add(
            SyntaxKind::QueryExpression,
            NodeData::Query(QueryData {
                from_clause,
                name: NodeIndex::NONE,
                clauses,
                continuation,
            }),
        )
    }

    /// `from name in expression`
    pub fn from_clause(&mut self, name: &str, expression: NodeIndex) -> NodeIndex {
        let name = self.name(name);
        self.add(
            SyntaxKind::FromClause,
            NodeData::RangeClause(RangeClauseData {
                ty: None,
                name,
                expression,
            }),
        )
    }

    /// `let name = expression`
    pub fn let_clause(&mut self, name: &str, expression: NodeIndex) -> NodeIndex {
        let name = self.name(name);
        self.add(
            SyntaxKind::LetClause,
            NodeData::RangeClause(RangeClauseData {
                ty: None,
                name,
                expression,
            }),
        )
    }

    /// `join name in in_expression on left_key equals right_key`
    pub fn join(
        &mut self,
        name: &str,
        in_expression: NodeIndex,
        left_key: NodeIndex,
        right_key: NodeIndex,
    ) -> NodeIndex {
        self.join_with(name, in_expression, left_key, right_key, None)
    }

    /// `join ... into into_name`
    pub fn join_into(
        &mut self,
        name: &str,
        in_expression: NodeIndex,
        left_key: NodeIndex,
        right_key: NodeIndex,
        into_name: &str,
    ) -> NodeIndex {
        self.join_with(name, in_expression, left_key, right_key, Some(into_name))
    }

    fn join_with(
        &mut self,
        name: &str,
        in_expression: NodeIndex,
        left_key: NodeIndex,
        right_key: NodeIndex,
        into_name: Option<&str>,
    ) -> NodeIndex {
        let name = self.name(name);
        let into_name = self.optional_name(into_name);
        self.add(
            SyntaxKind::JoinClause,
            NodeData::Join(JoinData {
                name,
                in_expression,
                left_key,
                right_key,
                into_name,
            }),
        )
    }

    pub fn where_clause(&mut self, condition: NodeIndex) -> NodeIndex {
        self.expr_node(SyntaxKind::WhereClause, condition)
    }

    pub fn order_by(&mut self, orderings: NodeList) -> NodeIndex {
        self.add(
            SyntaxKind::OrderByClause,
            NodeData::OrderBy(OrderByData { orderings }),
        )
    }

    pub fn ordering(&mut self, key: NodeIndex) -> NodeIndex {
        self.expr_node(SyntaxKind::Ordering, key)
    }

    pub fn select(&mut self, expression: NodeIndex) -> NodeIndex {
        self.expr_node(SyntaxKind::SelectClause, expression)
    }

    /// `group element by key`
    pub fn group(&mut self, element: NodeIndex, key: NodeIndex) -> NodeIndex {
        self.add(
            SyntaxKind::GroupClause,
            NodeData::Group(GroupData { element, key }),
        )
    }

    /// `into name clauses... [continuation]`
    pub fn continuation(
        &mut self,
        name: &str,
        clauses: NodeList,
        continuation: NodeIndex,
    ) -> NodeIndex {
        let name = self.name(name);
        self.add(
            SyntaxKind::QueryContinuation,
            NodeData::Query(QueryData {
                from_clause: NodeIndex::NONE,
                name,
                clauses,
                continuation,
            }),
        )
    }
}
