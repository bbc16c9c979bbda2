//! NodeArena storage, navigation and typed accessors.

use crate::base::NodeIndex;
use crate::kind::SyntaxKind;
use crate::node::*;
use exvar_common::Span;
use exvar_common::limits::MAX_TREE_WALK_ITERATIONS;

/// Flat storage for one syntax tree.
///
/// Nodes are addressed by [`NodeIndex`]. Parent links are filled in by
/// [`NodeArena::link_parents`] once the tree is complete.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    parents: Vec<NodeIndex>,
    root: NodeIndex,
}

macro_rules! typed_accessors {
    ($($(#[$meta:meta])* $name:ident => $variant:ident($data:ty);)*) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name(&self, index: NodeIndex) -> Option<&$data> {
                match self.get(index).map(|node| &node.data) {
                    Some(NodeData::$variant(data)) => Some(data),
                    _ => None,
                }
            }
        )*
    };
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
            parents: Vec::with_capacity(capacity),
            root: NodeIndex::NONE,
        }
    }

    /// Append a node and return its index. The parent link is unset until
    /// [`NodeArena::link_parents`] runs.
    pub fn add_node(&mut self, kind: SyntaxKind, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind, data));
        self.parents.push(NodeIndex::NONE);
        index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|node| node.kind)
    }

    /// Span of a node, or [`Span::EMPTY`] for an unknown index.
    #[inline]
    pub fn span(&self, index: NodeIndex) -> Span {
        self.get(index).map_or(Span::EMPTY, |node| node.span)
    }

    pub fn set_span(&mut self, index: NodeIndex, span: Span) {
        if let Some(node) = self.get_mut(index) {
            node.span = span;
        }
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        if index.is_none() {
            return NodeIndex::NONE;
        }
        self.parents
            .get(index.0 as usize)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn set_root(&mut self, root: NodeIndex) {
        self.root = root;
    }

    /// Child indices of `index` in source order.
    pub fn children(&self, index: NodeIndex) -> ChildList {
        self.get(index).map(Node::children).unwrap_or_default()
    }

    /// Fill in parent links for every node reachable from `root` and make
    /// `root` the arena root.
    pub fn link_parents(&mut self, root: NodeIndex) {
        self.root = root;
        if self.get(root).is_none() {
            return;
        }
        self.parents[root.0 as usize] = NodeIndex::NONE;
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            for child in self.children(current) {
                if let Some(slot) = self.parents.get_mut(child.0 as usize) {
                    *slot = current;
                    stack.push(child);
                }
            }
        }
    }

    /// Pre-order walk of the subtree rooted at `index`, `index` included.
    pub fn descendants(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        if self.get(index).is_none() {
            return out;
        }
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            out.push(current);
            let children = self.children(current);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: NodeIndex, node: NodeIndex) -> bool {
        let mut current = node;
        let mut iterations = 0;
        while current.is_some() {
            if current == ancestor {
                return true;
            }
            iterations += 1;
            if iterations > MAX_TREE_WALK_ITERATIONS {
                return false;
            }
            current = self.parent(current);
        }
        false
    }

    /// Deepest node under the root whose span contains `offset`.
    pub fn node_at(&self, offset: u32) -> NodeIndex {
        let mut current = self.root;
        if !self.span(current).contains(offset) {
            return NodeIndex::NONE;
        }
        'descend: loop {
            for child in self.children(current) {
                if self.span(child).contains(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    /// Text of a `Name` or `IdentifierName` node.
    pub fn name_text(&self, index: NodeIndex) -> Option<&str> {
        match self.get(index).map(|node| &node.data) {
            Some(NodeData::Name(name)) => Some(name.text.as_str()),
            _ => None,
        }
    }

    typed_accessors! {
        get_unit => CompilationUnit(UnitData);
        get_class => Class(ClassData);
        get_field => Field(FieldData);
        get_property => Property(PropertyData);
        /// Methods, operators, indexers, constructors and local functions.
        get_function => Function(FunctionData);
        get_constructor_initializer => ConstructorInitializer(ConstructorInitializerData);
        get_parameter => Parameter(ParameterData);
        get_attribute => Attribute(AttributeData);
        get_block => Block(BlockData);
        get_expr => Expr(ExprData);
        get_local_declaration => LocalDeclaration(LocalDeclarationData);
        get_declarator => VariableDeclarator(VariableDeclaratorData);
        get_if => If(IfData);
        /// `while`, `do` and `for` statements.
        get_loop => Loop(LoopData);
        get_foreach => ForEach(ForEachData);
        /// `using`, `lock` and `fixed` statements.
        get_resource => Resource(ResourceData);
        get_switch => Switch(SwitchData);
        get_switch_section => SwitchSection(SwitchSectionData);
        get_case_label => CaseLabel(CaseLabelData);
        get_try => Try(TryData);
        get_catch => Catch(CatchData);
        get_literal => Literal(LiteralData);
        get_call => Call(CallData);
        get_argument => Argument(ArgumentData);
        get_declaration_expression => DeclarationExpression(DeclarationExpressionData);
        get_is_pattern => IsPattern(IsPatternData);
        get_declaration_pattern => DeclarationPattern(DeclarationPatternData);
        get_binary => Binary(BinaryData);
        get_conditional => Conditional(ConditionalData);
        get_assignment => Assignment(AssignmentData);
        get_lambda => Lambda(LambdaData);
        /// Query expressions and continuations.
        get_query => Query(QueryData);
        /// `from` and `let` clauses.
        get_range_clause => RangeClause(RangeClauseData);
        get_join => Join(JoinData);
        get_order_by => OrderBy(OrderByData);
        get_group => Group(GroupData);
    }
}
