//! Region interface for data-flow analysis.
//!
//! Data-flow analysis asks which variables a region declares and how the
//! region reads and writes variables relative to the code around it. The
//! answers here are computed from declarations and bound references only;
//! reachability is approximated by syntax.

use crate::lookup::{Resolution, SemanticModel};
use crate::scope_tree::{SymbolId, SymbolKind};
use exvar_common::Span;
use exvar_common::limits::MAX_TREE_WALK_ITERATIONS;
use exvar_syntax::{NodeArena, NodeData, NodeIndex, RefKind, SyntaxKind};
use fixedbitset::FixedBitSet;
use serde::Serialize;

/// Variable sets of a region, each sorted by symbol id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegionFlow {
    pub variables_declared: Vec<SymbolId>,
    /// Written inside the region on every path through it.
    pub always_assigned: Vec<SymbolId>,
    pub read_inside: Vec<SymbolId>,
    pub written_inside: Vec<SymbolId>,
    pub read_outside: Vec<SymbolId>,
    pub written_outside: Vec<SymbolId>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
    ReadWrite,
}

struct Event {
    symbol: SymbolId,
    node: NodeIndex,
    offset: u32,
    access: Access,
}

impl SemanticModel<'_> {
    /// Local symbols whose declaration lies inside `region`, in source order.
    pub fn declared_in_region(&self, region: Span) -> Vec<SymbolId> {
        let mut declared: Vec<SymbolId> = self
            .tree
            .symbol_ids()
            .filter(|&id| {
                self.symbol(id).is_some_and(|symbol| {
                    symbol.kind.is_local_like() && region.contains_span(symbol.name_span)
                })
            })
            .collect();
        declared.sort_by_key(|&id| self.symbol(id).map_or(0, |s| s.name_span.pos));
        declared
    }

    pub fn analyze_region(&self, region: Span) -> RegionFlow {
        let arena = self.arena();
        let count = self.tree.symbols().len();
        let mut read_inside = FixedBitSet::with_capacity(count);
        let mut written_inside = FixedBitSet::with_capacity(count);
        let mut read_outside = FixedBitSet::with_capacity(count);
        let mut written_outside = FixedBitSet::with_capacity(count);
        let mut always_assigned = FixedBitSet::with_capacity(count);

        for event in self.flow_events() {
            let index = event.symbol.0 as usize;
            let inside = region.contains(event.offset);
            let reads = matches!(event.access, Access::Read | Access::ReadWrite);
            let writes = matches!(event.access, Access::Write | Access::ReadWrite);
            if inside {
                if reads {
                    read_inside.insert(index);
                }
                if writes {
                    written_inside.insert(index);
                    if is_unconditional(arena, event.node, region) {
                        always_assigned.insert(index);
                    }
                }
            } else {
                if reads {
                    read_outside.insert(index);
                }
                if writes {
                    written_outside.insert(index);
                }
            }
        }

        let ones = |set: &FixedBitSet| -> Vec<SymbolId> {
            set.ones().map(|i| SymbolId(i as u32)).collect()
        };
        let mut variables_declared = self.declared_in_region(region);
        variables_declared.retain(|&id| {
            self.symbol(id)
                .is_some_and(|s| s.kind != SymbolKind::LocalFunction)
        });
        RegionFlow {
            variables_declared,
            always_assigned: ones(&always_assigned),
            read_inside: ones(&read_inside),
            written_inside: ones(&written_inside),
            read_outside: ones(&read_outside),
            written_outside: ones(&written_outside),
        }
    }

    fn flow_events(&self) -> Vec<Event> {
        let arena = self.arena();
        let mut events = Vec::new();

        for id in self.tree.symbol_ids() {
            let Some(symbol) = self.symbol(id) else {
                continue;
            };
            if declaration_writes(arena, symbol.kind, symbol.declaration) {
                let node = match symbol.kind {
                    SymbolKind::PatternVariable => symbol.declaration,
                    _ => symbol.name_node,
                };
                events.push(Event {
                    symbol: id,
                    node,
                    offset: symbol.name_span.pos,
                    access: Access::Write,
                });
            }
        }

        for (node, resolution) in self.bound_references() {
            let Resolution::Resolved(symbol) = resolution else {
                continue;
            };
            events.push(Event {
                symbol,
                node,
                offset: arena.span(node).pos,
                access: reference_access(arena, node),
            });
        }
        events
    }
}

/// Whether declaring a symbol of `kind` at `declaration` assigns it.
fn declaration_writes(arena: &NodeArena, kind: SymbolKind, declaration: NodeIndex) -> bool {
    match kind {
        SymbolKind::ExpressionVariable
        | SymbolKind::PatternVariable
        | SymbolKind::Parameter
        | SymbolKind::CatchVariable
        | SymbolKind::IterationVariable
        | SymbolKind::RangeVariable => true,
        SymbolKind::Local | SymbolKind::Constant => arena
            .get_declarator(declaration)
            .is_some_and(|d| d.initializer.is_some()),
        SymbolKind::LocalFunction | SymbolKind::Member => false,
    }
}

fn reference_access(arena: &NodeArena, node: NodeIndex) -> Access {
    let parent = arena.parent(node);
    match arena.get(parent).map(|n| &n.data) {
        Some(NodeData::Assignment(assign)) if assign.target == node => Access::Write,
        Some(NodeData::Argument(arg)) => match arg.ref_kind {
            RefKind::Out => Access::Write,
            RefKind::Ref => Access::ReadWrite,
            RefKind::None | RefKind::In => Access::Read,
        },
        _ => Access::Read,
    }
}

/// Whether a write at `node` happens on every path through `region`.
fn is_unconditional(arena: &NodeArena, node: NodeIndex, region: Span) -> bool {
    if arena.kind(node) == Some(SyntaxKind::DeclarationPattern) {
        return false;
    }
    let mut child = node;
    let mut current = arena.parent(node);
    let mut iterations = 0;
    while current.is_some() && region.contains_span(arena.span(current)) {
        iterations += 1;
        if iterations > MAX_TREE_WALK_ITERATIONS || is_conditional_edge(arena, current, child) {
            return false;
        }
        child = current;
        current = arena.parent(current);
    }
    true
}

/// Whether `child` runs only on some executions of `parent`.
fn is_conditional_edge(arena: &NodeArena, parent: NodeIndex, child: NodeIndex) -> bool {
    let Some(node) = arena.get(parent) else {
        return false;
    };
    match &node.data {
        NodeData::Binary(binary) => binary.operator.is_short_circuit() && binary.right == child,
        NodeData::Conditional(cond) => cond.when_true == child || cond.when_false == child,
        NodeData::If(stmt) => stmt.then_statement == child || stmt.else_statement == child,
        NodeData::Loop(stmt) => match node.kind {
            SyntaxKind::DoStatement => false,
            _ => stmt.body == child || stmt.incrementors.contains(&child),
        },
        NodeData::ForEach(stmt) => stmt.body == child,
        NodeData::Lambda(_) => true,
        NodeData::Function(_) => node.kind == SyntaxKind::LocalFunctionStatement,
        NodeData::Catch(_) | NodeData::SwitchSection(_) => true,
        NodeData::Try(stmt) => stmt.catches.contains(&child),
        NodeData::Switch(stmt) => stmt.sections.contains(&child),
        NodeData::CaseLabel(label) => label.guard == child,
        NodeData::Query(query) => query.from_clause != child,
        _ => false,
    }
}
