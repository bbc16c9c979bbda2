//! Binder for expression variables.
//!
//! Expression variables are locals declared inside expressions: `out var x`
//! arguments and `T x` declaration patterns. Their scope depends on the
//! construct that contains them, so binding is split into:
//!
//! - `collector` - enumerates declaration sites and ordinary declarations
//! - `classifier` - maps any node to the anchor of the scope that captures it
//! - `scope_tree` - scope arena, symbol arena and the two-phase builder
//! - `state` - `bind_unit`, the pass driver producing a `SemanticModel`
//! - `lookup` - `SemanticModel` queries (resolution, names at a position)
//! - `flow` - region interface consumed by data-flow analysis
//! - `types` - the `TypeOracle` seam and the `SignatureTable` oracle
//! - `options` - `BinderOptions` and language versions
//! - `diagnostics` - binding diagnostics
//! - `parallel` - binding many units at once

pub mod classifier;
pub mod collector;
pub mod diagnostics;
pub mod flow;
pub mod lookup;
pub mod options;
pub mod parallel;
pub mod scope_tree;
pub mod state;
pub mod types;

pub use classifier::{
    Anchor, FunctionKind, InitializerKind, LoopKind, QueryClauseKind, ScopeKind, classify,
};
pub use collector::{
    DeclarationCollector, DeclarationSite, DeclaredType, OrdinaryDeclaration, SiteKind,
};
pub use diagnostics::{BindDiagnostic, DiagnosticKind};
pub use flow::RegionFlow;
pub use lookup::{ModelSnapshot, Resolution, ScopeSnapshot, SemanticModel};
pub use options::{BinderOptions, LanguageVersion};
pub use parallel::{BindStats, bind_units, bind_units_with_stats};
pub use scope_tree::{
    LocalSymbol, ScopeId, ScopeNode, ScopeTree, ScopeTreeBuilder, SymbolId, SymbolKind,
    SymbolState, SymbolType,
};
pub use state::bind_unit;
pub use types::{
    CallSite, NoTypeInfo, ParameterSignature, Signature, SignatureTable, TypeOracle, TypeRef,
};
