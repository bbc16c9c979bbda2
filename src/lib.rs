//! exvar: scope binding for C# expression variables.
//!
//! Expression variables are locals introduced inside expressions, either as
//! `out var x` arguments or as `T x` declaration patterns. This crate ties
//! the workspace together: it re-exports the syntax arena and the binder,
//! loads options files and configures tracing output.
//!
//! ```
//! use exvar::{BinderOptions, SignatureTable, TreeBuilder, bind_unit};
//! use exvar::syntax::RefKind;
//!
//! // class C { void M() { F(out var x); G(x); } }
//! let mut b = TreeBuilder::new();
//! let out_x = b.out_var("x");
//! let call_f = b.call("F", vec![out_x]);
//! let first = b.stmt(call_f);
//! let x = b.ident("x");
//! let call_g = b.call("G", vec![x]);
//! let second = b.stmt(call_g);
//! let body = b.block(vec![first, second]);
//! let method = b.method("M", vec![], body);
//! let class = b.class("C", vec![method]);
//! let unit = b.unit(vec![class]);
//! let arena = b.finish(unit);
//!
//! let oracle = SignatureTable::new().with_method("F", &[("int", RefKind::Out)]);
//! let model = bind_unit(&arena, &oracle, &BinderOptions::default());
//! assert!(model.diagnostics().is_empty());
//! assert!(model.resolve_identifier(x).symbol().is_some());
//! ```

// Spans, walk limits and diagnostic records
pub use exvar_common as common;
pub use exvar_common::{Diagnostic, DiagnosticCategory, Span};

// Syntax tree consumed by the binder
pub use exvar_syntax as syntax;
pub use exvar_syntax::{NodeArena, NodeIndex, SyntaxKind, TreeBuilder};

// Scope classification, binding and lookup
pub use exvar_binder as binder;
pub use exvar_binder::{
    BindDiagnostic, BindStats, BinderOptions, DiagnosticKind, LanguageVersion, NoTypeInfo,
    RegionFlow, Resolution, ScopeKind, SemanticModel, SignatureTable, SymbolId, SymbolKind,
    TypeOracle, TypeRef, bind_unit, bind_units, bind_units_with_stats,
};

// Options files
pub mod config;
pub use config::{ExvarConfig, ResolvedConfig, load_config, load_options};

// Tracing subscriber setup
pub mod tracing_config;
