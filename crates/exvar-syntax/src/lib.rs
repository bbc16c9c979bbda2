//! Syntax tree for the exvar binder.
//!
//! The binder does not parse source text; it consumes a tree stored in a
//! [`NodeArena`]. Every node has a kind, a span, a parent link and
//! kind-specific data whose child indices are listed in source order by
//! [`NodeArena::children`].
//!
//! - `base` - `NodeIndex` and `NodeList`
//! - `kind` - `SyntaxKind` and kind predicates
//! - `node` - `Node`, `NodeData` and per-kind data records
//! - `arena` - `NodeArena` storage, navigation and typed accessors
//! - `builder` - `TreeBuilder` for constructing trees programmatically

pub mod arena;
pub mod base;
pub mod builder;
pub mod kind;
pub mod node;

pub use arena::NodeArena;
pub use base::{NodeIndex, NodeList};
pub use builder::TreeBuilder;
pub use kind::SyntaxKind;
pub use node::*;
