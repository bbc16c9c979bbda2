//! Centralized limits for the binder and the syntax tree walkers.
//!
//! Every upward walk (ancestor chains, scope chains) is bounded so that a
//! malformed tree with a parent cycle degrades into a lookup miss instead
//! of a hang.

/// Maximum number of ancestor steps taken while classifying a node.
///
/// The classifier walks parent links from a declaration or reference up to
/// the nearest construct with a scoping rule. Real trees are far shallower;
/// hitting this limit means the parent links are corrupt.
pub const MAX_TREE_WALK_ITERATIONS: u32 = 10_000;

/// Maximum number of scope-chain steps taken during lookup or conflict
/// checks.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Initial capacity hint for per-unit symbol arenas.
pub const SYMBOL_ARENA_INITIAL_CAPACITY: usize = 64;
