//! Common types and utilities for the exvar binder.
//!
//! This crate provides foundational types used across all exvar crates:
//! - Source spans (`Span`)
//! - Centralized walk limits
//! - Diagnostic records and message templates

// Span - Source location tracking (offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;

// Diagnostic records shared by every pass
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};
