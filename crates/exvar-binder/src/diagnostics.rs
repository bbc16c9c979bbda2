//! Binding diagnostics.
//!
//! Binding never fails. Every problem becomes a [`BindDiagnostic`] and the
//! affected declaration still gets a symbol.

use crate::scope_tree::SymbolId;
use exvar_common::Span;
use exvar_common::diagnostics::{
    Diagnostic, diagnostic_codes, format_message, get_message_template,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiagnosticKind {
    /// Second declaration of a name in the same scope node.
    DuplicateInScope,
    /// Name already declared in an enclosing scope of the same member.
    IllegalOverride,
    /// Reference precedes the declaration it binds to.
    UsedBeforeDeclared,
    NotInScope,
    /// An implicitly typed `out var` whose type is not determined.
    TypeInferenceFailed,
    /// Declaration inside an initializer that must be a compile-time constant.
    InvalidInConstantContext,
    /// Range variable reusing the name of an enclosing local.
    RangeVariableShadow,
    /// Declaration in a context the selected language version rejects.
    FeatureUnavailable,
}

impl DiagnosticKind {
    pub const fn code(self) -> u32 {
        match self {
            DiagnosticKind::DuplicateInScope => diagnostic_codes::DUPLICATE_IN_SCOPE,
            DiagnosticKind::IllegalOverride => diagnostic_codes::ILLEGAL_OVERRIDE,
            DiagnosticKind::UsedBeforeDeclared => diagnostic_codes::USED_BEFORE_DECLARED,
            DiagnosticKind::NotInScope => diagnostic_codes::NOT_IN_SCOPE,
            DiagnosticKind::TypeInferenceFailed => diagnostic_codes::TYPE_INFERENCE_FAILED,
            DiagnosticKind::InvalidInConstantContext => {
                diagnostic_codes::INVALID_IN_CONSTANT_CONTEXT
            }
            DiagnosticKind::RangeVariableShadow => diagnostic_codes::RANGE_VARIABLE_SHADOW,
            DiagnosticKind::FeatureUnavailable => diagnostic_codes::FEATURE_UNAVAILABLE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BindDiagnostic {
    pub kind: DiagnosticKind,
    /// Span of the offending name (declaration or reference).
    pub span: Span,
    pub name: String,
    /// The declared symbol, or for `UsedBeforeDeclared` the later symbol.
    pub symbol: Option<SymbolId>,
    /// Span of the conflicting earlier declaration, if any.
    pub related: Option<Span>,
    /// Further message arguments after the name.
    pub args: Vec<String>,
}

impl BindDiagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, name: impl Into<String>) -> Self {
        BindDiagnostic {
            kind,
            span,
            name: name.into(),
            symbol: None,
            related: None,
            args: Vec::new(),
        }
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_related(mut self, related: Span) -> Self {
        self.related = Some(related);
        self
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }

    pub fn message(&self) -> String {
        let Some(template) = get_message_template(self.code()) else {
            return self.name.clone();
        };
        let mut args: Vec<&str> = Vec::with_capacity(1 + self.args.len());
        args.push(&self.name);
        args.extend(self.args.iter().map(String::as_str));
        format_message(template, &args)
    }

    /// Shared diagnostic record for reporting against `file`.
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let diagnostic = Diagnostic::error(
            file,
            self.span.pos,
            self.span.len(),
            self.message(),
            self.code(),
        );
        match self.related {
            Some(related) => diagnostic.with_related(
                file,
                related.pos,
                related.len(),
                format!("'{}' is declared here.", self.name),
            ),
            None => diagnostic,
        }
    }
}
