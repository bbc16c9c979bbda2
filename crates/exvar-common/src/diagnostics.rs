use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const DUPLICATE_IN_SCOPE: u32 = 7001;
    pub const ILLEGAL_OVERRIDE: u32 = 7002;
    pub const USED_BEFORE_DECLARED: u32 = 7003;
    pub const NOT_IN_SCOPE: u32 = 7004;
    pub const TYPE_INFERENCE_FAILED: u32 = 7005;
    pub const INVALID_IN_CONSTANT_CONTEXT: u32 = 7006;
    pub const RANGE_VARIABLE_SHADOW: u32 = 7007;
    pub const FEATURE_UNAVAILABLE: u32 = 7008;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_IN_SCOPE,
        category: DiagnosticCategory::Error,
        message: "A local variable named '{0}' is already defined in this scope.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::ILLEGAL_OVERRIDE,
        category: DiagnosticCategory::Error,
        message: "A local or parameter named '{0}' cannot be declared in this scope because that name is used in an enclosing local scope.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::USED_BEFORE_DECLARED,
        category: DiagnosticCategory::Error,
        message: "Cannot use local variable '{0}' before it is declared.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::NOT_IN_SCOPE,
        category: DiagnosticCategory::Error,
        message: "The name '{0}' does not exist in the current context.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_INFERENCE_FAILED,
        category: DiagnosticCategory::Error,
        message: "Cannot infer the type of implicitly-typed out variable '{0}'.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_IN_CONSTANT_CONTEXT,
        category: DiagnosticCategory::Error,
        message: "The initializer declaring '{0}' must be a compile-time constant.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::RANGE_VARIABLE_SHADOW,
        category: DiagnosticCategory::Error,
        message: "The range variable '{0}' conflicts with a previous declaration of '{0}'.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::FEATURE_UNAVAILABLE,
        category: DiagnosticCategory::Error,
        message: "Declaring '{0}' in {1} is not available in language version {2}.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
            related_information: Vec::new(),
        }
    }

    pub fn with_related(
        mut self,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            category: DiagnosticCategory::Message,
            code: 0,
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        });
        self
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
