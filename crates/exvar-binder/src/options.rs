//! Binder options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language version the unit is bound under.
///
/// Versions are ordered, so feature gates compare with `>=`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LanguageVersion {
    #[serde(rename = "7")]
    V7,
    #[serde(rename = "7.3")]
    V7_3,
    #[serde(rename = "8")]
    V8,
    #[default]
    #[serde(rename = "latest")]
    Latest,
}

impl LanguageVersion {
    /// Expression variables in field, property and constant initializers,
    /// constructor initializers, attribute arguments, parameter defaults and
    /// query clauses.
    pub fn allows_expression_variables_in_initializers(self) -> bool {
        self >= LanguageVersion::V7_3
    }

    /// Locals and parameters of lambdas and local functions may reuse names
    /// declared in enclosing scopes.
    pub fn allows_nested_function_shadowing(self) -> bool {
        self >= LanguageVersion::V8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageVersion::V7 => "7",
            LanguageVersion::V7_3 => "7.3",
            LanguageVersion::V8 => "8",
            LanguageVersion::Latest => "latest",
        }
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BinderOptions {
    pub language_version: LanguageVersion,
}

impl BinderOptions {
    pub fn new(language_version: LanguageVersion) -> Self {
        BinderOptions { language_version }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
