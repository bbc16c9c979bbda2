//! Types of expression variables.
//!
//! The binder does not type-check expressions. The type of an implicitly
//! typed `out var` comes from a [`TypeOracle`], which answers what type the
//! chosen overload requires for a by-reference argument position.

use exvar_syntax::{RefKind, SyntaxKind};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a type, identified by its display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        TypeRef(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A by-reference argument position whose type is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallSite<'a> {
    /// Method name, created type name, attribute name, or `this` / `base`
    /// for constructor initializers.
    pub callee: &'a str,
    /// Kind of the node owning the argument list.
    pub owner: SyntaxKind,
    pub arity: usize,
    /// Zero-based argument position.
    pub index: usize,
    pub ref_kind: RefKind,
}

/// Type service consumed by the binder.
pub trait TypeOracle {
    /// Type the selected overload requires at `call.index`, or `None` when
    /// no single type is determined.
    fn out_argument_type(&self, call: &CallSite<'_>) -> Option<TypeRef>;
}

impl<T: TypeOracle + ?Sized> TypeOracle for &T {
    fn out_argument_type(&self, call: &CallSite<'_>) -> Option<TypeRef> {
        (**self).out_argument_type(call)
    }
}

/// Oracle that never determines a type.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTypeInfo;

impl TypeOracle for NoTypeInfo {
    fn out_argument_type(&self, _call: &CallSite<'_>) -> Option<TypeRef> {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSignature {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub ref_kind: RefKind,
    #[serde(default)]
    pub optional: bool,
}

impl ParameterSignature {
    pub fn new(ty: &str, ref_kind: RefKind) -> Self {
        ParameterSignature {
            ty: TypeRef::new(ty),
            ref_kind,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub parameters: Vec<ParameterSignature>,
}

impl Signature {
    fn accepts_arity(&self, arity: usize) -> bool {
        let required = self.parameters.iter().filter(|p| !p.optional).count();
        arity >= required && arity <= self.parameters.len()
    }
}

/// Overload lists keyed by callee name.
///
/// A position gets a type only when every arity-compatible overload takes a
/// parameter of the requested passing mode there and all of them agree on
/// its type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureTable {
    #[serde(default)]
    methods: FxHashMap<String, Vec<Signature>>,
}

impl SignatureTable {
    pub fn new() -> Self {
        SignatureTable::default()
    }

    pub fn add(&mut self, callee: &str, signature: Signature) {
        self.methods
            .entry(callee.to_string())
            .or_default()
            .push(signature);
    }

    /// Builder-style [`SignatureTable::add`] taking `(type, passing mode)` pairs.
    pub fn with_method(mut self, callee: &str, parameters: &[(&str, RefKind)]) -> Self {
        let parameters = parameters
            .iter()
            .map(|&(ty, ref_kind)| ParameterSignature::new(ty, ref_kind))
            .collect();
        self.add(callee, Signature { parameters });
        self
    }

    pub fn overloads(&self, callee: &str) -> &[Signature] {
        self.methods.get(callee).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl TypeOracle for SignatureTable {
    fn out_argument_type(&self, call: &CallSite<'_>) -> Option<TypeRef> {
        let mut agreed: Option<&TypeRef> = None;
        for signature in self.overloads(call.callee) {
            if !signature.accepts_arity(call.arity) {
                continue;
            }
            let parameter = signature.parameters.get(call.index)?;
            if parameter.ref_kind != call.ref_kind {
                return None;
            }
            match agreed {
                None => agreed = Some(&parameter.ty),
                Some(ty) if *ty == parameter.ty => {}
                Some(_) => return None,
            }
        }
        agreed.cloned()
    }
}
