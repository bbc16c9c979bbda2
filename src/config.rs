//! Options files.
//!
//! An options file is a JSON object:
//!
//! ```json
//! {
//!   "extends": "../base.json",
//!   "languageVersion": "7.3",
//!   "signatures": {
//!     "TryParse": [
//!       { "parameters": [{ "type": "string" }, { "type": "int", "refKind": "Out" }] }
//!     ]
//!   }
//! }
//! ```
//!
//! `extends` names another options file, relative to the extending one.
//! Values in the extending file win; signature lists are merged per callee.

use anyhow::{Context, Result, anyhow, bail};
use exvar_binder::{BinderOptions, LanguageVersion, Signature, SignatureTable};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExvarConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub language_version: Option<LanguageVersion>,
    /// Overload lists keyed by callee name.
    #[serde(default)]
    pub signatures: Option<HashMap<String, Vec<Signature>>>,
}

/// Options and type oracle ready to hand to the binder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub options: BinderOptions,
    pub signatures: SignatureTable,
}

impl ExvarConfig {
    pub fn resolve(&self) -> ResolvedConfig {
        let mut signatures = SignatureTable::new();
        if let Some(methods) = &self.signatures {
            let mut callees: Vec<&String> = methods.keys().collect();
            callees.sort();
            for callee in callees {
                for signature in &methods[callee] {
                    signatures.add(callee, signature.clone());
                }
            }
        }
        ResolvedConfig {
            options: BinderOptions::new(self.language_version.unwrap_or_default()),
            signatures,
        }
    }
}

pub fn parse_config(source: &str) -> Result<ExvarConfig> {
    let config = serde_json::from_str(source).context("failed to parse exvar options JSON")?;
    Ok(config)
}

/// Loads an options file, following its `extends` chain.
pub fn load_config(path: &Path) -> Result<ExvarConfig> {
    let mut visited = HashSet::new();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<ExvarConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("options extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse options file: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        debug!(base = %base_path.display(), "loading base options");
        let base = load_config_inner(&base_path, visited)?;
        config = merge_configs(base, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("options file has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }
    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

fn merge_configs(base: ExvarConfig, child: ExvarConfig) -> ExvarConfig {
    let signatures = match (base.signatures, child.signatures) {
        (Some(mut base_methods), Some(child_methods)) => {
            base_methods.extend(child_methods);
            Some(base_methods)
        }
        (base_methods, child_methods) => child_methods.or(base_methods),
    };
    ExvarConfig {
        extends: None,
        language_version: child.language_version.or(base.language_version),
        signatures,
    }
}

/// Loads and resolves an options file.
pub fn load_resolved(path: &Path) -> Result<ResolvedConfig> {
    Ok(load_config(path)?.resolve())
}

/// Binder options from an options file. Signatures are ignored.
pub fn load_options(path: &Path) -> Result<BinderOptions> {
    Ok(load_config(path)?.resolve().options)
}
