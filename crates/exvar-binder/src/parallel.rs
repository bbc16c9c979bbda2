//! Binding many compilation units at once.
//!
//! Units share nothing mutable, so each one is bound on its own rayon task.
//! Results come back in input order.

use crate::lookup::SemanticModel;
use crate::options::BinderOptions;
use crate::state::bind_unit;
use crate::types::TypeOracle;
use exvar_syntax::NodeArena;
use rayon::prelude::*;
use tracing::debug;

/// Aggregate counts over a batch of bound units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindStats {
    pub unit_count: usize,
    pub total_nodes: usize,
    pub total_scopes: usize,
    pub total_symbols: usize,
    pub diagnostic_count: usize,
}

pub fn bind_units<'a, O>(
    arenas: &'a [NodeArena],
    oracle: &O,
    options: &BinderOptions,
) -> Vec<SemanticModel<'a>>
where
    O: TypeOracle + Sync + ?Sized,
{
    let models: Vec<SemanticModel<'a>> = arenas
        .par_iter()
        .map(|arena| bind_unit(arena, oracle, options))
        .collect();
    debug!(units = models.len(), "bound units in parallel");
    models
}

pub fn bind_units_with_stats<'a, O>(
    arenas: &'a [NodeArena],
    oracle: &O,
    options: &BinderOptions,
) -> (Vec<SemanticModel<'a>>, BindStats)
where
    O: TypeOracle + Sync + ?Sized,
{
    let models = bind_units(arenas, oracle, options);
    let stats = models.iter().fold(
        BindStats {
            unit_count: models.len(),
            ..BindStats::default()
        },
        |mut stats, model| {
            stats.total_nodes += model.arena().len();
            stats.total_scopes += model.scope_tree().scopes().len();
            stats.total_symbols += model.scope_tree().symbols().len();
            stats.diagnostic_count += model.diagnostics().len();
            stats
        },
    );
    (models, stats)
}
