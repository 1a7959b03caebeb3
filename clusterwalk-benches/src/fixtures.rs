//! Seeded graph fixtures shared by the benchmarks.

use clusterwalk_core::{ErdosParams, Graph, assign_information};
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Share of clusters informed in walk fixtures.
pub const INFORMED_SHARE: f64 = 0.3;

/// Average intra-cluster degree of Erdos fixtures.
pub const INTRA_DEGREE: usize = 3;

/// Inter-cluster edges per cluster of Erdos fixtures.
pub const INTER_DEGREE: usize = 1;

/// Builds an Erdos clustered graph with [`INFORMED_SHARE`] of its clusters
/// informed.
///
/// # Errors
/// Returns [`BenchSetupError`] when the configuration is invalid.
pub fn informed_erdos_graph(
    clusters: usize,
    avg_cluster_size: f64,
    trials: usize,
    seed: u64,
) -> Result<Graph, BenchSetupError> {
    let mut graph = ErdosParams::new(clusters, avg_cluster_size, INTRA_DEGREE, INTER_DEGREE)?
        .with_trials(trials)
        .with_rng_seed(seed)
        .generate()?
        .graph;
    assign_information(&mut graph, INFORMED_SHARE, &mut SmallRng::seed_from_u64(seed))?;
    Ok(graph)
}
