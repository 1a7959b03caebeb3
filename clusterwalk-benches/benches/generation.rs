//! Clustered graph generation benchmarks.
//!
//! Measures the Erdos generator end to end (cluster builds, repair and
//! inter-cluster threading) and the community-partition generator with its
//! quadratic intra-cluster and multi-round inter-cluster passes.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use clusterwalk_benches::{
    error::BenchSetupError,
    fixtures::{INTER_DEGREE, INTRA_DEGREE},
    params::GenerationBenchParams,
};
use clusterwalk_core::{
    CommunityShape, INTER_CLUSTER_EDGE_PROB, INTRA_CLUSTER_EDGE_PROB, community_topology, g_make,
};

/// Seed used for every generator run.
const SEED: u64 = 42;

/// Cluster counts to benchmark.
const CLUSTER_COUNTS: &[usize] = &[8, 32, 128];

/// Mean (Erdos) or exact (community) cluster size.
const CLUSTER_SIZE: usize = 16;

fn erdos_generation_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("g_make");
    for &clusters in CLUSTER_COUNTS {
        // Validate once so the timed loop only measures generation.
        g_make(
            &mut SmallRng::seed_from_u64(SEED),
            clusters,
            CLUSTER_SIZE as f64,
            INTRA_DEGREE,
            INTER_DEGREE,
            1,
        )?;
        let params = GenerationBenchParams {
            clusters,
            cluster_size: CLUSTER_SIZE,
        };
        group.bench_with_input(BenchmarkId::from_parameter(params), &clusters, |b, &cno| {
            b.iter(|| {
                let mut rng = SmallRng::seed_from_u64(SEED);
                g_make(&mut rng, cno, CLUSTER_SIZE as f64, INTRA_DEGREE, INTER_DEGREE, 1)
            });
        });
    }
    group.finish();
    Ok(())
}

fn community_generation_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("community_topology");
    group.sample_size(20);
    for &clusters in CLUSTER_COUNTS {
        let shape = CommunityShape {
            n_clusters: clusters,
            n_nodes: clusters * CLUSTER_SIZE,
            n_tests: 1,
            p_intra: INTRA_CLUSTER_EDGE_PROB,
            p_inter: INTER_CLUSTER_EDGE_PROB,
        };
        community_topology(&mut SmallRng::seed_from_u64(SEED), shape)?;
        let params = GenerationBenchParams {
            clusters,
            cluster_size: CLUSTER_SIZE,
        };
        group.bench_with_input(BenchmarkId::from_parameter(params), &shape, |b, &shape| {
            b.iter(|| community_topology(&mut SmallRng::seed_from_u64(SEED), shape));
        });
    }
    group.finish();
    Ok(())
}

fn erdos_generation(c: &mut Criterion) {
    if let Err(err) = erdos_generation_impl(c) {
        panic!("g_make benchmark setup failed: {err}");
    }
}

fn community_generation(c: &mut Criterion) {
    if let Err(err) = community_generation_impl(c) {
        panic!("community benchmark setup failed: {err}");
    }
}

criterion_group!(benches, erdos_generation, community_generation);
criterion_main!(benches);
