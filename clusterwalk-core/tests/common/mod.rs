use clusterwalk_core::{ErdosParams, Graph, assign_information};
use clusterwalk_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;
use rand::{SeedableRng, rngs::SmallRng};

#[must_use]
pub fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Erdos graph with `share` of its clusters informed.
#[must_use]
pub fn informed_graph(clusters: usize, trials: usize, share: f64, seed: u64) -> Graph {
    let mut graph = ErdosParams::new(clusters, 4.0, 2, 1)
        .expect("valid params")
        .with_trials(trials)
        .with_rng_seed(seed)
        .generate()
        .expect("generates")
        .graph;
    assign_information(&mut graph, share, &mut SmallRng::seed_from_u64(seed)).expect("valid share");
    graph
}
