//! Step-loop tests shared by every walker.

use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};

use super::*;

/// Three uninformed nodes in cluster 0 linked to two informed nodes in
/// cluster 1, with two trial slots.
#[fixture]
fn two_clusters() -> Graph {
    let mut graph = Graph::new(2, 2);
    for cluster in [0, 0, 0, 1, 1] {
        graph.add_node(cluster);
    }
    for (left, right) in [(0, 1), (1, 2), (0, 2), (2, 3), (3, 4)] {
        graph.add_edge(left, right);
    }
    graph.set_information(3, 0.4);
    graph.set_information(4, 0.6);
    graph
}

fn slot(graph: &Graph, test_index: usize) -> Vec<f64> {
    graph
        .nodes()
        .iter()
        .map(|node| node.information()[test_index])
        .collect()
}

/// Replays `trace` against the slot values before the walk.
fn assert_consumed_once(before: &[f64], after: &[f64], trace: &Trace) {
    let mut remaining = before.to_vec();
    let mut collected = 0.0;
    for (&node, &value) in trace.path().iter().zip(trace.values()) {
        collected += std::mem::take(&mut remaining[node]);
        assert!((collected - value).abs() < 1e-12);
        assert_eq!(after[node], 0.0, "visited node {node} kept its value");
    }
    assert_eq!(remaining, after);
}

#[rstest]
fn random_walk_consumes_each_informed_node_once(two_clusters: Graph) {
    let total = two_clusters.total_information();
    assert!((total - 1.0).abs() < 1e-12);
    for seed in 0..32 {
        let mut graph = two_clusters.clone();
        let before = slot(&graph, 0);
        let trace = RandomWalk
            .walk(&mut graph, 0, 10, &mut SmallRng::seed_from_u64(seed))
            .expect("valid walk");
        assert_eq!(trace.len(), 10);
        assert!(trace.is_non_decreasing());
        assert!(trace.final_value() <= total + 1e-12);
        assert_eq!(trace.teleports(), 0);
        assert_consumed_once(&before, &slot(&graph, 0), &trace);
        assert_eq!(slot(&graph, 1), slot(&two_clusters, 1));
    }
}

#[rstest]
fn pagerank_walk_respects_the_total(two_clusters: Graph) {
    let total = two_clusters.total_information();
    for seed in 0..32 {
        let mut graph = two_clusters.clone();
        let before = slot(&graph, 1);
        let trace = PageRankWalk::default()
            .walk(&mut graph, 1, 10, &mut SmallRng::seed_from_u64(seed))
            .expect("valid walk");
        assert!(trace.is_non_decreasing());
        assert!(trace.final_value() <= total + 1e-12);
        assert_consumed_once(&before, &slot(&graph, 1), &trace);
        for window in trace.path().windows(2) {
            assert_ne!(window[0], window[1]);
        }
    }
}

#[rstest]
fn ars_with_tau_equal_to_steps_never_teleports(two_clusters: Graph) {
    for seed in 0..32 {
        let mut graph = two_clusters.clone();
        let trace = AdaptiveRandomSearch::new(10)
            .walk(&mut graph, 0, 10, &mut SmallRng::seed_from_u64(seed))
            .expect("valid walk");
        assert_eq!(trace.teleports(), 0);
        let mut previous = START_NODE;
        for &node in trace.path() {
            assert!(graph.has_edge(previous, node));
            previous = node;
        }
    }
}

#[test]
fn ars_with_unit_tau_teleports_after_every_empty_step() {
    let mut graph = Graph::new(1, 1);
    for _ in 0..6 {
        graph.add_node(0);
    }
    for node in 1..6 {
        graph.add_edge(node - 1, node);
    }
    let trace = AdaptiveRandomSearch::new(1)
        .walk(&mut graph, 0, 8, &mut SmallRng::seed_from_u64(1))
        .expect("valid walk");
    assert_eq!(trace.teleports(), 7);
    assert_eq!(trace.final_value(), 0.0);
}

#[rstest]
fn invalid_walks_leave_the_graph_untouched(two_clusters: Graph) {
    let mut graph = two_clusters.clone();
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(
        AdaptiveRandomSearch::new(11).walk(&mut graph, 0, 10, &mut rng),
        Err(WalkError::TauExceedsSteps { tau: 11, steps: 10 })
    );
    assert_eq!(
        RandomWalk.walk(&mut graph, 2, 10, &mut rng),
        Err(WalkError::TrialOutOfRange {
            test_index: 2,
            n_tests: 2
        })
    );
    assert_eq!(graph, two_clusters);
    assert_eq!(
        RandomWalk.walk(&mut Graph::new(0, 1), 0, 3, &mut rng),
        Err(WalkError::EmptyGraph)
    );
}

#[rstest]
fn zero_steps_yield_an_empty_trace(mut two_clusters: Graph) {
    let trace = RandomWalk
        .walk(&mut two_clusters, 0, 0, &mut SmallRng::seed_from_u64(0))
        .expect("valid walk");
    assert!(trace.is_empty());
    assert_eq!(trace.final_value(), 0.0);
}

#[rstest]
fn seeded_walks_are_reproducible(two_clusters: Graph) {
    let run = || {
        let mut graph = two_clusters.clone();
        PageRankWalk::default()
            .walk(&mut graph, 0, 25, &mut SmallRng::seed_from_u64(77))
            .expect("valid walk")
    };
    assert_eq!(run(), run());
}
