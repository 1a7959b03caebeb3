//! Clustered random graphs and information-foraging walks.
//!
//! Graphs are generated either as Erdos clusters repaired into one connected
//! component ([`g_make`], [`ErdosParams`]) or as a community partition with
//! Bernoulli edges ([`community_graph`], [`CommunityParams`]). The
//! information model places one-shot values on a share of the clusters, and
//! the walks ([`RandomWalk`], [`AdaptiveRandomSearch`], [`PageRankWalk`])
//! forage one trial slot each. [`TrialRunner`] runs every slot of a graph in
//! parallel with reproducible seeds.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod dsu;
mod error;
mod generator;
mod graph;
mod information;
mod trials;
mod walk;

#[cfg(test)]
mod test_utils;

pub use crate::{
    dsu::DisjointSet,
    error::{
        ClusterWalkError, ClusterWalkErrorCode, GeneratorError, GeneratorErrorCode,
        InformationError, InformationErrorCode, Result, WalkError, WalkErrorCode,
    },
    generator::{
        ClusteredGraph, CommunityParams, CommunityShape, DEFAULT_RNG_SEED, DEFAULT_TRIALS,
        EdgeInsertion, ErdosParams, GenerationStats, INTER_CLUSTER_EDGE_PROB,
        INTRA_CLUSTER_EDGE_PROB, MAX_AVERAGE_CLUSTER_SIZE, MAX_REJECTIONS, MIN_CLUSTER_SIZE,
        community_graph,
        community_topology, create_subgroups, erdos_make, g_clst_edge, g_fix, g_join, g_make,
    },
    graph::{ClusterRange, ClusterRanges, Colour, Graph, Node, NodeId, TopologyViolation},
    information::{
        InformedClusters, add_information, assign_clusters, assign_information,
        clusters_for_percentage, total_information,
    },
    trials::{TrialRunner, trial_seed},
    walk::{
        AdaptiveRandomSearch, PAGERANK_TELEPORT_PROBABILITY, PageRankWalk, RandomWalk,
        START_NODE, Starvation, Step, Trace, Walker,
    },
};
