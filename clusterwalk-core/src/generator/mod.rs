//! Clustered graph generators.
//!
//! Two variants are provided: an Erdos variant ([`g_make`]) that repairs
//! every cluster and the cluster-level structure into one connected
//! component, and a community-partition variant ([`community_graph`]) that
//! draws Bernoulli edges and accepts disconnection. [`ErdosParams`] and
//! [`CommunityParams`] wrap both behind validated, seeded configuration.

mod community;
mod erdos;
mod params;

pub use self::{
    community::{
        CommunityShape, INTER_CLUSTER_EDGE_PROB, INTRA_CLUSTER_EDGE_PROB, community_graph,
        community_topology, create_subgroups,
    },
    erdos::{
        ClusteredGraph, EdgeInsertion, GenerationStats, MAX_AVERAGE_CLUSTER_SIZE, MAX_REJECTIONS,
        MIN_CLUSTER_SIZE, erdos_make, g_clst_edge, g_fix, g_join, g_make,
    },
    params::{CommunityParams, DEFAULT_RNG_SEED, DEFAULT_TRIALS, ErdosParams},
};
