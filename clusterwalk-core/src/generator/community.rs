//! Community-partition graph construction.
//!
//! Nodes are split into clusters by a random walk over group sizes, then
//! every intra-cluster pair and every ordered pair of distinct clusters gets
//! independent Bernoulli chances at an edge. No connectivity repair runs, so
//! the result may be disconnected.

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{
    error::{ClusterWalkError, GeneratorError},
    graph::{ClusterRanges, Graph},
    information::{InformedClusters, assign_clusters, assign_information},
};

/// Default probability of an edge between two nodes of the same cluster.
pub const INTRA_CLUSTER_EDGE_PROB: f64 = 0.65;

/// Default probability of an edge per round and ordered cluster pair.
pub const INTER_CLUSTER_EDGE_PROB: f64 = 0.15;

/// Partitions `nodes` into `n_clusters` non-empty, contiguous groups.
///
/// Every group starts with one element; each remaining element goes to a
/// uniformly chosen group. Group sizes are therefore multinomial rather than
/// balanced.
///
/// # Errors
/// Returns [`GeneratorError::NoClusters`] when `n_clusters == 0` and
/// [`GeneratorError::TooFewNodes`] when `nodes` is shorter than
/// `n_clusters`. Both are raised before any random draw.
///
/// # Examples
/// ```
/// use clusterwalk_core::create_subgroups;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let nodes: Vec<usize> = (0..10).collect();
/// let groups = create_subgroups(&mut SmallRng::seed_from_u64(1), &nodes, 3)?;
/// assert_eq!(groups.len(), 3);
/// assert_eq!(groups.concat(), nodes);
/// # Ok::<(), clusterwalk_core::GeneratorError>(())
/// ```
pub fn create_subgroups<T: Clone, R: Rng + ?Sized>(
    rng: &mut R,
    nodes: &[T],
    n_clusters: usize,
) -> Result<Vec<Vec<T>>, GeneratorError> {
    let ranges = subgroup_ranges(rng, nodes.len(), n_clusters)?;
    Ok(ranges
        .iter()
        .map(|range| nodes[range.as_range()].to_vec())
        .collect())
}

fn subgroup_ranges<R: Rng + ?Sized>(
    rng: &mut R,
    n_nodes: usize,
    n_clusters: usize,
) -> Result<ClusterRanges, GeneratorError> {
    if n_clusters == 0 {
        return Err(GeneratorError::NoClusters);
    }
    if n_nodes < n_clusters {
        return Err(GeneratorError::TooFewNodes {
            nodes: n_nodes,
            clusters: n_clusters,
        });
    }
    let mut sizes = vec![1_usize; n_clusters];
    for _ in n_clusters..n_nodes {
        sizes[rng.gen_range(0..n_clusters)] += 1;
    }
    let mut ranges = ClusterRanges::with_capacity(n_clusters);
    for size in sizes {
        ranges.push_cluster(size);
    }
    Ok(ranges)
}

/// Edge probabilities and experiment shape for [`community_graph`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommunityShape {
    /// Number of clusters.
    pub n_clusters: usize,
    /// Number of nodes.
    pub n_nodes: usize,
    /// Trial slots per node.
    pub n_tests: usize,
    /// Probability of each intra-cluster edge.
    pub p_intra: f64,
    /// Probability of an inter-cluster edge per round and ordered pair.
    pub p_inter: f64,
}

impl CommunityShape {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.n_clusters == 0 {
            return Err(GeneratorError::NoClusters);
        }
        if self.n_nodes < self.n_clusters {
            return Err(GeneratorError::TooFewNodes {
                nodes: self.n_nodes,
                clusters: self.n_clusters,
            });
        }
        if self.n_tests == 0 {
            return Err(GeneratorError::NoTrials);
        }
        for (name, got) in [("p_intra", self.p_intra), ("p_inter", self.p_inter)] {
            if !(0.0..=1.0).contains(&got) {
                return Err(GeneratorError::InvalidProbability { name, got });
            }
        }
        Ok(())
    }
}

/// Builds the edges of a community-partition graph without information.
///
/// Intra-cluster edges are drawn once per unordered pair. Inter-cluster edges
/// are drawn over `n_clusters` rounds; every round gives each ordered pair of
/// distinct clusters one chance at an edge between uniformly chosen members,
/// so inter-cluster density grows with the cluster count.
///
/// # Errors
/// Returns a [`GeneratorError`] for an invalid shape, before any random draw.
#[instrument(name = "generator.community_topology", err, skip(rng))]
pub fn community_topology<R: Rng + ?Sized>(
    rng: &mut R,
    shape: CommunityShape,
) -> Result<(Graph, ClusterRanges), GeneratorError> {
    shape.validate()?;
    let ranges = subgroup_ranges(rng, shape.n_nodes, shape.n_clusters)?;

    let mut graph = Graph::new(shape.n_clusters, shape.n_tests);
    for (cluster, range) in ranges.iter().enumerate() {
        for _ in range.as_range() {
            graph.add_node(cluster);
        }
    }

    for range in ranges.iter() {
        for left in range.as_range() {
            for right in (left + 1)..range.end() {
                if rng.gen_bool(shape.p_intra) {
                    graph.add_edge(left, right);
                }
            }
        }
    }

    let members: Vec<Vec<usize>> = ranges.iter().map(|range| range.as_range().collect()).collect();
    for _round in 0..shape.n_clusters {
        for (first, first_members) in members.iter().enumerate() {
            for (second, second_members) in members.iter().enumerate() {
                if first == second || !rng.gen_bool(shape.p_inter) {
                    continue;
                }
                if let (Some(&source), Some(&target)) =
                    (first_members.choose(rng), second_members.choose(rng))
                {
                    graph.add_edge(source, target);
                }
            }
        }
    }

    debug!(
        clusters = shape.n_clusters,
        nodes = graph.len(),
        edges = graph.edge_count(),
        "community graph generated"
    );
    Ok((graph, ranges))
}

/// Builds a community-partition graph and informs a fraction of its clusters.
///
/// When `percentage` is `None`, half of the clusters (rounded down) are
/// informed.
///
/// # Errors
/// Returns [`ClusterWalkError::Generator`] for an invalid shape and
/// [`ClusterWalkError::Information`] for an invalid percentage.
pub fn community_graph<R: Rng + ?Sized>(
    rng: &mut R,
    shape: CommunityShape,
    percentage: Option<f64>,
) -> Result<(Graph, InformedClusters), ClusterWalkError> {
    let (mut graph, _) = community_topology(rng, shape)?;
    let informed = match percentage {
        Some(fraction) => assign_information(&mut graph, fraction, rng)?,
        None => assign_clusters(&mut graph, shape.n_clusters / 2, rng)?,
    };
    Ok((graph, informed))
}
