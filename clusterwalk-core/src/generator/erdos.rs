//! Erdos-style clustered graph construction.
//!
//! Every cluster is an independent Erdos random graph, repaired into a single
//! component, and then appended to the running graph. Clusters are threaded
//! together by random inter-cluster edges and, where the random threading
//! leaves clusters apart, by one bridge per extra cluster component.
//!
//! Edge searches are bounded: after [`MAX_REJECTIONS`] consecutive rejected
//! pairs the search is abandoned and the graph is returned sparser than
//! requested. Abandoned searches are counted in [`GenerationStats`] and logged
//! at `warn`.

use rand::Rng;
use rand_distr::{Distribution, Exp};
use tracing::{debug, instrument, warn};

use crate::{
    dsu::DisjointSet,
    error::GeneratorError,
    graph::{ClusterRange, ClusterRanges, Graph, NodeId},
};

/// Consecutive rejected pairs after which an edge search gives up.
pub const MAX_REJECTIONS: usize = 10_000;

/// Smallest cluster the Erdos generator will build.
pub const MIN_CLUSTER_SIZE: usize = 2;

/// Largest accepted mean of the cluster-size distribution.
pub const MAX_AVERAGE_CLUSTER_SIZE: f64 = 1.0e6;

/// Outcome of a single bounded edge search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeInsertion {
    /// A new undirected edge was inserted.
    Inserted {
        /// First endpoint, drawn from the source range.
        source: NodeId,
        /// Second endpoint, drawn from the target range.
        target: NodeId,
    },
    /// Every one of `rejections` consecutive draws was a self-pair or an
    /// existing edge.
    Abandoned {
        /// Number of rejected draws before giving up.
        rejections: usize,
    },
}

impl EdgeInsertion {
    /// Returns `true` when the search inserted an edge.
    #[must_use]
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Bookkeeping for one generator run.
///
/// `inserted_edges < requested_edges` signals the degraded outcome where a
/// search was abandoned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Random edges the generator tried to place, intra and inter cluster.
    pub requested_edges: usize,
    /// Random edges actually inserted.
    pub inserted_edges: usize,
    /// Searches that hit [`MAX_REJECTIONS`].
    pub abandoned_searches: usize,
    /// Bridges added by node-level connectivity repair.
    pub repair_bridges: usize,
    /// Bridges added between cluster components.
    pub cluster_bridges: usize,
}

impl GenerationStats {
    /// Returns `true` when every requested random edge was placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.abandoned_searches == 0
    }

    fn absorb(&mut self, other: Self) {
        self.requested_edges += other.requested_edges;
        self.inserted_edges += other.inserted_edges;
        self.abandoned_searches += other.abandoned_searches;
        self.repair_bridges += other.repair_bridges;
        self.cluster_bridges += other.cluster_bridges;
    }

    fn record(&mut self, insertion: EdgeInsertion) {
        self.requested_edges += 1;
        match insertion {
            EdgeInsertion::Inserted { .. } => self.inserted_edges += 1,
            EdgeInsertion::Abandoned { .. } => self.abandoned_searches += 1,
        }
    }
}

/// Output of [`g_make`]: the graph, its cluster range table and run stats.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteredGraph {
    /// The generated graph, with un-annotated nodes.
    pub graph: Graph,
    /// Node-id range owned by each cluster.
    pub ranges: ClusterRanges,
    /// Edge bookkeeping for the run.
    pub stats: GenerationStats,
}

/// Draws pairs from `source × target` until one is neither a self-pair nor an
/// existing edge, then inserts it.
///
/// Both ranges must be non-empty and lie inside `graph`.
fn draw_edge<R: Rng + ?Sized>(
    graph: &mut Graph,
    rng: &mut R,
    source: ClusterRange,
    target: ClusterRange,
) -> EdgeInsertion {
    let mut rejections = 0;
    loop {
        let src = rng.gen_range(source.as_range());
        let dst = rng.gen_range(target.as_range());
        if graph.add_edge(src, dst) {
            return EdgeInsertion::Inserted {
                source: src,
                target: dst,
            };
        }
        rejections += 1;
        if rejections >= MAX_REJECTIONS {
            return EdgeInsertion::Abandoned { rejections };
        }
    }
}

fn note_abandoned(rejections: usize, context: &'static str) {
    warn!(rejections, context, "edge search abandoned; graph will be sparser than requested");
    #[cfg(feature = "metrics")]
    metrics::counter!("edge_insertion_give_ups").increment(1);
}

/// Builds an Erdos random graph on `n` nodes of `cluster_id`, targeting
/// `n * m` edges (average degree roughly `m`).
///
/// The first abandoned search stops generation and the partial graph is
/// returned; [`GenerationStats::abandoned_searches`] is then `1`. A single
/// node with `m > 0` can only draw self-pairs, so its one search is reported
/// as abandoned. The result has no trial slots and is not guaranteed to be
/// connected.
///
/// # Examples
/// ```
/// use clusterwalk_core::erdos_make;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let (graph, stats) = erdos_make(&mut rng, 10, 2, 0);
/// assert_eq!(graph.len(), 10);
/// assert_eq!(stats.inserted_edges, graph.edge_count());
/// ```
pub fn erdos_make<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    m: usize,
    cluster_id: usize,
) -> (Graph, GenerationStats) {
    let mut graph = Graph::new(cluster_id + 1, 0);
    for _ in 0..n {
        graph.add_node(cluster_id);
    }
    let mut stats = GenerationStats::default();
    if n < 2 {
        if n * m > 0 {
            let insertion = EdgeInsertion::Abandoned {
                rejections: MAX_REJECTIONS,
            };
            stats.record(insertion);
            note_abandoned(MAX_REJECTIONS, "erdos_make");
        }
        return (graph, stats);
    }

    let all = ClusterRange::new(0, n);
    for _ in 0..n * m {
        let insertion = draw_edge(&mut graph, rng, all, all);
        stats.record(insertion);
        if let EdgeInsertion::Abandoned { rejections } = insertion {
            note_abandoned(rejections, "erdos_make");
            break;
        }
    }
    (graph, stats)
}

/// Concatenates `second` after `first`, shifting every adjacency index of
/// `second` by `first.len()`.
#[must_use]
pub fn g_join(mut first: Graph, second: Graph) -> Graph {
    first.append(second);
    first
}

/// Draws one edge between a random node of cluster `c1` and a random node of
/// cluster `c2`.
///
/// `c1` may equal `c2`, in which case the edge stays inside the cluster. Both
/// clusters must be present in `ranges`; unknown clusters yield an abandoned
/// search with zero rejections.
pub fn g_clst_edge<R: Rng + ?Sized>(
    graph: &mut Graph,
    rng: &mut R,
    ranges: &ClusterRanges,
    c1: usize,
    c2: usize,
) -> EdgeInsertion {
    let (Some(source), Some(target)) = (ranges.get(c1), ranges.get(c2)) else {
        return EdgeInsertion::Abandoned { rejections: 0 };
    };
    if source.is_empty() || target.is_empty() {
        return EdgeInsertion::Abandoned { rejections: 0 };
    }
    let insertion = draw_edge(graph, rng, source, target);
    if let EdgeInsertion::Abandoned { rejections } = insertion {
        note_abandoned(rejections, "g_clst_edge");
    }
    insertion
}

/// Makes `graph` connected by chaining component roots.
///
/// Roots are visited in id order and each root after the first is joined to
/// the root visited just before it, so exactly `components - 1` bridges are
/// added. Returns the number of bridges.
pub fn g_fix(graph: &mut Graph) -> usize {
    let sets = graph.components();
    let roots: Vec<NodeId> = sets.roots().collect();
    let mut bridges = 0;
    for pair in roots.windows(2) {
        if let &[previous, current] = pair
            && graph.add_edge(previous, current)
        {
            bridges += 1;
        }
    }
    if bridges > 0 {
        debug!(bridges, nodes = graph.len(), "repaired disconnected components");
        #[cfg(feature = "metrics")]
        metrics::counter!("connectivity_bridges").increment(bridges as u64);
    }
    bridges
}

pub(crate) fn validate_average_size(avg_cluster_size: f64) -> Result<(), GeneratorError> {
    if avg_cluster_size > 0.0 && avg_cluster_size <= MAX_AVERAGE_CLUSTER_SIZE {
        Ok(())
    } else {
        Err(GeneratorError::InvalidAverageSize {
            got: avg_cluster_size,
        })
    }
}

/// Builds a connected clustered graph of `cno` Erdos clusters.
///
/// Cluster sizes are `2 + floor(X)` with `X` exponentially distributed with
/// mean `avg_cluster_size`. Each cluster is built with [`erdos_make`] at
/// average degree `mc` and repaired with [`g_fix`]. Then `cno * mi` edges are
/// drawn between uniformly chosen cluster pairs while a cluster-level
/// [`DisjointSet`] tracks which clusters those edges joined; remaining
/// cluster components are chained with one bridge each.
///
/// The returned graph carries `n_tests` zeroed trial slots per node.
///
/// # Errors
/// Returns [`GeneratorError::NoClusters`] when `cno == 0`,
/// [`GeneratorError::InvalidAverageSize`] when `avg_cluster_size` lies outside
/// `(0, MAX_AVERAGE_CLUSTER_SIZE]`, and [`GeneratorError::NoTrials`] when
/// `n_tests == 0`. Validation happens before any random draw.
#[instrument(
    name = "generator.g_make",
    err,
    skip(rng),
    fields(nodes = tracing::field::Empty),
)]
pub fn g_make<R: Rng + ?Sized>(
    rng: &mut R,
    cno: usize,
    avg_cluster_size: f64,
    mc: usize,
    mi: usize,
    n_tests: usize,
) -> Result<ClusteredGraph, GeneratorError> {
    if cno == 0 {
        return Err(GeneratorError::NoClusters);
    }
    if n_tests == 0 {
        return Err(GeneratorError::NoTrials);
    }
    validate_average_size(avg_cluster_size)?;
    let sizes = Exp::new(avg_cluster_size.recip()).map_err(|_| GeneratorError::InvalidAverageSize {
        got: avg_cluster_size,
    })?;

    let mut graph = Graph::new(cno, n_tests);
    let mut ranges = ClusterRanges::with_capacity(cno);
    let mut stats = GenerationStats::default();

    for cluster in 0..cno {
        let drawn: f64 = sizes.sample(rng);
        // Float-to-int casts saturate; the sum must too.
        let size = MIN_CLUSTER_SIZE.saturating_add(drawn.floor() as usize);
        ranges.push_cluster(size);
        let (mut cluster_graph, cluster_stats) = erdos_make(rng, size, mc, cluster);
        stats.absorb(cluster_stats);
        stats.repair_bridges += g_fix(&mut cluster_graph);
        graph = g_join(graph, cluster_graph);
    }

    let mut cluster_sets = DisjointSet::new(cno);
    for _ in 0..cno * mi {
        let c1 = rng.gen_range(0..cno);
        let c2 = rng.gen_range(0..cno);
        let insertion = g_clst_edge(&mut graph, rng, &ranges, c1, c2);
        stats.record(insertion);
        if insertion.is_inserted() {
            cluster_sets.union(c1, c2);
        }
    }

    let roots: Vec<usize> = cluster_sets.roots().collect();
    for pair in roots.windows(2) {
        if let &[previous, current] = pair
            && g_clst_edge(&mut graph, rng, &ranges, previous, current).is_inserted()
        {
            stats.cluster_bridges += 1;
        }
    }

    tracing::Span::current().record("nodes", graph.len());
    debug!(
        clusters = cno,
        nodes = graph.len(),
        edges = graph.edge_count(),
        abandoned = stats.abandoned_searches,
        cluster_bridges = stats.cluster_bridges,
        "clustered graph generated"
    );
    Ok(ClusteredGraph {
        graph,
        ranges,
        stats,
    })
}
