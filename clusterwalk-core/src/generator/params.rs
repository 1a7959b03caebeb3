//! Validated, seeded configuration for the two generators.
//!
//! Parameter objects check their inputs on construction and at
//! [`generate`](ErdosParams::generate) time, then drive the generator with a
//! `SmallRng` seeded from the configured seed so a configuration always
//! reproduces the same graph.

use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    error::{ClusterWalkError, GeneratorError},
    graph::Graph,
    information::InformedClusters,
};

use super::{
    community::{CommunityShape, INTER_CLUSTER_EDGE_PROB, INTRA_CLUSTER_EDGE_PROB, community_graph},
    erdos::{ClusteredGraph, g_make, validate_average_size},
};

/// Trial slots carried by each node unless configured otherwise.
pub const DEFAULT_TRIALS: usize = 5;

/// Seed used when no explicit seed is configured.
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_C1A5;

fn validate_probability(name: &'static str, got: f64) -> Result<f64, GeneratorError> {
    if (0.0..=1.0).contains(&got) {
        Ok(got)
    } else {
        Err(GeneratorError::InvalidProbability { name, got })
    }
}

/// Configuration for the Erdos clustered-graph generator.
///
/// # Examples
/// ```
/// use clusterwalk_core::ErdosParams;
///
/// let params = ErdosParams::new(3, 5.0, 3, 1)?.with_trials(2).with_rng_seed(11);
/// let clustered = params.generate()?;
/// assert_eq!(clustered.graph.n_clusters(), 3);
/// assert_eq!(clustered.graph.n_tests(), 2);
/// assert_eq!(clustered.graph.component_count(), 1);
/// # Ok::<(), clusterwalk_core::GeneratorError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ErdosParams {
    clusters: usize,
    avg_cluster_size: f64,
    intra_degree: usize,
    inter_degree: usize,
    trials: usize,
    rng_seed: u64,
}

impl ErdosParams {
    /// Validates the cluster count and average cluster size.
    ///
    /// # Errors
    /// Returns [`GeneratorError::NoClusters`] when `clusters == 0` and
    /// [`GeneratorError::InvalidAverageSize`] when `avg_cluster_size` lies
    /// outside `(0, MAX_AVERAGE_CLUSTER_SIZE]`.
    pub fn new(
        clusters: usize,
        avg_cluster_size: f64,
        intra_degree: usize,
        inter_degree: usize,
    ) -> Result<Self, GeneratorError> {
        if clusters == 0 {
            return Err(GeneratorError::NoClusters);
        }
        validate_average_size(avg_cluster_size)?;
        Ok(Self {
            clusters,
            avg_cluster_size,
            intra_degree,
            inter_degree,
            trials: DEFAULT_TRIALS,
            rng_seed: DEFAULT_RNG_SEED,
        })
    }

    /// Overrides the number of trial slots per node.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Overrides the generator seed.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Number of clusters.
    #[must_use]
    pub fn clusters(&self) -> usize {
        self.clusters
    }

    /// Mean of the exponential cluster-size draw.
    #[must_use]
    pub fn avg_cluster_size(&self) -> f64 {
        self.avg_cluster_size
    }

    /// Target average degree inside each cluster.
    #[must_use]
    pub fn intra_degree(&self) -> usize {
        self.intra_degree
    }

    /// Random inter-cluster edges drawn per cluster.
    #[must_use]
    pub fn inter_degree(&self) -> usize {
        self.inter_degree
    }

    /// Trial slots per node.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Generator seed.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Generates the clustered graph with a freshly seeded `SmallRng`.
    ///
    /// # Errors
    /// Returns [`GeneratorError::NoTrials`] when the trial count was set to
    /// zero.
    pub fn generate(&self) -> Result<ClusteredGraph, GeneratorError> {
        let mut rng = SmallRng::seed_from_u64(self.rng_seed);
        g_make(
            &mut rng,
            self.clusters,
            self.avg_cluster_size,
            self.intra_degree,
            self.inter_degree,
            self.trials,
        )
    }
}

/// Configuration for the community-partition generator.
///
/// Edge probabilities default to
/// [`INTRA_CLUSTER_EDGE_PROB`] and [`INTER_CLUSTER_EDGE_PROB`]; the informed
/// share defaults to half of the clusters.
///
/// # Examples
/// ```
/// use clusterwalk_core::CommunityParams;
///
/// let (graph, informed) = CommunityParams::new(4, 20)?
///     .with_informed_percentage(0.5)?
///     .generate()?;
/// assert_eq!(graph.len(), 20);
/// assert_eq!(informed.len(), 2);
/// # Ok::<(), clusterwalk_core::ClusterWalkError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CommunityParams {
    shape: CommunityShape,
    informed_percentage: Option<f64>,
    rng_seed: u64,
}

impl CommunityParams {
    /// Validates the cluster and node counts.
    ///
    /// # Errors
    /// Returns [`GeneratorError::NoClusters`] when `clusters == 0` and
    /// [`GeneratorError::TooFewNodes`] when `nodes < clusters`.
    pub fn new(clusters: usize, nodes: usize) -> Result<Self, GeneratorError> {
        if clusters == 0 {
            return Err(GeneratorError::NoClusters);
        }
        if nodes < clusters {
            return Err(GeneratorError::TooFewNodes { nodes, clusters });
        }
        Ok(Self {
            shape: CommunityShape {
                n_clusters: clusters,
                n_nodes: nodes,
                n_tests: DEFAULT_TRIALS,
                p_intra: INTRA_CLUSTER_EDGE_PROB,
                p_inter: INTER_CLUSTER_EDGE_PROB,
            },
            informed_percentage: None,
            rng_seed: DEFAULT_RNG_SEED,
        })
    }

    /// Overrides the intra-cluster edge probability.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidProbability`] outside `[0, 1]`.
    pub fn with_intra_probability(mut self, probability: f64) -> Result<Self, GeneratorError> {
        self.shape.p_intra = validate_probability("p_intra", probability)?;
        Ok(self)
    }

    /// Overrides the inter-cluster edge probability.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidProbability`] outside `[0, 1]`.
    pub fn with_inter_probability(mut self, probability: f64) -> Result<Self, GeneratorError> {
        self.shape.p_inter = validate_probability("p_inter", probability)?;
        Ok(self)
    }

    /// Overrides the informed share of clusters.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidProbability`] outside `[0, 1]`.
    pub fn with_informed_percentage(mut self, percentage: f64) -> Result<Self, GeneratorError> {
        self.informed_percentage = Some(validate_probability("informed_percentage", percentage)?);
        Ok(self)
    }

    /// Overrides the number of trial slots per node.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.shape.n_tests = trials;
        self
    }

    /// Overrides the generator seed.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// The validated graph shape.
    #[must_use]
    pub fn shape(&self) -> CommunityShape {
        self.shape
    }

    /// Informed share, or `None` for the half-of-clusters default.
    #[must_use]
    pub fn informed_percentage(&self) -> Option<f64> {
        self.informed_percentage
    }

    /// Generator seed.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Generates the graph and assigns information with a freshly seeded
    /// `SmallRng`.
    ///
    /// # Errors
    /// Returns [`ClusterWalkError::Generator`] when the trial count was set to
    /// zero.
    pub fn generate(&self) -> Result<(Graph, InformedClusters), ClusterWalkError> {
        let mut rng = SmallRng::seed_from_u64(self.rng_seed);
        community_graph(&mut rng, self.shape, self.informed_percentage)
    }
}
