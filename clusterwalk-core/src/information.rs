//! Placement of the per-trial information resource on clustered graphs.
//!
//! A scenario informs a fraction of the clusters: every node of an informed
//! cluster draws one value in `(0, 1]`, replicated across all trial slots,
//! and every other node holds zero. [`add_information`] grows a previous
//! selection for sweeps over increasing percentages without disturbing the
//! values already placed.

use std::collections::BTreeSet;

use rand::{Rng, distributions::OpenClosed01, seq::index};
use tracing::{debug, instrument};

use crate::{error::InformationError, graph::Graph};

/// Tolerance applied before flooring `clusters * percentage`, so fractions
/// such as `0.3` of `10` yield `3`.
const COUNT_EPSILON: f64 = 1e-9;

/// Clusters selected as informed, with the percentage they were selected for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InformedClusters {
    clusters: BTreeSet<usize>,
    percentage: f64,
}

impl InformedClusters {
    /// Creates a selection from explicit cluster ids.
    #[must_use]
    pub fn new(clusters: impl IntoIterator<Item = usize>, percentage: f64) -> Self {
        Self {
            clusters: clusters.into_iter().collect(),
            percentage,
        }
    }

    /// Selected cluster ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.clusters.iter().copied()
    }

    /// Returns `true` when `cluster` is informed.
    #[must_use]
    pub fn contains(&self, cluster: usize) -> bool {
        self.clusters.contains(&cluster)
    }

    /// Number of informed clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns `true` when no cluster is informed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Percentage (as a fraction in `[0, 1]`) the selection was made for.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

fn validate_percentage(percentage: f64) -> Result<(), InformationError> {
    if (0.0..=1.0).contains(&percentage) {
        Ok(())
    } else {
        Err(InformationError::PercentageOutOfRange { got: percentage })
    }
}

/// Number of clusters a fraction of `n_clusters` selects, rounded down.
///
/// # Errors
/// Returns [`InformationError::PercentageOutOfRange`] when `percentage` is not
/// a fraction in `[0, 1]`.
///
/// # Examples
/// ```
/// use clusterwalk_core::clusters_for_percentage;
///
/// assert_eq!(clusters_for_percentage(10, 0.3), Ok(3));
/// assert_eq!(clusters_for_percentage(5, 0.5), Ok(2));
/// ```
pub fn clusters_for_percentage(n_clusters: usize, percentage: f64) -> Result<usize, InformationError> {
    validate_percentage(percentage)?;
    let exact = n_clusters as f64 * percentage;
    // Bounded by `n_clusters`, so the cast cannot truncate.
    Ok(((exact + COUNT_EPSILON).floor() as usize).min(n_clusters))
}

/// Clears and redraws information for a fraction of the clusters.
///
/// The clusters to inform are sampled uniformly without replacement. Every
/// node is rewritten: informed-cluster nodes draw a fresh value, all others
/// become zero. Colours and the graph total are recomputed from trial 0.
///
/// # Errors
/// Returns [`InformationError::PercentageOutOfRange`] before sampling when the
/// percentage is invalid.
#[instrument(
    name = "information.assign",
    err,
    skip(graph, rng),
    fields(clusters = graph.n_clusters(), nodes = graph.len()),
)]
pub fn assign_information<R: Rng + ?Sized>(
    graph: &mut Graph,
    percentage: f64,
    rng: &mut R,
) -> Result<InformedClusters, InformationError> {
    let count = clusters_for_percentage(graph.n_clusters(), percentage)?;
    let mut informed = assign_clusters(graph, count, rng)?;
    informed.percentage = percentage;
    Ok(informed)
}

/// Clears and redraws information for exactly `count` uniformly chosen
/// clusters.
///
/// # Errors
/// Returns [`InformationError::TooManyClusters`] when `count` exceeds the
/// number of clusters.
pub fn assign_clusters<R: Rng + ?Sized>(
    graph: &mut Graph,
    count: usize,
    rng: &mut R,
) -> Result<InformedClusters, InformationError> {
    let available = graph.n_clusters();
    if count > available {
        return Err(InformationError::TooManyClusters {
            requested: count,
            available,
        });
    }
    let clusters: BTreeSet<usize> = index::sample(rng, available, count).into_iter().collect();
    for node in graph.nodes_mut() {
        let value = if clusters.contains(&node.cluster_id()) {
            rng.sample(OpenClosed01)
        } else {
            0.0
        };
        node.information_mut().fill(value);
    }
    graph.refresh_total_information();
    debug!(
        informed = count,
        total = graph.total_information(),
        "information assigned"
    );
    let percentage = if available == 0 {
        0.0
    } else {
        count as f64 / available as f64
    };
    Ok(InformedClusters {
        clusters,
        percentage,
    })
}

/// Grows `previous` until it covers `percentage` of the clusters.
///
/// The additional clusters needed to reach the target are sampled from those
/// not selected yet; a target of `1.0` selects every cluster. Nodes of
/// previously informed clusters keep their stored values, nodes of newly
/// informed clusters draw fresh values, and all other nodes hold zero.
///
/// # Errors
/// Returns [`InformationError::PercentageOutOfRange`] for an invalid target,
/// [`InformationError::PercentageDecrease`] when the target is below the
/// previous percentage, [`InformationError::UnknownCluster`] when `previous`
/// names a cluster the graph lacks, and
/// [`InformationError::TooManyClusters`] when fewer unselected clusters remain
/// than the target needs. All checks run before sampling.
#[instrument(
    name = "information.add",
    err,
    skip(graph, previous, rng),
    fields(
        clusters = graph.n_clusters(),
        previous = previous.map_or(0, InformedClusters::len),
    ),
)]
pub fn add_information<R: Rng + ?Sized>(
    graph: &mut Graph,
    percentage: f64,
    previous: Option<&InformedClusters>,
    rng: &mut R,
) -> Result<InformedClusters, InformationError> {
    validate_percentage(percentage)?;
    let n_clusters = graph.n_clusters();
    let kept = previous.map(|selection| selection.clusters.clone()).unwrap_or_default();
    let previous_percentage = previous.map_or(0.0, InformedClusters::percentage);
    if percentage < previous_percentage {
        return Err(InformationError::PercentageDecrease {
            previous: previous_percentage,
            target: percentage,
        });
    }
    if let Some(&cluster) = kept.iter().find(|&&cluster| cluster >= n_clusters) {
        return Err(InformationError::UnknownCluster {
            cluster,
            clusters: n_clusters,
        });
    }

    let selectable: Vec<usize> = (0..n_clusters).filter(|cluster| !kept.contains(cluster)).collect();
    let added: BTreeSet<usize> = if percentage >= 1.0 {
        selectable.iter().copied().collect()
    } else {
        let needed = clusters_for_percentage(n_clusters, percentage)?.saturating_sub(kept.len());
        if needed > selectable.len() {
            return Err(InformationError::TooManyClusters {
                requested: needed,
                available: selectable.len(),
            });
        }
        index::sample(rng, selectable.len(), needed)
            .into_iter()
            .map(|position| selectable[position])
            .collect()
    };

    for node in graph.nodes_mut() {
        let cluster = node.cluster_id();
        if kept.contains(&cluster) {
            continue;
        }
        let value = if added.contains(&cluster) {
            rng.sample(OpenClosed01)
        } else {
            0.0
        };
        node.information_mut().fill(value);
    }
    graph.refresh_total_information();
    debug!(
        added = added.len(),
        informed = kept.len() + added.len(),
        total = graph.total_information(),
        "information extended"
    );

    let mut clusters = kept;
    clusters.extend(added);
    Ok(InformedClusters {
        clusters,
        percentage,
    })
}

/// Sums the information currently stored in trial slot `test_index`.
///
/// Read-only; nodes lacking the slot contribute zero.
#[must_use]
pub fn total_information(graph: &Graph, test_index: usize) -> f64 {
    graph.slot_total(test_index)
}
