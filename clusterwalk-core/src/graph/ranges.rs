//! Contiguous node-id ranges assigned to each cluster by the Erdos generator.

use std::ops::Range;

use super::NodeId;

/// Half-open range `[start, end)` of node ids owned by one cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClusterRange {
    start: NodeId,
    end: NodeId,
}

impl ClusterRange {
    /// Creates the range `[start, end)`.
    #[must_use]
    pub const fn new(start: NodeId, end: NodeId) -> Self {
        Self { start, end }
    }

    /// First node id of the cluster.
    #[must_use]
    pub const fn start(&self) -> NodeId {
        self.start
    }

    /// One past the last node id of the cluster.
    #[must_use]
    pub const fn end(&self) -> NodeId {
        self.end
    }

    /// Number of nodes in the cluster.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` when the range holds no ids.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` lies in the range.
    #[must_use]
    pub const fn contains(&self, id: NodeId) -> bool {
        self.start <= id && id < self.end
    }

    /// The range as a standard library [`Range`].
    #[must_use]
    pub const fn as_range(&self) -> Range<NodeId> {
        self.start..self.end
    }
}

/// Cluster id to node-id range table.
///
/// Ranges are appended in cluster order, each one starting where the previous
/// one ended, so the table always partitions `[0, total_nodes)`.
///
/// # Examples
/// ```
/// use clusterwalk_core::ClusterRanges;
///
/// let mut ranges = ClusterRanges::default();
/// ranges.push_cluster(3);
/// ranges.push_cluster(2);
/// assert_eq!(ranges.get(1).map(|range| range.as_range()), Some(3..5));
/// assert_eq!(ranges.total_nodes(), 5);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterRanges {
    ranges: Vec<ClusterRange>,
}

impl ClusterRanges {
    /// Creates an empty table with room for `clusters` ranges.
    #[must_use]
    pub fn with_capacity(clusters: usize) -> Self {
        Self {
            ranges: Vec::with_capacity(clusters),
        }
    }

    /// Appends the range of the next cluster and returns it.
    pub fn push_cluster(&mut self, size: usize) -> ClusterRange {
        let start = self
            .ranges
            .last()
            .copied()
            .unwrap_or(ClusterRange::new(0, 0))
            .end();
        let range = ClusterRange::new(start, start + size);
        self.ranges.push(range);
        range
    }

    /// Returns the range of `cluster`.
    #[must_use]
    pub fn get(&self, cluster: usize) -> Option<ClusterRange> {
        self.ranges.get(cluster).copied()
    }

    /// Iterates over the ranges in cluster order.
    pub fn iter(&self) -> impl Iterator<Item = ClusterRange> + '_ {
        self.ranges.iter().copied()
    }

    /// Number of clusters in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` when no cluster has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of node ids covered by the table.
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.ranges.last().map_or(0, ClusterRange::end)
    }

    /// Size of each cluster, in cluster order.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.ranges.iter().map(ClusterRange::len).collect()
    }

    /// Returns the cluster owning `id`.
    #[must_use]
    pub fn cluster_of(&self, id: NodeId) -> Option<usize> {
        let index = self.ranges.partition_point(|range| range.end() <= id);
        self.ranges
            .get(index)
            .filter(|range| range.contains(id))
            .map(|_| index)
    }

    /// Returns `true` when the ranges are contiguous from zero, each holds at
    /// least `min_len` ids, and together they cover exactly `n_nodes` ids.
    #[must_use]
    pub fn partitions(&self, n_nodes: usize, min_len: usize) -> bool {
        let mut expected_start = 0;
        for range in &self.ranges {
            if range.start() != expected_start || range.len() < min_len {
                return false;
            }
            expected_start = range.end();
        }
        expected_start == n_nodes
    }
}
