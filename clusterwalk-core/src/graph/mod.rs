//! Clustered graph data model shared by the generators, the information model
//! and the walks.
//!
//! A [`Graph`] owns a fixed record per node (cluster id, adjacency, one
//! information value per trial slot, and a derived colour) plus graph-level
//! metadata. Node ids are positions in the node vector and stay stable for the
//! lifetime of the graph.

mod invariants;
mod ranges;

use crate::dsu::DisjointSet;

pub use self::{
    invariants::TopologyViolation,
    ranges::{ClusterRange, ClusterRanges},
};

/// Identifier of a node: its position in [`Graph::nodes`].
pub type NodeId = usize;

/// Label derived from a node's trial-0 information.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Colour {
    /// Trial-0 information is positive.
    Informed,
    /// Trial-0 information is zero.
    #[default]
    Uninformed,
}

impl Colour {
    /// Derives the colour for a trial-0 value.
    #[must_use]
    pub fn from_information(value: f64) -> Self {
        if value > 0.0 {
            Self::Informed
        } else {
            Self::Uninformed
        }
    }
}

/// A node of a clustered graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    cluster_id: usize,
    adjacency: Vec<NodeId>,
    information: Vec<f64>,
    colour: Colour,
}

impl Node {
    fn new(cluster_id: usize, n_tests: usize) -> Self {
        Self {
            cluster_id,
            adjacency: Vec::new(),
            information: vec![0.0; n_tests],
            colour: Colour::Uninformed,
        }
    }

    /// Cluster the node belongs to.
    #[must_use]
    pub fn cluster_id(&self) -> usize {
        self.cluster_id
    }

    /// Neighbours in insertion order. Never contains the node itself and never
    /// repeats an id.
    #[must_use]
    pub fn adjacency(&self) -> &[NodeId] {
        &self.adjacency
    }

    /// Information value for every trial slot.
    #[must_use]
    pub fn information(&self) -> &[f64] {
        &self.information
    }

    /// Colour derived when information was last assigned.
    #[must_use]
    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub(crate) fn information_mut(&mut self) -> &mut [f64] {
        &mut self.information
    }
}

/// Undirected clustered graph with per-trial information on every node.
///
/// # Examples
/// ```
/// use clusterwalk_core::Graph;
///
/// let mut graph = Graph::new(2, 3);
/// let a = graph.add_node(0);
/// let b = graph.add_node(1);
/// assert!(graph.add_edge(a, b));
/// assert!(!graph.add_edge(b, a));
/// assert_eq!(graph.neighbours(a), &[b]);
/// assert_eq!(graph.component_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    n_clusters: usize,
    n_tests: usize,
    total_information: f64,
}

impl Graph {
    /// Creates an empty graph that will hold `n_clusters` clusters and
    /// `n_tests` trial slots per node.
    #[must_use]
    pub fn new(n_clusters: usize, n_tests: usize) -> Self {
        Self {
            nodes: Vec::new(),
            n_clusters,
            n_tests,
            total_information: 0.0,
        }
    }

    /// Appends an uninformed node of `cluster_id` and returns its id.
    pub fn add_node(&mut self, cluster_id: usize) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(cluster_id, self.n_tests));
        id
    }

    /// Inserts the undirected edge `left`–`right`.
    ///
    /// Returns `false` without modifying the graph when either id is unknown,
    /// the pair is a self-loop or the edge already exists.
    pub fn add_edge(&mut self, left: NodeId, right: NodeId) -> bool {
        let known = left < self.nodes.len() && right < self.nodes.len();
        if !known || left == right || self.has_edge(left, right) {
            return false;
        }
        self.nodes[left].adjacency.push(right);
        self.nodes[right].adjacency.push(left);
        true
    }

    /// Returns `true` when `left` and `right` are adjacent.
    #[must_use]
    pub fn has_edge(&self, left: NodeId, right: NodeId) -> bool {
        self.nodes
            .get(left)
            .is_some_and(|node| node.adjacency.contains(&right))
    }

    /// Returns the node record for `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns every node in id order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the neighbours of `id`, or an empty slice for unknown ids.
    #[must_use]
    pub fn neighbours(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map_or(&[][..], |node| node.adjacency.as_slice())
    }

    /// Returns the number of neighbours of `id`.
    #[must_use]
    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbours(id).len()
    }

    /// Returns the cluster of `id`.
    #[must_use]
    pub fn cluster_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(id).map(Node::cluster_id)
    }

    /// Iterates over every undirected edge once, as `(low, high)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.iter().enumerate().flat_map(|(source, node)| {
            node.adjacency
                .iter()
                .copied()
                .filter(move |&target| source < target)
                .map(move |target| (source, target))
        })
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Runs union-find over every edge and returns the resulting sets.
    #[must_use]
    pub fn components(&self) -> DisjointSet {
        let mut sets = DisjointSet::new(self.nodes.len());
        for (source, target) in self.edges() {
            sets.union(source, target);
        }
        sets
    }

    /// Returns the number of connected components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components().component_count()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes, under its experiment-metadata name.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of clusters the graph was generated with.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Number of trial slots carried by every node.
    #[must_use]
    pub fn n_tests(&self) -> usize {
        self.n_tests
    }

    /// Sum of trial-0 information over all nodes, as of the last assignment.
    #[must_use]
    pub fn total_information(&self) -> f64 {
        self.total_information
    }

    /// Writes `value` into every trial slot of `id` and refreshes its colour
    /// and the graph total.
    ///
    /// Returns `false` when `id` is not a node of the graph.
    pub fn set_information(&mut self, id: NodeId, value: f64) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        node.information.fill(value);
        node.colour = Colour::from_information(value);
        self.refresh_total_information();
        true
    }

    /// Appends the nodes of `other`, shifting its adjacency by `self.len()`.
    ///
    /// Cluster ids are kept verbatim; the trial count of `self` wins.
    pub(crate) fn append(&mut self, other: Self) {
        let base = self.nodes.len();
        let n_tests = self.n_tests;
        self.nodes.extend(other.nodes.into_iter().map(|mut node| {
            for neighbour in &mut node.adjacency {
                *neighbour += base;
            }
            node.information.resize(n_tests, 0.0);
            node
        }));
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Recomputes the trial-0 total and every node colour from the stored
    /// values.
    pub(crate) fn refresh_total_information(&mut self) {
        let mut total = 0.0;
        for node in &mut self.nodes {
            let value = node.information.first().copied().unwrap_or(0.0);
            node.colour = Colour::from_information(value);
            total += value;
        }
        self.total_information = total;
    }

    /// Sums the stored values of one trial slot.
    pub(crate) fn slot_total(&self, test_index: usize) -> f64 {
        self.nodes
            .iter()
            .filter_map(|node| node.information.get(test_index))
            .sum()
    }

    /// Copies one trial slot out of every node, in node order.
    pub(crate) fn trial_column(&self, test_index: usize) -> Vec<f64> {
        self.nodes
            .iter()
            .map(|node| node.information.get(test_index).copied().unwrap_or(0.0))
            .collect()
    }

    /// Writes a column produced by [`Self::trial_column`] back into the slot.
    pub(crate) fn store_trial_column(&mut self, test_index: usize, column: &[f64]) {
        for (node, value) in self.nodes.iter_mut().zip(column) {
            if let Some(slot) = node.information.get_mut(test_index) {
                *slot = *value;
            }
        }
    }
}
