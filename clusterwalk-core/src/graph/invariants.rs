//! Structural invariant checks for [`Graph`].
//!
//! Surfaced publicly so property tests and downstream experiment drivers can
//! assert graph health without re-walking the adjacency themselves.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, trace};

use super::{Graph, NodeId};

/// First structural problem found in a graph.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TopologyViolation {
    /// A node lists itself as a neighbour.
    #[error("node {node} is adjacent to itself")]
    SelfLoop {
        /// Offending node.
        node: NodeId,
    },
    /// A node lists a neighbour id that is not part of the graph.
    #[error("node {node} references missing neighbour {neighbour}")]
    DanglingNeighbour {
        /// Node holding the reference.
        node: NodeId,
        /// Referenced id.
        neighbour: NodeId,
    },
    /// A node lists the same neighbour twice.
    #[error("node {node} lists neighbour {neighbour} more than once")]
    DuplicateNeighbour {
        /// Node holding the duplicate.
        node: NodeId,
        /// Duplicated neighbour id.
        neighbour: NodeId,
    },
    /// An edge is present in one direction only.
    #[error("edge {origin}->{target} is missing the reverse link")]
    MissingBacklink {
        /// Node exposing the one-way edge.
        origin: NodeId,
        /// Node lacking the reverse edge.
        target: NodeId,
    },
    /// A node carries the wrong number of trial slots.
    #[error("node {node} carries {len} trial slot(s) but the graph declares {expected}")]
    InformationLength {
        /// Offending node.
        node: NodeId,
        /// Slots found on the node.
        len: usize,
        /// Slots declared by the graph.
        expected: usize,
    },
    /// The graph has more than one connected component.
    #[error("graph has {components} connected components")]
    Disconnected {
        /// Number of components found.
        components: usize,
    },
}

impl Graph {
    /// Checks that adjacency is symmetric, loop-free and duplicate-free, and
    /// that every node carries `n_tests` trial slots.
    ///
    /// # Errors
    /// Returns the first [`TopologyViolation`] found, scanning nodes in id
    /// order.
    pub fn check_topology(&self) -> Result<(), TopologyViolation> {
        trace!(nodes = self.len(), "checking graph topology");
        for (node, record) in self.nodes().iter().enumerate() {
            if record.information().len() != self.n_tests() {
                return Err(TopologyViolation::InformationLength {
                    node,
                    len: record.information().len(),
                    expected: self.n_tests(),
                });
            }
            let mut seen = HashSet::with_capacity(record.adjacency().len());
            for &neighbour in record.adjacency() {
                let violation = if neighbour == node {
                    Some(TopologyViolation::SelfLoop { node })
                } else if neighbour >= self.len() {
                    Some(TopologyViolation::DanglingNeighbour { node, neighbour })
                } else if !seen.insert(neighbour) {
                    Some(TopologyViolation::DuplicateNeighbour { node, neighbour })
                } else if !self.has_edge(neighbour, node) {
                    Some(TopologyViolation::MissingBacklink {
                        origin: node,
                        target: neighbour,
                    })
                } else {
                    None
                };
                if let Some(violation) = violation {
                    debug!(%violation, "topology check failed");
                    return Err(violation);
                }
            }
        }
        Ok(())
    }

    /// Checks that the graph forms a single connected component.
    ///
    /// The empty graph counts as connected.
    ///
    /// # Errors
    /// Returns [`TopologyViolation::Disconnected`] when union-find over the
    /// edges leaves more than one root.
    pub fn check_connected(&self) -> Result<(), TopologyViolation> {
        let components = self.component_count();
        if components > 1 {
            return Err(TopologyViolation::Disconnected { components });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Graph, TopologyViolation};

    fn pair() -> Graph {
        let mut graph = Graph::new(1, 1);
        graph.add_node(0);
        graph.add_node(0);
        graph
    }

    #[test]
    fn detects_one_way_edges() {
        let mut graph = pair();
        graph.nodes_mut()[0].adjacency.push(1);
        assert_eq!(
            graph.check_topology(),
            Err(TopologyViolation::MissingBacklink {
                origin: 0,
                target: 1
            })
        );
    }

    #[test]
    fn detects_self_loops_and_dangling_ids() {
        let mut graph = pair();
        graph.nodes_mut()[1].adjacency.push(1);
        assert_eq!(
            graph.check_topology(),
            Err(TopologyViolation::SelfLoop { node: 1 })
        );

        let mut graph = pair();
        graph.nodes_mut()[0].adjacency.push(7);
        assert_eq!(
            graph.check_topology(),
            Err(TopologyViolation::DanglingNeighbour {
                node: 0,
                neighbour: 7
            })
        );
    }

    #[test]
    fn detects_duplicate_neighbours() {
        let mut graph = pair();
        graph.add_edge(0, 1);
        graph.nodes_mut()[0].adjacency.push(1);
        assert_eq!(
            graph.check_topology(),
            Err(TopologyViolation::DuplicateNeighbour {
                node: 0,
                neighbour: 1
            })
        );
    }

    #[test]
    fn reports_disconnection() {
        let graph = pair();
        assert_eq!(
            graph.check_connected(),
            Err(TopologyViolation::Disconnected { components: 2 })
        );
        assert!(Graph::new(0, 1).check_connected().is_ok());
    }
}
