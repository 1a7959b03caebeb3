//! Unbiased random walk.

use rand::Rng;

use crate::graph::{Graph, NodeId};

use super::{Step, Walker, teleport_elsewhere, uniform_neighbour};

/// Moves to a uniform neighbour, teleporting to another node only when the
/// current node is isolated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomWalk;

impl Walker for RandomWalk {
    type State = ();

    fn name(&self) -> &'static str {
        "random_walk"
    }

    fn next_step<R: Rng + ?Sized>(
        &self,
        _state: &mut Self::State,
        graph: &Graph,
        current: NodeId,
        rng: &mut R,
    ) -> Step {
        match uniform_neighbour(graph, current, rng) {
            Some(next) => Step::Neighbour(next),
            None => Step::Teleport(teleport_elsewhere(graph, current, rng)),
        }
    }
}
