//! PageRank-style walk with a fixed teleport coin.

use rand::Rng;

use crate::{
    error::WalkError,
    graph::{Graph, NodeId},
};

use super::{Step, Walker, teleport_elsewhere, uniform_neighbour};

/// Teleport probability of the default [`PageRankWalk`].
pub const PAGERANK_TELEPORT_PROBABILITY: f64 = 0.5;

/// Walk that flips a coin every step: teleport to another node with the
/// configured probability (or when isolated), otherwise follow an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageRankWalk {
    teleport_probability: f64,
}

impl PageRankWalk {
    /// Creates a walker with a custom teleport probability.
    ///
    /// # Errors
    /// Returns [`WalkError::InvalidTeleportProbability`] outside `[0, 1]`.
    pub fn new(teleport_probability: f64) -> Result<Self, WalkError> {
        if !(0.0..=1.0).contains(&teleport_probability) {
            return Err(WalkError::InvalidTeleportProbability {
                got: teleport_probability,
            });
        }
        Ok(Self {
            teleport_probability,
        })
    }

    /// Configured teleport probability.
    #[must_use]
    pub fn teleport_probability(&self) -> f64 {
        self.teleport_probability
    }
}

impl Default for PageRankWalk {
    fn default() -> Self {
        Self {
            teleport_probability: PAGERANK_TELEPORT_PROBABILITY,
        }
    }
}

impl Walker for PageRankWalk {
    type State = ();

    fn name(&self) -> &'static str {
        "pagerank"
    }

    fn next_step<R: Rng + ?Sized>(
        &self,
        _state: &mut Self::State,
        graph: &Graph,
        current: NodeId,
        rng: &mut R,
    ) -> Step {
        // The coin is flipped even for isolated nodes to keep draws aligned.
        let teleport = rng.gen_bool(self.teleport_probability);
        let neighbour = if teleport {
            None
        } else {
            uniform_neighbour(graph, current, rng)
        };
        match neighbour {
            Some(next) => Step::Neighbour(next),
            None => Step::Teleport(teleport_elsewhere(graph, current, rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::*;

    fn star() -> Graph {
        let mut graph = Graph::new(1, 1);
        for _ in 0..5 {
            graph.add_node(0);
        }
        for leaf in 1..5 {
            graph.add_edge(0, leaf);
        }
        graph
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.1)]
    #[case(f64::NAN)]
    fn rejects_invalid_probabilities(#[case] probability: f64) {
        assert!(matches!(
            PageRankWalk::new(probability),
            Err(WalkError::InvalidTeleportProbability { .. })
        ));
    }

    #[test]
    fn default_teleports_half_the_time() {
        assert_eq!(PageRankWalk::default().teleport_probability(), 0.5);
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(12);
        let teleports = (0..2_000)
            .filter(|_| {
                PageRankWalk::default()
                    .next_step(&mut (), &graph, 0, &mut rng)
                    .is_teleport()
            })
            .count();
        assert!((800..1_200).contains(&teleports), "teleports = {teleports}");
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    fn teleports_never_land_on_the_current_node(#[case] probability: f64) {
        let graph = star();
        let walker = PageRankWalk::new(probability).expect("valid probability");
        let mut rng = SmallRng::seed_from_u64(6);
        for current in 0..5 {
            for _ in 0..32 {
                let step = walker.next_step(&mut (), &graph, current, &mut rng);
                assert_ne!(step.node(), current);
                assert_eq!(step.is_teleport(), probability == 1.0);
            }
        }
    }
}
