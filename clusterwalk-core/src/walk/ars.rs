//! Adaptive random search.
//!
//! The walker stays local while it keeps finding information and teleports
//! once `tau` consecutive steps came up empty. Its teleport may land on the
//! current node, unlike the teleports of [`RandomWalk`](super::RandomWalk)
//! and [`PageRankWalk`](super::PageRankWalk).

use rand::Rng;

use crate::{
    error::WalkError,
    graph::{Graph, NodeId},
};

use super::{Step, Walker, teleport_anywhere, uniform_neighbour};

/// Patience-driven explore/exploit walk.
///
/// # Examples
/// ```
/// use clusterwalk_core::{AdaptiveRandomSearch, Graph, Walker, WalkError};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut graph = Graph::new(1, 1);
/// graph.add_node(0);
/// graph.add_node(0);
/// graph.add_edge(0, 1);
/// let mut rng = SmallRng::seed_from_u64(3);
/// assert_eq!(
///     AdaptiveRandomSearch::new(5).walk(&mut graph, 0, 4, &mut rng),
///     Err(WalkError::TauExceedsSteps { tau: 5, steps: 4 })
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdaptiveRandomSearch {
    tau: usize,
}

impl AdaptiveRandomSearch {
    /// Creates a walker that teleports after `tau` consecutive empty steps.
    #[must_use]
    pub fn new(tau: usize) -> Self {
        Self { tau }
    }

    /// Patience threshold.
    #[must_use]
    pub fn tau(&self) -> usize {
        self.tau
    }
}

/// Consecutive empty steps since information was last found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Starvation(usize);

impl Starvation {
    /// Current count.
    #[must_use]
    pub fn count(self) -> usize {
        self.0
    }
}

impl Walker for AdaptiveRandomSearch {
    type State = Starvation;

    fn name(&self) -> &'static str {
        "ars"
    }

    fn check(&self, steps: usize) -> Result<(), WalkError> {
        if self.tau > steps {
            return Err(WalkError::TauExceedsSteps {
                tau: self.tau,
                steps,
            });
        }
        Ok(())
    }

    fn next_step<R: Rng + ?Sized>(
        &self,
        state: &mut Self::State,
        graph: &Graph,
        current: NodeId,
        rng: &mut R,
    ) -> Step {
        if state.0 >= self.tau {
            return Step::Teleport(teleport_anywhere(graph, rng));
        }
        match uniform_neighbour(graph, current, rng) {
            Some(next) => Step::Neighbour(next),
            None => Step::Teleport(teleport_anywhere(graph, rng)),
        }
    }

    fn observe(&self, state: &mut Self::State, collected: f64) {
        state.0 = if collected > 0.0 { 0 } else { state.0 + 1 };
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0, true)]
    #[case(3, 3, true)]
    #[case(4, 3, false)]
    fn tau_must_fit_the_budget(#[case] tau: usize, #[case] steps: usize, #[case] ok: bool) {
        assert_eq!(AdaptiveRandomSearch::new(tau).check(steps).is_ok(), ok);
    }

    #[test]
    fn observation_resets_on_information() {
        let walker = AdaptiveRandomSearch::new(2);
        let mut state = Starvation::default();
        walker.observe(&mut state, 0.0);
        walker.observe(&mut state, 0.0);
        assert_eq!(state.count(), 2);
        walker.observe(&mut state, 0.3);
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn exhausted_patience_forces_a_teleport() {
        let mut graph = Graph::new(1, 1);
        for _ in 0..3 {
            graph.add_node(0);
        }
        graph.add_edge(0, 1);
        let walker = AdaptiveRandomSearch::new(1);
        let mut rng = SmallRng::seed_from_u64(8);
        let mut starving = Starvation(1);
        assert!(walker.next_step(&mut starving, &graph, 0, &mut rng).is_teleport());
        let mut fed = Starvation(0);
        assert_eq!(walker.next_step(&mut fed, &graph, 0, &mut rng), Step::Neighbour(1));
    }
}
