//! Walks that forage one trial slot of a graph's information.
//!
//! Every walk starts at node 0 and takes exactly `steps` moves. After each
//! move the destination's value for the trial is added to the running total
//! and the slot is zeroed, so a node contributes at most once per trial. The
//! [`Trace`] records the running total after every step.
//!
//! [`Walker`] captures the movement policy; the step loop, slot bookkeeping
//! and validation are shared by all policies.

mod ars;
mod pagerank;
mod random_walk;

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{
    error::WalkError,
    graph::{Graph, NodeId},
};

pub use self::{
    ars::{AdaptiveRandomSearch, Starvation},
    pagerank::{PAGERANK_TELEPORT_PROBABILITY, PageRankWalk},
    random_walk::RandomWalk,
};

/// Node every walk starts from.
pub const START_NODE: NodeId = 0;

/// How a walker reached its next node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Followed an edge of the current node.
    Neighbour(NodeId),
    /// Jumped without following an edge.
    Teleport(NodeId),
}

impl Step {
    /// Destination of the step.
    #[must_use]
    pub fn node(self) -> NodeId {
        match self {
            Self::Neighbour(node) | Self::Teleport(node) => node,
        }
    }

    /// Returns `true` for a teleport.
    #[must_use]
    pub fn is_teleport(self) -> bool {
        matches!(self, Self::Teleport(_))
    }
}

/// Cumulative information collected by one walk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    cumulative: Vec<f64>,
    path: Vec<NodeId>,
    teleports: usize,
}

impl Trace {
    fn with_capacity(steps: usize) -> Self {
        Self {
            cumulative: Vec::with_capacity(steps),
            path: Vec::with_capacity(steps),
            teleports: 0,
        }
    }

    fn record(&mut self, step: Step, collected: f64) {
        self.cumulative.push(collected);
        self.path.push(step.node());
        if step.is_teleport() {
            self.teleports += 1;
        }
    }

    /// Running total after each step.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.cumulative
    }

    /// Node reached by each step, excluding the start node.
    #[must_use]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Number of steps that teleported.
    #[must_use]
    pub fn teleports(&self) -> usize {
        self.teleports
    }

    /// Total collected by the walk; zero for a walk of no steps.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Number of steps taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Returns `true` when no step was taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Returns `true` when the running total never decreases.
    #[must_use]
    pub fn is_non_decreasing(&self) -> bool {
        self.cumulative.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Consumes the trace, returning the running totals.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.cumulative
    }
}

/// Movement policy of a walk.
///
/// Implementors choose the next node; [`Walker::walk`] drives the step loop
/// and consumes the trial slot.
pub trait Walker {
    /// Per-walk mutable state, reset at the start of every walk.
    type State: Default;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Validates the walker against a step budget before the first step.
    ///
    /// # Errors
    /// Returns a [`WalkError`] when the walker cannot run `steps` steps.
    fn check(&self, _steps: usize) -> Result<(), WalkError> {
        Ok(())
    }

    /// Chooses where to move from `current`.
    fn next_step<R: Rng + ?Sized>(
        &self,
        state: &mut Self::State,
        graph: &Graph,
        current: NodeId,
        rng: &mut R,
    ) -> Step;

    /// Observes the value collected at the destination of the latest step.
    fn observe(&self, _state: &mut Self::State, _collected: f64) {}

    /// Walks trial slot `test_index` of `graph` for `steps` steps, zeroing
    /// every visited node's slot.
    ///
    /// # Errors
    /// Returns [`WalkError::EmptyGraph`] for a graph without nodes,
    /// [`WalkError::TrialOutOfRange`] for a missing slot, and any error from
    /// [`Walker::check`]. Nothing is mutated when an error is returned.
    fn walk<R: Rng + ?Sized>(
        &self,
        graph: &mut Graph,
        test_index: usize,
        steps: usize,
        rng: &mut R,
    ) -> Result<Trace, WalkError>
    where
        Self: Sized,
    {
        validate(self, graph, test_index, steps)?;
        let mut slot = graph.trial_column(test_index);
        let trace = walk_slot(self, graph, &mut slot, steps, rng)?;
        graph.store_trial_column(test_index, &slot);
        Ok(trace)
    }
}

pub(crate) fn validate<W: Walker>(
    walker: &W,
    graph: &Graph,
    test_index: usize,
    steps: usize,
) -> Result<(), WalkError> {
    walker.check(steps)?;
    if graph.is_empty() {
        return Err(WalkError::EmptyGraph);
    }
    if test_index >= graph.n_tests() {
        return Err(WalkError::TrialOutOfRange {
            test_index,
            n_tests: graph.n_tests(),
        });
    }
    Ok(())
}

/// Runs the step loop over a detached copy of one trial slot.
///
/// `slot` holds one value per node of `graph`; every visited entry is zeroed.
#[instrument(
    name = "walk.run",
    err,
    skip_all,
    fields(walker = walker.name(), steps = steps, nodes = graph.len()),
)]
pub(crate) fn walk_slot<W: Walker, R: Rng + ?Sized>(
    walker: &W,
    graph: &Graph,
    slot: &mut [f64],
    steps: usize,
    rng: &mut R,
) -> Result<Trace, WalkError> {
    walker.check(steps)?;
    if graph.is_empty() {
        return Err(WalkError::EmptyGraph);
    }
    debug_assert_eq!(slot.len(), graph.len(), "slot must hold one value per node");
    let mut state = W::State::default();
    let mut trace = Trace::with_capacity(steps);
    let mut current = START_NODE;
    let mut collected = 0.0;
    for _ in 0..steps {
        let step = walker.next_step(&mut state, graph, current, rng);
        current = step.node();
        let value = std::mem::take(&mut slot[current]);
        collected += value;
        walker.observe(&mut state, value);
        trace.record(step, collected);
    }
    debug!(
        walker = walker.name(),
        collected,
        teleports = trace.teleports(),
        "walk finished"
    );
    #[cfg(feature = "metrics")]
    metrics::counter!("walk_teleports", "walker" => walker.name()).increment(trace.teleports() as u64);
    Ok(trace)
}

/// Uniform neighbour of `current`, or `None` when it is isolated.
fn uniform_neighbour<R: Rng + ?Sized>(graph: &Graph, current: NodeId, rng: &mut R) -> Option<NodeId> {
    graph.neighbours(current).choose(rng).copied()
}

/// Uniform node other than `current`; a one-node graph stays in place.
fn teleport_elsewhere<R: Rng + ?Sized>(graph: &Graph, current: NodeId, rng: &mut R) -> NodeId {
    let others = graph.len().saturating_sub(1);
    if others == 0 {
        return current;
    }
    let pick = rng.gen_range(0..others);
    if pick >= current { pick + 1 } else { pick }
}

/// Uniform node over the whole graph, `current` included.
fn teleport_anywhere<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> NodeId {
    rng.gen_range(0..graph.len())
}

#[cfg(test)]
mod tests;
