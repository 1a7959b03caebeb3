//! Independent execution of every trial slot of a graph.
//!
//! Trials never share a slot: each walk runs over a detached copy of its own
//! slot against the shared, read-only topology, and the consumed slots are
//! written back once every walk has finished. Each trial draws from its own
//! `SmallRng` seeded by [`trial_seed`], so results do not depend on thread
//! scheduling or on whether the `parallel` feature is enabled.

use rand::{SeedableRng, rngs::SmallRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    error::WalkError,
    graph::Graph,
    walk::{Trace, Walker, validate, walk_slot},
};

/// SplitMix64 increment (the 64-bit golden ratio) used to space trial seeds.
const TRIAL_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Derives the seed of trial `test_index` from `base_seed`.
///
/// # Examples
/// ```
/// use clusterwalk_core::trial_seed;
///
/// assert_eq!(trial_seed(7, 3), trial_seed(7, 3));
/// assert_ne!(trial_seed(7, 3), trial_seed(7, 4));
/// ```
#[inline]
#[must_use]
pub fn trial_seed(base_seed: u64, test_index: usize) -> u64 {
    splitmix64(base_seed ^ ((test_index as u64).wrapping_add(1)).wrapping_mul(TRIAL_SEED_SPACING))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(TRIAL_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Runs one walk per trial slot with deterministically derived seeds.
///
/// # Examples
/// ```
/// use clusterwalk_core::{ErdosParams, RandomWalk, TrialRunner, assign_information};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut graph = ErdosParams::new(4, 4.0, 2, 1)?.with_trials(3).generate()?.graph;
/// assign_information(&mut graph, 0.5, &mut SmallRng::seed_from_u64(1))?;
/// let traces = TrialRunner::new(42).run_all(&mut graph, &RandomWalk, 20)?;
/// assert_eq!(traces.len(), 3);
/// assert!(traces.iter().all(|trace| trace.len() == 20));
/// # Ok::<(), clusterwalk_core::ClusterWalkError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialRunner {
    base_seed: u64,
}

impl TrialRunner {
    /// Creates a runner deriving every trial seed from `base_seed`.
    #[must_use]
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Base seed of the runner.
    #[must_use]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Seeded generator of trial `test_index`.
    #[must_use]
    pub fn trial_rng(&self, test_index: usize) -> SmallRng {
        SmallRng::seed_from_u64(trial_seed(self.base_seed, test_index))
    }

    /// Walks trial slot `test_index` with its derived seed.
    ///
    /// Produces the same trace as the matching entry of
    /// [`run_all`](Self::run_all) on an identical graph.
    ///
    /// # Errors
    /// Propagates the walker's [`WalkError`]; the graph is untouched on error.
    pub fn run_trial<W: Walker>(
        &self,
        graph: &mut Graph,
        walker: &W,
        test_index: usize,
        steps: usize,
    ) -> Result<Trace, WalkError> {
        walker.walk(graph, test_index, steps, &mut self.trial_rng(test_index))
    }

    /// Walks every trial slot of `graph`, returning traces ordered by slot.
    ///
    /// Slots run in parallel when the `parallel` feature is enabled.
    ///
    /// # Errors
    /// Returns the walker's [`WalkError`] before any walk starts; the graph is
    /// untouched on error.
    #[instrument(
        name = "trials.run_all",
        err,
        skip_all,
        fields(walker = walker.name(), trials = graph.n_tests(), steps = steps),
    )]
    pub fn run_all<W: Walker + Sync>(
        &self,
        graph: &mut Graph,
        walker: &W,
        steps: usize,
    ) -> Result<Vec<Trace>, WalkError> {
        validate(walker, graph, 0, steps)?;
        let mut slots: Vec<Vec<f64>> = (0..graph.n_tests())
            .map(|test_index| graph.trial_column(test_index))
            .collect();
        let topology: &Graph = graph;
        let run = |(test_index, slot): (usize, &mut Vec<f64>)| {
            walk_slot(walker, topology, slot, steps, &mut self.trial_rng(test_index))
        };

        #[cfg(feature = "parallel")]
        let traces = slots
            .par_iter_mut()
            .enumerate()
            .map(run)
            .collect::<Result<Vec<_>, _>>()?;
        #[cfg(not(feature = "parallel"))]
        let traces = slots
            .iter_mut()
            .enumerate()
            .map(run)
            .collect::<Result<Vec<_>, _>>()?;

        for (test_index, slot) in slots.iter().enumerate() {
            graph.store_trial_column(test_index, slot);
        }
        debug!(
            trials = traces.len(),
            best = traces.iter().map(Trace::final_value).fold(0.0, f64::max),
            "trials finished"
        );
        Ok(traces)
    }
}
