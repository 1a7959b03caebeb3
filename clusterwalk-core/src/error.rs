//! Error types for the clusterwalk core library.
//!
//! Each component owns an error enum with a stable machine-readable code.
//! [`ClusterWalkError`] wraps all of them for callers that drive a whole
//! experiment and only need a single error type.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Invalid configuration passed to one of the graph generators.
///
/// All variants are raised before the generator consumes any randomness.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeneratorError {
    /// At least one cluster is required.
    #[error("at least one cluster is required")]
    NoClusters,
    /// The requested node count cannot give every cluster a node.
    #[error("n_nodes ({nodes}) must be at least n_clusters ({clusters})")]
    TooFewNodes {
        /// Requested node count.
        nodes: usize,
        /// Requested cluster count.
        clusters: usize,
    },
    /// The mean of the cluster-size distribution must be positive and bounded.
    #[error("average cluster size must lie in (0, 1e6] (got {got})")]
    InvalidAverageSize {
        /// The rejected mean.
        got: f64,
    },
    /// An edge probability fell outside `[0, 1]`.
    #[error("{name} must lie in [0, 1] (got {got})")]
    InvalidProbability {
        /// Parameter name, for diagnostics.
        name: &'static str,
        /// The rejected value.
        got: f64,
    },
    /// Graphs must carry at least one trial slot.
    #[error("n_tests must be at least 1")]
    NoTrials,
}

define_error_codes! {
    /// Stable codes describing [`GeneratorError`] variants.
    enum GeneratorErrorCode for GeneratorError {
        /// At least one cluster is required.
        NoClusters => NoClusters => "GENERATOR_NO_CLUSTERS",
        /// The requested node count cannot give every cluster a node.
        TooFewNodes => TooFewNodes { .. } => "GENERATOR_TOO_FEW_NODES",
        /// The mean of the cluster-size distribution was invalid.
        InvalidAverageSize => InvalidAverageSize { .. } => "GENERATOR_INVALID_AVERAGE_SIZE",
        /// An edge probability fell outside `[0, 1]`.
        InvalidProbability => InvalidProbability { .. } => "GENERATOR_INVALID_PROBABILITY",
        /// Graphs must carry at least one trial slot.
        NoTrials => NoTrials => "GENERATOR_NO_TRIALS",
    }
}

/// Invalid request made to the information model.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InformationError {
    /// Percentages are fractions in `[0, 1]`.
    #[error("percentage of informed clusters must lie in [0, 1] (got {got})")]
    PercentageOutOfRange {
        /// The rejected fraction.
        got: f64,
    },
    /// More clusters were requested than remain available for sampling.
    #[error("cannot sample {requested} cluster(s) from {available} available")]
    TooManyClusters {
        /// Number of clusters the request needed.
        requested: usize,
        /// Size of the population that could be sampled.
        available: usize,
    },
    /// Informed clusters only ever grow between incremental calls.
    #[error("target percentage {target} is below the previous percentage {previous}")]
    PercentageDecrease {
        /// Percentage of the previous selection.
        previous: f64,
        /// Requested target percentage.
        target: f64,
    },
    /// A previous selection referenced a cluster the graph does not have.
    #[error("cluster {cluster} does not exist in a graph with {clusters} cluster(s)")]
    UnknownCluster {
        /// Offending cluster identifier.
        cluster: usize,
        /// Number of clusters in the graph.
        clusters: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`InformationError`] variants.
    enum InformationErrorCode for InformationError {
        /// Percentages are fractions in `[0, 1]`.
        PercentageOutOfRange => PercentageOutOfRange { .. } => "INFORMATION_PERCENTAGE_OUT_OF_RANGE",
        /// More clusters were requested than remain available.
        TooManyClusters => TooManyClusters { .. } => "INFORMATION_TOO_MANY_CLUSTERS",
        /// Informed clusters only ever grow between incremental calls.
        PercentageDecrease => PercentageDecrease { .. } => "INFORMATION_PERCENTAGE_DECREASE",
        /// A previous selection referenced an unknown cluster.
        UnknownCluster => UnknownCluster { .. } => "INFORMATION_UNKNOWN_CLUSTER",
    }
}

/// Invalid configuration passed to a walk.
///
/// Walks validate their inputs before the first step, so an error means the
/// graph was left untouched.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum WalkError {
    /// The patience threshold exceeded the step budget.
    #[error("tau ({tau}) must not exceed steps ({steps})")]
    TauExceedsSteps {
        /// Configured patience threshold.
        tau: usize,
        /// Step budget of the walk.
        steps: usize,
    },
    /// There is nowhere to start walking.
    #[error("cannot walk a graph with no nodes")]
    EmptyGraph,
    /// The trial slot does not exist on the graph.
    #[error("trial {test_index} is out of range for a graph with {n_tests} trial(s)")]
    TrialOutOfRange {
        /// Requested trial slot.
        test_index: usize,
        /// Number of slots the graph carries.
        n_tests: usize,
    },
    /// Teleport probabilities are fractions in `[0, 1]`.
    #[error("teleport probability must lie in [0, 1] (got {got})")]
    InvalidTeleportProbability {
        /// The rejected probability.
        got: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`WalkError`] variants.
    enum WalkErrorCode for WalkError {
        /// The patience threshold exceeded the step budget.
        TauExceedsSteps => TauExceedsSteps { .. } => "WALK_TAU_EXCEEDS_STEPS",
        /// There is nowhere to start walking.
        EmptyGraph => EmptyGraph => "WALK_EMPTY_GRAPH",
        /// The trial slot does not exist on the graph.
        TrialOutOfRange => TrialOutOfRange { .. } => "WALK_TRIAL_OUT_OF_RANGE",
        /// Teleport probabilities are fractions in `[0, 1]`.
        InvalidTeleportProbability => InvalidTeleportProbability { .. } => "WALK_INVALID_TELEPORT_PROBABILITY",
    }
}

/// Error type covering every clusterwalk operation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClusterWalkError {
    /// Graph generation was misconfigured.
    #[error("graph generation failed: {0}")]
    Generator(#[from] GeneratorError),
    /// Information assignment was misconfigured.
    #[error("information assignment failed: {0}")]
    Information(#[from] InformationError),
    /// A walk was misconfigured.
    #[error("walk failed: {0}")]
    Walk(#[from] WalkError),
}

define_error_codes! {
    /// Stable codes describing [`ClusterWalkError`] variants.
    enum ClusterWalkErrorCode for ClusterWalkError {
        /// Graph generation was misconfigured.
        Generator => Generator { .. } => "CLUSTERWALK_GENERATOR_FAILURE",
        /// Information assignment was misconfigured.
        Information => Information { .. } => "CLUSTERWALK_INFORMATION_FAILURE",
        /// A walk was misconfigured.
        Walk => Walk { .. } => "CLUSTERWALK_WALK_FAILURE",
    }
}

impl ClusterWalkError {
    /// Returns the code of the wrapped component error.
    #[must_use]
    pub const fn source_code(&self) -> &'static str {
        match self {
            Self::Generator(error) => error.code().as_str(),
            Self::Information(error) => error.code().as_str(),
            Self::Walk(error) => error.code().as_str(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ClusterWalkError>;
