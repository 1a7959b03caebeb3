use clusterwalk_core::{
    ClusterWalkError, ClusterWalkErrorCode, GeneratorError, GeneratorErrorCode, InformationError,
    InformationErrorCode, WalkError, WalkErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(GeneratorError::NoClusters, GeneratorErrorCode::NoClusters)]
#[case(
    GeneratorError::TooFewNodes { nodes: 2, clusters: 3 },
    GeneratorErrorCode::TooFewNodes,
)]
#[case(
    GeneratorError::InvalidAverageSize { got: -1.0 },
    GeneratorErrorCode::InvalidAverageSize,
)]
#[case(
    GeneratorError::InvalidProbability { name: "p_intra", got: 2.0 },
    GeneratorErrorCode::InvalidProbability,
)]
#[case(GeneratorError::NoTrials, GeneratorErrorCode::NoTrials)]
fn returns_expected_generator_code(
    #[case] error: GeneratorError,
    #[case] expected: GeneratorErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert!(error.code().as_str().starts_with("GENERATOR_"));
}

#[rstest]
#[case(
    InformationError::PercentageOutOfRange { got: 1.5 },
    "INFORMATION_PERCENTAGE_OUT_OF_RANGE",
)]
#[case(
    InformationError::TooManyClusters { requested: 4, available: 3 },
    "INFORMATION_TOO_MANY_CLUSTERS",
)]
#[case(
    InformationError::PercentageDecrease { previous: 0.5, target: 0.1 },
    "INFORMATION_PERCENTAGE_DECREASE",
)]
#[case(
    InformationError::UnknownCluster { cluster: 9, clusters: 3 },
    "INFORMATION_UNKNOWN_CLUSTER",
)]
fn returns_expected_information_code(#[case] error: InformationError, #[case] expected: &str) {
    assert_eq!(error.code().as_str(), expected);
    assert_eq!(error.code().to_string(), expected);
}

#[rstest]
#[case(WalkError::TauExceedsSteps { tau: 5, steps: 4 }, WalkErrorCode::TauExceedsSteps)]
#[case(WalkError::EmptyGraph, WalkErrorCode::EmptyGraph)]
#[case(
    WalkError::TrialOutOfRange { test_index: 3, n_tests: 2 },
    WalkErrorCode::TrialOutOfRange,
)]
#[case(
    WalkError::InvalidTeleportProbability { got: 1.5 },
    WalkErrorCode::InvalidTeleportProbability,
)]
fn returns_expected_walk_code(#[case] error: WalkError, #[case] expected: WalkErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(
    ClusterWalkError::from(GeneratorError::NoTrials),
    ClusterWalkErrorCode::Generator,
    "GENERATOR_NO_TRIALS",
)]
#[case(
    ClusterWalkError::from(InformationError::PercentageOutOfRange { got: -0.5 }),
    ClusterWalkErrorCode::Information,
    "INFORMATION_PERCENTAGE_OUT_OF_RANGE",
)]
#[case(
    ClusterWalkError::from(WalkError::EmptyGraph),
    ClusterWalkErrorCode::Walk,
    "WALK_EMPTY_GRAPH",
)]
fn umbrella_error_exposes_both_codes(
    #[case] error: ClusterWalkError,
    #[case] expected: ClusterWalkErrorCode,
    #[case] source: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.source_code(), source);
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn messages_name_the_offending_values() {
    let error = WalkError::TauExceedsSteps { tau: 12, steps: 10 };
    assert_eq!(error.to_string(), "tau (12) must not exceed steps (10)");
    let error = GeneratorError::TooFewNodes {
        nodes: 2,
        clusters: 5,
    };
    assert!(error.to_string().contains("(2)"));
}
