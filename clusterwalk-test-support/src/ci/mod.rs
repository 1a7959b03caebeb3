//! Helpers that read CI environment configuration.

pub mod property_test_profile;
