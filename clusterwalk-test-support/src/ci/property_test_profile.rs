//! Property-test run profile read from the environment.
//!
//! Suites share one case-count and fork policy so CI can scale every
//! property run with two variables.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const CLUSTERWALK_PBT_CASES_ENV_KEY: &str = "CLUSTERWALK_PBT_CASES";
/// Environment variable toggling forked proptest execution.
pub const CLUSTERWALK_PBT_FORK_ENV_KEY: &str = "CLUSTERWALK_PBT_FORK";

/// Case count and fork mode for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads the profile from the process environment, falling back to the
    /// given defaults for unset or malformed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use clusterwalk_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::from_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    /// Loads the profile through `lookup` instead of the process environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use clusterwalk_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::from_lookup(64, false, |key| {
    ///     (key == "CLUSTERWALK_PBT_CASES").then(|| "8".to_owned())
    /// });
    /// assert_eq!(profile.cases(), 8);
    /// assert!(!profile.fork());
    /// ```
    #[must_use]
    pub fn from_lookup(
        default_cases: u32,
        default_fork: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            cases: read_override(&lookup, CLUSTERWALK_PBT_CASES_ENV_KEY, parse_cases)
                .unwrap_or(default_cases),
            fork: read_override(&lookup, CLUSTERWALK_PBT_FORK_ENV_KEY, parse_switch)
                .unwrap_or(default_fork),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn read_override<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    parse: fn(&str) -> Result<T, &'static str>,
) -> Option<T> {
    let raw = lookup(key)?;
    match parse(&raw) {
        Ok(value) => Some(value),
        Err(reason) => {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason,
                "ignoring malformed property-test override",
            );
            None
        }
    }
}

fn parse_cases(raw: &str) -> Result<u32, &'static str> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("case count must be positive"),
        Ok(cases) => Ok(cases),
        Err(_) => Err("case count must be an unsigned integer"),
    }
}

fn parse_switch(raw: &str) -> Result<bool, &'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true/false, 1/0, yes/no or on/off"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn profile(cases: Option<&str>, fork: Option<&str>, default_fork: bool) -> ProptestRunProfile {
        ProptestRunProfile::from_lookup(64, default_fork, |key| match key {
            CLUSTERWALK_PBT_CASES_ENV_KEY => cases.map(str::to_owned),
            CLUSTERWALK_PBT_FORK_ENV_KEY => fork.map(str::to_owned),
            _ => None,
        })
    }

    #[test]
    fn defaults_apply_without_overrides() {
        assert_eq!(profile(None, None, false), ProptestRunProfile { cases: 64, fork: false });
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn valid_case_overrides_win(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(profile(Some(raw), None, false).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("many")]
    fn malformed_case_overrides_fall_back(#[case] raw: &str) {
        assert_eq!(profile(Some(raw), None, false).cases(), 64);
    }

    #[rstest]
    #[case("true", true)]
    #[case("ON", true)]
    #[case("1", true)]
    #[case("no", false)]
    #[case("False", false)]
    #[case("0", false)]
    fn valid_fork_overrides_win(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(profile(None, Some(raw), !expected).fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("maybe")]
    #[case("2")]
    fn malformed_fork_overrides_fall_back(#[case] raw: &str) {
        assert!(profile(None, Some(raw), true).fork());
    }
}
