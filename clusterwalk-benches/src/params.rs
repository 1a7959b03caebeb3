//! Benchmark parameter types.
//!
//! Display implementations double as Criterion benchmark ids.

use std::fmt;

/// Parameters for a graph generation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GenerationBenchParams {
    /// Number of clusters.
    pub clusters: usize,
    /// Mean cluster size for the Erdos variant, or nodes per cluster for the
    /// community variant.
    pub cluster_size: usize,
}

impl fmt::Display for GenerationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clusters={},size={}", self.clusters, self.cluster_size)
    }
}

/// Parameters for a walk benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct WalkBenchParams {
    /// Number of clusters in the walked graph.
    pub clusters: usize,
    /// Steps per walk.
    pub steps: usize,
}

impl fmt::Display for WalkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clusters={},steps={}", self.clusters, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_name_every_dimension() {
        let generation = GenerationBenchParams {
            clusters: 8,
            cluster_size: 12,
        };
        assert_eq!(generation.to_string(), "clusters=8,size=12");
        let walk = WalkBenchParams {
            clusters: 4,
            steps: 100,
        };
        assert_eq!(walk.to_string(), "clusters=4,steps=100");
    }
}
