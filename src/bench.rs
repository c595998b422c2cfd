//! Repeated, timed runs of the heuristics on one graph.

use log::{debug, info};
use std::hint::black_box;
use std::time::Instant;
use crate::cust_error::ProcessingError;
use crate::graph::UGraph;
use crate::heuristics::CoverStrategy;

/// Elapsed microseconds of each iteration, in order.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Timings {
    samples: Vec<u64>,
}

impl Timings {

    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    /// Returns the arithmetic mean of the samples, or `None` if there are none.
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None
        }
        let total: u64 = self.samples.iter().sum();
        Some(total as f64 / self.samples.len() as f64)
    }
}

impl From<Vec<u64>> for Timings {
    fn from(samples: Vec<u64>) -> Timings {
        Timings { samples }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BenchmarkHarness {
    iterations: usize,
    strategy: CoverStrategy,
}

impl BenchmarkHarness {

    pub const DEFAULT_ITERATIONS: usize = 10;

    pub fn new(iterations: usize, strategy: CoverStrategy) -> Result<Self, ProcessingError> {
        if iterations == 0 {
            return Err(ProcessingError::InvalidParameter(
                "`iterations` has to be at least 1".to_owned()))
        }
        Ok(BenchmarkHarness { iterations, strategy })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Times `self.iterations` runs of `UGraph::analyze` on `graph`. Every run recomputes the
    /// independent set and works on a fresh copy of `graph`.
    pub fn run(&self, graph: &UGraph) -> Result<Timings, ProcessingError> {
        let mut samples = Vec::with_capacity(self.iterations);
        for i in 0..self.iterations {
            let start = Instant::now();
            let analysis = graph.analyze(self.strategy)?;
            let elapsed = start.elapsed().as_micros() as u64;
            black_box(analysis);
            debug!("iteration {}: {}us", i, elapsed);
            samples.push(elapsed);
        }
        let timings = Timings::from(samples);
        if let Some(mean) = timings.mean() {
            info!("{:?} on n={}: mean {}us over {} iterations",
                self.strategy, graph.num_nodes(), mean, self.iterations);
        }
        Ok(timings)
    }
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        BenchmarkHarness {
            iterations: BenchmarkHarness::DEFAULT_ITERATIONS,
            strategy: CoverStrategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn mean_test() {
        assert_eq!(Timings::default().mean(), None);
        assert_eq!(Timings::from(vec![1, 2, 3, 6]).mean(), Some(3.0));
    }

    #[test]
    fn zero_iterations_test() {
        let harness = BenchmarkHarness::new(0, CoverStrategy::Complement);
        assert!(matches!(harness, Err(ProcessingError::InvalidParameter(_))));
    }

    #[test]
    fn run_test() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = UGraph::random(50, 0.1, &mut rng);
        let check = graph.clone();
        assert_eq!(BenchmarkHarness::default().run(&graph).unwrap().samples().len(), 10);
        let harness = BenchmarkHarness::new(3, CoverStrategy::EdgeElimination).unwrap();
        let timings = harness.run(&graph).unwrap();
        assert_eq!(timings.samples().len(), 3);
        assert!(timings.mean().is_some());
        assert_eq!(graph, check);
    }
}
