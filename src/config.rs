//! Settings of a run, gathered in one place and passed down explicitly.

use std::path::{Path, PathBuf};
use crate::bench::BenchmarkHarness;
use crate::cust_error::{ImportError, ProcessingError};
use crate::graph::{EdgePolicy, UGraph};
use crate::heuristics::CoverStrategy;
use crate::report::ReportConfig;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RunConfig {
    /// Directory the graph files are looked up in.
    pub input_dir: PathBuf,
    pub strategy: CoverStrategy,
    pub edge_policy: EdgePolicy,
    pub iterations: usize,
    pub report: ReportConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            input_dir: PathBuf::from("input"),
            strategy: CoverStrategy::default(),
            edge_policy: EdgePolicy::default(),
            iterations: BenchmarkHarness::DEFAULT_ITERATIONS,
            report: ReportConfig::default(),
        }
    }
}

impl RunConfig {

    pub fn input_path<P: AsRef<Path>>(&self, file: P) -> PathBuf {
        self.input_dir.join(file)
    }

    /// Loads `file` from `self.input_dir` with `self.edge_policy`.
    pub fn load<P: AsRef<Path>>(&self, file: P) -> Result<UGraph, ImportError> {
        UGraph::from_file(self.input_path(file), self.edge_policy)
    }

    pub fn harness(&self) -> Result<BenchmarkHarness, ProcessingError> {
        BenchmarkHarness::new(self.iterations, self.strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_test() {
        let config = RunConfig::default();
        assert_eq!(config.input_path("t1.txt"), Path::new("input").join("t1.txt"));
        assert_eq!(config.harness().unwrap().iterations(), 10);
        assert_eq!(config.strategy, CoverStrategy::Complement);
        assert_eq!(config.edge_policy, EdgePolicy::Keep);
    }

    #[test]
    fn load_test() {
        let dir = std::env::temp_dir().join(format!("indie_cover_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("path.txt"), "a b\nb c\n").unwrap();
        let config = RunConfig { input_dir: dir.clone(), ..RunConfig::default() };
        let graph = config.load("path.txt").unwrap();
        assert_eq!(graph.num_nodes(), 3);
        assert!(matches!(config.load("missing.txt"), Err(ImportError::FileAccess { .. })));
        fs::remove_dir_all(&dir).unwrap();
    }
}
