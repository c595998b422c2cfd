use crate::graph::UGraph;
use fxhash::FxHashSet;
use crate::cust_error::ProcessingError;
use std::io::{Write};
use std::io;

/// A working copy of a graph together with the partial solution collected from it.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct VCInstance {
    pub graph: UGraph,
    pub solution: FxHashSet<usize>,
}

impl VCInstance {

    /// Creates an instance on a clone of `graph`, so that `graph` stays reusable.
    pub fn new(graph: &UGraph) -> Self {
        VCInstance {
            graph: graph.clone(),
            solution: FxHashSet::default(),
        }
    }

    /// Adds `node` to `self.solution` and removes it from `self.graph`.
    /// Returns `true` if a node was added, returns `false` if `node` was already removed.
    pub fn add_to_solution(&mut self, node: usize) -> Result<bool, ProcessingError> {
        if self.graph.delete_node(node)?.is_some() {
            self.solution.insert(node);
            return Ok(true)
        }
        Ok(false)
    }

    /// Removes `node` from `self.graph` without adding it to the solution.
    /// Returns `true` if a node was removed, returns `false` otherwise.
    pub fn delete_node(&mut self, node: usize) -> Result<bool, ProcessingError> {
        Ok(self.graph.delete_node(node)?.is_some())
    }

    /// Consumes `self` and returns the collected solution.
    pub fn into_solution(self) -> FxHashSet<usize> {
        self.solution
    }

}

impl VCInstance {

    /// Writes one label of `solution` per line to a `Write` type.
    pub fn write_solution<W: Write>(graph: &UGraph, solution: &FxHashSet<usize>, mut out: W)
        -> Result<(), io::Error> {
        for elem in solution {
            writeln!(out, "{}", graph.label(*elem))?;
        }
        Ok(())
    }

}
