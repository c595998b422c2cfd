//! Implementation of the greedy heuristics for the Independent Set and the Vertex Cover Problem.
//!
//! Neither heuristic is exact. The independent set is maximal with respect to the greedy order
//! used, and the edge elimination cover is at most twice as large as an optimal cover.

use fxhash::FxHashSet;
use log::{debug, trace, warn};
use crate::cust_error::ProcessingError;
use crate::graph::UGraph;
use crate::vc_instance::VCInstance;

/// A maximal independent set as computed by `UGraph::independent_set`.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct IndependentSet(FxHashSet<usize>);

impl IndependentSet {

    pub fn as_set(&self) -> &FxHashSet<usize> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, node: usize) -> bool {
        self.0.contains(&node)
    }
}

/// Policy used to derive a vertex cover.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum CoverStrategy {
    /// All nodes that are not in the independent set.
    #[default]
    Complement,
    /// Repeatedly takes both ends of an edge and removes them from a working copy.
    EdgeElimination,
}

/// The two sets computed for a graph in one run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Analysis {
    pub independent_set: IndependentSet,
    pub vertex_cover: FxHashSet<usize>,
}

impl UGraph {

    /// Computes a maximal independent set by repeatedly selecting the remaining node with the
    /// smallest degree and removing it together with its neighbors.
    ///
    /// The degree is the length of the neighbor list in `self` and does not shrink as nodes are
    /// removed. Ties go to the node that comes first in `self.nodes()`.
    pub fn independent_set(&self) -> IndependentSet {
        let mut removed = vec![false; self.num_reserved()];
        let mut independent = FxHashSet::default();
        loop {
            let min_node = self.nodes()
                .filter(|node| !removed[*node])
                .min_by_key(|node| self.degree(*node).expect("`node` exists"));
            let node = match min_node {
                Some(node) => node,
                None => break,
            };
            trace!("select `{}`", self.label(node));
            independent.insert(node);
            removed[node] = true;
            for neigh in self.neighbors(node).expect("`node` exists") {
                removed[*neigh] = true;
            }
        }
        debug!("independent set of size {}", independent.len());
        IndependentSet(independent)
    }

    /// Returns all nodes of `self` that are not in `independent`.
    pub fn complement_cover(&self, independent: &IndependentSet) -> FxHashSet<usize> {
        let cover: FxHashSet<usize> = self.nodes()
            .filter(|node| !independent.contains(*node))
            .collect();
        debug!("complement cover of size {}", cover.len());
        cover
    }

    /// Computes a vertex cover by edge elimination on a working copy of `self`, see
    /// `VCInstance::edge_elimination`. `self` is left untouched.
    pub fn edge_elimination_cover(&self) -> Result<FxHashSet<usize>, ProcessingError> {
        let cover = VCInstance::new(self).edge_elimination()?;
        debug!("edge elimination cover of size {}", cover.len());
        Ok(cover)
    }

    /// Computes a vertex cover with `strategy`. `independent` has to be the independent set of
    /// `self`; only `CoverStrategy::Complement` reads it.
    pub fn vertex_cover(&self, strategy: CoverStrategy, independent: &IndependentSet)
        -> Result<FxHashSet<usize>, ProcessingError> {
        match strategy {
            CoverStrategy::Complement => Ok(self.complement_cover(independent)),
            CoverStrategy::EdgeElimination => self.edge_elimination_cover(),
        }
    }

    /// Computes the independent set and then the vertex cover with `strategy`.
    pub fn analyze(&self, strategy: CoverStrategy) -> Result<Analysis, ProcessingError> {
        let independent_set = self.independent_set();
        let vertex_cover = self.vertex_cover(strategy, &independent_set)?;
        Ok(Analysis { independent_set, vertex_cover })
    }

    /// Checks `analysis` against `self`. The independent set has to be maximal, and a cover from
    /// `CoverStrategy::EdgeElimination` has to cover every edge. A complement cover can miss the
    /// self-loop of a node in the independent set, which is only logged.
    pub fn check_analysis(&self, analysis: &Analysis, strategy: CoverStrategy)
        -> Result<(), ProcessingError> {
        if !self.is_maximal_independent_set(analysis.independent_set.as_set()) {
            return Err(ProcessingError::InvalidSolution(
                "independent set is not maximal".to_owned()))
        }
        if !self.is_vertex_cover(&analysis.vertex_cover) {
            match strategy {
                CoverStrategy::EdgeElimination => return Err(ProcessingError::InvalidSolution(
                    "vertex cover misses an edge".to_owned())),
                CoverStrategy::Complement => warn!("complement cover misses a self-loop"),
            }
        }
        Ok(())
    }

    /// Checks that no two distinct nodes in `set` are adjacent.
    pub fn is_independent_set(&self, set: &FxHashSet<usize>) -> bool {
        set.iter().all(|node| {
            match self.neighbors(*node) {
                Some(neighs) => neighs.iter().all(|n| n == node || !set.contains(n)),
                None => false,
            }
        })
    }

    /// Checks that `set` is independent and that every other node has a neighbor in `set`.
    pub fn is_maximal_independent_set(&self, set: &FxHashSet<usize>) -> bool {
        self.is_independent_set(set) && self.nodes()
            .filter(|node| !set.contains(node))
            .all(|node| {
                self.neighbors(node)
                    .expect("`node` exists")
                    .iter()
                    .any(|n| set.contains(n))
            })
    }

    /// Checks that every edge of `self` has an end in `set`.
    pub fn is_vertex_cover(&self, set: &FxHashSet<usize>) -> bool {
        self.edges().all(|(src, trg)| set.contains(&src) || set.contains(&trg))
    }
}

impl VCInstance {

    /// Repeatedly takes the first remaining node `u`. If `u` is isolated it is removed,
    /// otherwise `u` and the first node `v` of its neighbor list are added to the solution and
    /// removed from the graph, until the graph is empty.
    /// Only `u` and `v` leave the graph, the other neighbors stay to be covered later.
    /// Each step covers the edge `{u, v}` with at most two nodes (one if `v == u` is a
    /// self-loop), so the resulting solution is, in the worst case, twice as large as the
    /// optimal solution.
    ///
    /// Returns the approximated solution.
    pub fn edge_elimination(mut self) -> Result<FxHashSet<usize>, ProcessingError> {
        // Deleted nodes never come back, so a single pass visits the first remaining node at
        // every step.
        for node in 0..self.graph.num_reserved() {
            let first = match self.graph.neighbors(node) {
                Some(neighs) => neighs.first().copied(),
                None => continue,
            };
            match first {
                Some(neigh) => {
                    trace!("eliminate `{}` - `{}`", self.graph.label(node), self.graph.label(neigh));
                    self.add_to_solution(node)?;
                    self.add_to_solution(neigh)?;
                },
                None => {
                    self.delete_node(node)?;
                },
            }
        }
        debug_assert!(self.graph.is_empty());
        Ok(self.into_solution())
    }
}
