//! Implementation of a simple, undirected graph data structure over string labelled vertices,
//! with basic static and dynamic functions.
//!
//! Labels are interned into dense ids in order of first appearance. That order is also the
//! iteration order of `UGraph::nodes`, which the heuristics rely on for tie-breaking.

use fxhash::{FxHashMap, FxHashSet};
use log::info;
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use crate::cust_error::{ImportError, ProcessingError};

/// How `UGraph::add_edge` treats self-loops and parallel edges.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum EdgePolicy {
    /// Store every declared edge as is. A self-loop `v v` lists `v` twice in its own
    /// neighborhood and a repeated edge is listed twice on both sides.
    #[default]
    Keep,
    /// Drop self-loops and store parallel edges once.
    Simplify,
}

/// A simple undirected graph datastructure that supports deleting nodes.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct UGraph {
    adj_list: Vec<Option<Vec<usize>>>,
    labels: Vec<String>,
    ids: FxHashMap<String, usize>,
    policy: EdgePolicy,
}

impl Default for UGraph {
    fn default() -> Self {
        UGraph::new(EdgePolicy::default())
    }
}

// Static functions
impl UGraph {

    pub fn new(policy: EdgePolicy) -> Self {
        UGraph {
            adj_list: Vec::new(),
            labels: Vec::new(),
            ids: FxHashMap::default(),
            policy,
        }
    }

    /// Returns an `Iterator` over all nodes that have not yet been deleted, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item=usize> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .filter_map(|(i,adj)| {
                if adj.is_some() {
                    Some(i)
                } else {
                    None
                }
            })
    }

    /// Returns the number of nodes of `self`.
    pub fn num_nodes(&self) -> usize {
        self.nodes().count()
    }

    /// Returns the amount of reserved nodes of `self`. Deleted or not.
    pub fn num_reserved(&self) -> usize {
        self.adj_list.len()
    }

    /// Returns the number of edges, counting parallel edges and self-loops once per declaration.
    pub fn num_edges(&self) -> usize {
        self.edges().count()
    }

    /// Checks if `self` is empty (holds no undeleted nodes).
    pub fn is_empty(&self) -> bool {
        self.nodes().next().is_none()
    }

    /// Returns the label `node` was loaded with.
    pub fn label(&self, node: usize) -> &str {
        &self.labels[node]
    }

    /// Returns the id of `label`, or `None` if the label is unknown.
    pub fn id_of(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    /// Maps a set of ids to their labels.
    pub fn labels_of<'a>(&'a self, set: &FxHashSet<usize>) -> FxHashSet<&'a str> {
        set.iter().map(|node| self.label(*node)).collect()
    }

    /// Returns the neighborhood of `node`, or `None` if `node` was deleted.
    pub fn neighbors(&self, node: usize) -> Option<&[usize]> {
        self.adj_list[node].as_deref()
    }

    /// Returns the length of the neighbor list of `node`, or `None` if `node` was deleted.
    /// Parallel edges are counted with multiplicity.
    pub fn degree(&self, node: usize) -> Option<usize> {
        self.neighbors(node).map(|neighbors| neighbors.len())
    }

    /// Checks if `edge` exists.
    pub fn edge_exists(&self, edge: (usize, usize)) -> bool {
        if let Some(neighs) = self.neighbors(edge.0) {
            return neighs.contains(&edge.1)
        }
        false
    }

    /// Returns an iterator over all edges `(src, trg)` with `src <= trg`. Parallel edges are
    /// yielded once per declaration.
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize)> + '_ {
        self.nodes()
            .flat_map(move |i| {
                let neighs = self.adj_list[i].as_ref().expect("`i` exists");
                // A self-loop lists `i` twice in its own neighborhood.
                let loops = (neighs.iter().filter(|n| **n == i).count() + 1) / 2;
                neighs.iter()
                    .filter(move |n| i < **n)
                    .map(move |n| (i, *n))
                    .chain(std::iter::repeat((i, i)).take(loops))
            })
    }

    /// Checks that every edge is listed on both sides, with the same multiplicity.
    pub fn check_symmetry(&self) -> Result<(), ProcessingError> {
        let mut balance: FxHashMap<(usize, usize), isize> = FxHashMap::default();
        for node in self.nodes() {
            for neigh in self.neighbors(node).expect("`node` exists") {
                if node == *neigh {
                    continue
                }
                if self.adj_list[*neigh].is_none() {
                    return Err(ProcessingError::InvalidGraph(format!(
                        "`{}` lists the deleted node `{}`", self.label(node), self.label(*neigh))))
                }
                let key = (node.min(*neigh), node.max(*neigh));
                *balance.entry(key).or_insert(0) += if node < *neigh { 1 } else { -1 };
            }
        }
        if let Some(((src, trg), _)) = balance.iter().find(|(_, count)| **count != 0) {
            return Err(ProcessingError::InvalidGraph(format!(
                "edge between `{}` and `{}` is not symmetric", self.label(*src), self.label(*trg))))
        }
        Ok(())
    }
}

// Dynamic functions
impl UGraph {

    /// Returns the id of `label`, registering it as an isolated node if it is unseen.
    pub fn add_node(&mut self, label: &str) -> usize {
        if let Some(node) = self.ids.get(label) {
            return *node
        }
        let node = self.adj_list.len();
        self.adj_list.push(Some(Vec::new()));
        self.labels.push(label.to_owned());
        self.ids.insert(label.to_owned(), node);
        node
    }

    /// Adds the undirected edge `{src, trg}`, registering unseen labels first.
    pub fn add_edge(&mut self, src: &str, trg: &str) {
        let src = self.add_node(src);
        let trg = self.add_node(trg);
        if self.policy == EdgePolicy::Simplify && (src == trg || self.edge_exists((src, trg))) {
            return
        }
        self.adj_list[src].as_mut().expect("`src` was just added").push(trg);
        self.adj_list[trg].as_mut().expect("`trg` was just added").push(src);
    }

    /// Tries to delete `node` and strips every reference to it from its neighbors.
    /// Returns the old neighborhood of `node` or `None` if `node` was already deleted.
    ///
    /// Fails if a neighbor of `node` does not list `node` in return.
    pub fn delete_node(&mut self, node: usize) -> Result<Option<Vec<usize>>, ProcessingError> {
        let neighborhood = match self.adj_list[node].take() {
            Some(neighborhood) => neighborhood,
            None => return Ok(None),
        };
        let mut stripped = FxHashSet::default();
        for neighbor in &neighborhood {
            if *neighbor == node || !stripped.insert(*neighbor) {
                continue
            }
            match self.adj_list[*neighbor] {
                Some(ref mut nn) if nn.contains(&node) => nn.retain(|n| *n != node),
                _ => return Err(ProcessingError::InvalidGraph(format!(
                    "`{}` lists `{}` as neighbor, but not vice versa",
                    self.labels[node], self.labels[*neighbor]))),
            }
        }
        Ok(Some(neighborhood))
    }
}

impl UGraph {

    /// Reads a line based edge list and creates a `UGraph`.
    ///
    /// Invalid UTF-8 sequences in a line are replaced by `U+FFFD`, so distinct labels in another
    /// encoding can collapse into one label.
    /// A line `u v` declares an edge, a line `u` declares `u` as a node (a no-op if `u` is
    /// already known) and blank lines are skipped. Tokens after the second one are ignored.
    pub fn read_edge_list<R: BufRead>(input: R, policy: EdgePolicy) -> Result<Self, ImportError> {
        let mut graph = UGraph::new(policy);
        // Lines are split on raw bytes, so payloads in a legacy 8-bit encoding still load.
        for line in input.split(b'\n') {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            let mut s = line.split_whitespace();
            match (s.next(), s.next()) {
                (Some(src), Some(trg)) => graph.add_edge(src, trg),
                (Some(node), None) => {
                    graph.add_node(node);
                },
                _ => (),
            }
        }
        info!("Loaded graph with n={}, m={}", graph.num_nodes(), graph.num_edges());
        Ok(graph)
    }

    /// Opens `path` and reads it as an edge list, see `UGraph::read_edge_list`.
    pub fn from_file<P: AsRef<Path>>(path: P, policy: EdgePolicy) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ImportError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        UGraph::read_edge_list(BufReader::new(file), policy).map_err(|e| match e {
            ImportError::IoError(source) => ImportError::FileAccess {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Builds a `UGraph` from an explicit adjacency mapping, keeping the neighbor lists as
    /// given. Keys are registered in the given order, before any label that only occurs as a
    /// neighbor.
    ///
    /// Fails if the mapping is not symmetric.
    pub fn from_adjacency<I, S>(adjacency: I) -> Result<Self, ProcessingError>
    where
        I: IntoIterator<Item=(S, Vec<S>)>,
        S: AsRef<str>,
    {
        let adjacency: Vec<(S, Vec<S>)> = adjacency.into_iter().collect();
        let mut graph = UGraph::new(EdgePolicy::Keep);
        for (node, _) in &adjacency {
            graph.add_node(node.as_ref());
        }
        for (node, neighbors) in &adjacency {
            let node = graph.add_node(node.as_ref());
            for neigh in neighbors {
                let neigh = graph.add_node(neigh.as_ref());
                graph.adj_list[node].as_mut().expect("`node` was added").push(neigh);
            }
        }
        graph.check_symmetry()?;
        Ok(graph)
    }

    /// Creates a random graph on the nodes `0..n` where each edge exists with probability `p`.
    pub fn random<R: Rng>(n: usize, p: f64, rng: &mut R) -> Self {
        let mut graph = UGraph::new(EdgePolicy::Keep);
        let labels: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        for label in &labels {
            graph.add_node(label);
        }
        for i in 0..n {
            for j in i+1..n {
                if rng.gen_bool(p) {
                    graph.add_edge(&labels[i], &labels[j]);
                }
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(payload: &str) -> UGraph {
        let graph = UGraph::read_edge_list(Cursor::new(payload), EdgePolicy::Keep);
        assert!(graph.is_ok());
        graph.unwrap()
    }

    fn sorted_neighbors(graph: &UGraph, label: &str) -> Vec<String> {
        let node = graph.id_of(label).unwrap();
        let mut neighs: Vec<String> = graph.neighbors(node).unwrap()
            .iter()
            .map(|n| graph.label(*n).to_owned())
            .collect();
        neighs.sort();
        neighs
    }

    #[test]
    fn read_edge_list_test() {
        let graph = read("a b\nb c\n\n   \nd\nc a extra tokens\n");
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(sorted_neighbors(&graph, "a"), vec!["b", "c"]);
        assert_eq!(sorted_neighbors(&graph, "c"), vec!["a", "b"]);
        assert_eq!(graph.degree(graph.id_of("d").unwrap()), Some(0));
        assert!(graph.check_symmetry().is_ok());
    }

    #[test]
    fn single_token_does_not_overwrite_test() {
        let graph = read("a b\na\nb\n");
        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(sorted_neighbors(&graph, "a"), vec!["b"]);
        assert_eq!(sorted_neighbors(&graph, "b"), vec!["a"]);
    }

    #[test]
    fn empty_payload_test() {
        let graph = read("");
        assert!(graph.is_empty());
        assert_eq!(graph.num_nodes(), 0);
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn cp1251_payload_test() {
        let mut payload = vec![0xCA, 0xE8, 0xE5, 0xE2, b' ', 0xCC, 0xEE, 0xF1, b'\r', b'\n'];
        payload.extend_from_slice(b"a b\n");
        let graph = UGraph::read_edge_list(Cursor::new(payload.clone()), EdgePolicy::Keep);
        assert!(graph.is_ok());
        let graph = graph.unwrap();
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(sorted_neighbors(&graph, "a"), vec!["b"]);

        let path = std::env::temp_dir().join(format!("indie_cover_cp1251_{}.txt", std::process::id()));
        std::fs::write(&path, &payload).unwrap();
        let from_file = UGraph::from_file(&path, EdgePolicy::Keep);
        std::fs::remove_file(&path).unwrap();
        assert!(from_file.is_ok());
        assert_eq!(from_file.unwrap().num_nodes(), 4);
    }

    #[test]
    fn isolated_node_test() {
        let graph = read("x\n");
        assert_eq!(graph.num_nodes(), 1);
        assert_eq!(graph.neighbors(graph.id_of("x").unwrap()), Some(&[][..]));
    }

    #[test]
    fn keep_policy_test() {
        let graph = read("a b\na b\nc c\n");
        let a = graph.id_of("a").unwrap();
        let c = graph.id_of("c").unwrap();
        assert_eq!(graph.degree(a), Some(2));
        assert_eq!(graph.neighbors(c), Some(&[c, c][..]));
        assert_eq!(graph.num_edges(), 3);
        assert!(graph.check_symmetry().is_ok());
    }

    #[test]
    fn simplify_policy_test() {
        let graph = UGraph::read_edge_list(Cursor::new("a b\nb a\nc c\n"), EdgePolicy::Simplify)
            .unwrap();
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.degree(graph.id_of("a").unwrap()), Some(1));
        assert_eq!(graph.degree(graph.id_of("c").unwrap()), Some(0));
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn load_is_idempotent_test() {
        let payload = "1 2\n2 3\n3 1\n4\n2 5\n";
        let first = read(payload);
        let second = read(payload);
        assert_eq!(first, second);
        for node in first.nodes() {
            let label = first.label(node);
            assert_eq!(sorted_neighbors(&first, label), sorted_neighbors(&second, label));
        }
    }

    #[test]
    fn missing_file_test() {
        let graph = UGraph::from_file("input/does-not-exist.txt", EdgePolicy::Keep);
        match graph {
            Err(ImportError::FileAccess { path, .. }) => {
                assert_eq!(path, Path::new("input/does-not-exist.txt"))
            },
            _ => panic!("expected a `FileAccess` error"),
        }
    }

    #[test]
    fn from_adjacency_test() {
        let graph = UGraph::from_adjacency(vec![
            ("a", vec!["b", "c"]),
            ("b", vec!["a"]),
            ("c", vec!["a"]),
        ]);
        assert!(graph.is_ok());
        assert_eq!(graph.unwrap().num_edges(), 2);
        let asym = UGraph::from_adjacency(vec![
            ("a", vec!["b"]),
            ("b", vec![]),
        ]);
        assert!(matches!(asym, Err(ProcessingError::InvalidGraph(_))));
    }

    #[test]
    fn delete_node_test() {
        let mut graph = read("a b\nb c\nc a\nc d\n");
        let c = graph.id_of("c").unwrap();
        let old = graph.delete_node(c);
        assert!(matches!(old, Ok(Some(ref neighs)) if neighs.len() == 3));
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.degree(graph.id_of("d").unwrap()), Some(0));
        assert!(matches!(graph.delete_node(c), Ok(None)));
        assert!(graph.check_symmetry().is_ok());
    }

    #[test]
    fn delete_node_parallel_edges_test() {
        let mut graph = read("a b\na b\nb b\n");
        let a = graph.id_of("a").unwrap();
        let b = graph.id_of("b").unwrap();
        assert!(graph.delete_node(a).is_ok());
        assert_eq!(graph.neighbors(b), Some(&[b, b][..]));
    }

    #[test]
    fn random_graph_test() {
        let mut rng = rand::thread_rng();
        let graph = UGraph::random(30, 0.2, &mut rng);
        assert_eq!(graph.num_nodes(), 30);
        assert!(graph.check_symmetry().is_ok());
        let complete = UGraph::random(6, 1.0, &mut rng);
        assert_eq!(complete.num_edges(), 15);
    }
}
