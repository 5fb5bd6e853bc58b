use crate::error::Error;
use crate::graph::base_graph::BaseGraph;
use crate::graph::mutable_graph::MutableGraph;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::FromIterator;

/// Undirected graph keyed by vertex id. Vertices are iterated in ascending id
/// order, neighbor lists keep their insertion order.
///
/// A vertex never stays in the graph with an empty neighbor list after
/// `remove_edge` or `remove_vertex`; `contract_edge` is the only operation that
/// may leave the merged vertex isolated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EliminationGraph {
    data: BTreeMap<usize, Vec<usize>>,
}

impl EliminationGraph {
    pub fn from_edges(edges: &[(usize, usize)]) -> Self {
        edges.iter().copied().collect()
    }

    /// Every edge once, as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.data
            .iter()
            .flat_map(|(u, nb)| nb.iter().filter(move |v| u < *v).map(move |v| (*u, *v)))
    }

    pub fn size(&self) -> usize {
        self.data.values().map(Vec::len).sum::<usize>() / 2
    }

    fn detach(&mut self, u: usize, v: usize) -> bool {
        match self.data.get_mut(&u) {
            Some(nb) => {
                if let Some(pos) = nb.iter().position(|x| *x == v) {
                    nb.remove(pos);
                }
                if nb.is_empty() {
                    self.data.remove(&u);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }
}

impl FromIterator<(usize, usize)> for EliminationGraph {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut graph = EliminationGraph::new();
        for (u, v) in iter {
            graph.add_edge(u, v);
        }
        graph
    }
}

impl MutableGraph for EliminationGraph {
    fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) -> bool {
        if u == v || self.has_edge(u, v) {
            return false;
        }
        self.data.entry(u).or_insert_with(Vec::new).push(v);
        self.data.entry(v).or_insert_with(Vec::new).push(u);
        true
    }

    fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        if !self.has_edge(u, v) {
            return false;
        }
        self.detach(u, v);
        self.detach(v, u);
        true
    }

    fn remove_vertex(&mut self, u: usize) -> Vec<usize> {
        let nb = match self.data.remove(&u) {
            Some(nb) => nb,
            None => return vec![],
        };
        nb.into_iter().filter(|w| self.detach(*w, u)).collect()
    }

    fn contract_edge(&mut self, u: usize, v: usize) {
        assert!(
            self.has_edge(u, v),
            "{}",
            Error::invalid_operation(format!("cannot contract non-adjacent pair ({}, {})", u, v))
        );
        let v_nb = self.data.remove(&v).unwrap_or_default();
        if let Some(u_nb) = self.data.get_mut(&u) {
            u_nb.retain(|x| *x != v);
        }
        for n in v_nb.into_iter().filter(|n| *n != u) {
            let adjacent = self.has_edge(u, n);
            if let Some(n_nb) = self.data.get_mut(&n) {
                if adjacent {
                    n_nb.retain(|x| *x != v);
                } else if let Some(slot) = n_nb.iter_mut().find(|x| **x == v) {
                    *slot = u;
                }
            }
            if !adjacent {
                self.data.entry(u).or_insert_with(Vec::new).push(n);
            }
        }
    }
}

impl BaseGraph for EliminationGraph {
    fn degree(&self, u: usize) -> usize {
        self.data.get(&u).map_or(0, Vec::len)
    }

    fn order(&self) -> usize {
        self.data.len()
    }

    fn has_vertex(&self, u: usize) -> bool {
        self.data.contains_key(&u)
    }

    fn has_edge(&self, u: usize, v: usize) -> bool {
        match (self.data.get(&u), self.data.get(&v)) {
            (Some(nb), Some(_)) => nb.contains(&v),
            _ => false,
        }
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.data.keys().copied())
    }

    fn neighborhood(&self, u: usize) -> Result<&[usize], Error> {
        self.data
            .get(&u)
            .map(Vec::as_slice)
            .ok_or(Error::NotFound(u))
    }
}

impl Display for EliminationGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order: {}", self.order())?;
        for (v, nb) in &self.data {
            let nb: Vec<_> = nb.iter().map(|u| u.to_string()).collect();
            writeln!(f, "{}: [{}]", v, nb.join(", "))?;
        }
        Ok(())
    }
}
