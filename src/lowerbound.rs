use crate::graph::MutableGraph;
use fxhash::FxHashSet;
use std::cmp::max;

pub trait LowerboundHeuristic {
    fn compute<G: MutableGraph>(graph: &G) -> usize;
}

/// Contraction degeneracy bound: repeatedly contract a minimum degree vertex
/// into the neighbor it shares the smallest combined neighborhood with.
pub struct MinorMinWidth {}

impl LowerboundHeuristic for MinorMinWidth {
    fn compute<G: MutableGraph>(graph: &G) -> usize {
        let mut graph = graph.clone();
        let mut lb = 0;
        loop {
            let v = match graph.vertices().min_by_key(|v| graph.degree(*v)) {
                Some(v) => v,
                None => break,
            };
            lb = max(lb, graph.degree(v));
            let neighbors: Vec<usize> = match graph.neighborhood(v) {
                Ok(nb) => nb.to_vec(),
                Err(_) => break,
            };
            if neighbors.is_empty() {
                graph.remove_vertex(v);
                continue;
            }
            let partner = neighbors
                .iter()
                .copied()
                .min_by_key(|u| combined_neighborhood(&graph, &neighbors, *u))
                .unwrap_or(neighbors[0]);
            graph.contract_edge(v, partner);
        }
        lb
    }
}

fn combined_neighborhood<G: MutableGraph>(graph: &G, neighbors: &[usize], u: usize) -> usize {
    let mut union: FxHashSet<usize> = neighbors.iter().copied().collect();
    if let Ok(nb) = graph.neighborhood(u) {
        union.extend(nb.iter().copied());
    }
    union.len()
}

pub fn compute_lowerbound<G: MutableGraph>(graph: &G) -> usize {
    MinorMinWidth::compute(graph)
}
