use crate::error::Error;
use crate::graph::MutableGraph;
use crate::tree_decomposition::TreeDecomposition;
use fxhash::FxHashSet;
use std::cmp::max;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EliminationOrder {
    order: Vec<usize>,
    width: usize,
}

impl EliminationOrder {
    pub fn new(order: Vec<usize>, width: usize) -> Self {
        Self { order, width }
    }

    pub fn from_order<G: MutableGraph>(graph: &G, order: Vec<usize>) -> Self {
        let width = get_width(graph, &order);
        Self { order, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    pub fn decompose<G: MutableGraph>(&self, graph: &G) -> TreeDecomposition {
        build_decomposition(graph, &self.order)
    }
}

/// Induced width of `order`. Vertices that were already dropped from the graph
/// as isolated neighbors contribute nothing.
pub fn get_width<G: MutableGraph>(graph: &G, order: &[usize]) -> usize {
    let mut graph = graph.clone();
    order.iter().fold(0, |width, v| {
        let degree = graph.degree(*v);
        graph.eliminate_vertex(*v);
        max(width, degree)
    })
}

/// Replays `order` and nests every bag below the first existing bag that
/// contains the neighborhood its vertex had at elimination time. The vertex
/// eliminated last becomes the root. Vertices the order does not mention are
/// handled afterwards in ascending id order; a vertex that was already dropped
/// from the graph gets an empty neighborhood.
pub fn build_decomposition<G: MutableGraph>(graph: &G, order: &[usize]) -> TreeDecomposition {
    let mut working = graph.clone();
    let mut seen: FxHashSet<usize> = FxHashSet::default();
    let mut stack: Vec<(usize, Vec<usize>)> = Vec::with_capacity(graph.order());
    let rest: Vec<usize> = graph.vertices().collect();
    for v in order.iter().chain(rest.iter()).copied() {
        if !seen.insert(v) {
            continue;
        }
        let nb = working
            .neighborhood(v)
            .map(<[usize]>::to_vec)
            .unwrap_or_default();
        stack.push((v, nb));
        working.eliminate_vertex(v);
    }

    let mut td = TreeDecomposition::default();
    while let Some((v, nb)) = stack.pop() {
        if td.order() == 0 {
            let node = td.add_node(v);
            node.bag.extend(nb);
            node.bag.insert(v);
            td.set_root(v);
            continue;
        }
        let parent = td
            .nodes()
            .find(|node| nb.iter().all(|x| node.bag.contains(x)))
            .map(|node| node.id)
            .unwrap_or_else(|| {
                panic!(
                    "{}",
                    Error::invalid_operation(format!(
                        "no bag contains the neighborhood of vertex {}",
                        v
                    ))
                )
            });
        let node = td.add_node(v);
        node.bag.extend(nb);
        node.bag.insert(v);
        td.connect_to_parent(parent, v);
    }
    td
}

#[cfg(test)]
mod tests {
    use crate::elimination_order::{build_decomposition, get_width, EliminationOrder};
    use crate::graph::{BaseGraph, EliminationGraph};

    fn scenario() -> EliminationGraph {
        EliminationGraph::from_edges(&[
            (1, 2),
            (1, 3),
            (1, 9),
            (3, 2),
            (4, 2),
            (5, 2),
            (6, 3),
            (7, 3),
            (5, 8),
            (5, 9),
        ])
    }

    #[test]
    fn width_of_order() {
        let graph = scenario();
        assert_eq!(get_width(&graph, &[4, 6, 7, 8, 3, 9, 1, 2, 5]), 2);
        assert_eq!(get_width(&graph, &[4, 6, 7, 8, 9, 1, 2, 3, 5]), 3);
        assert_eq!(get_width(&graph, &[2, 1, 3, 4, 5, 6, 7, 8, 9]), 5);
    }

    #[test]
    fn width_skips_dropped_vertices() {
        let graph = EliminationGraph::from_edges(&[(0, 1), (1, 2)]);
        // eliminating 0 then 2 drops 1 on the way
        assert_eq!(get_width(&graph, &[0, 2, 1]), 1);
    }

    #[test]
    fn decomposition_of_scenario() {
        let graph = scenario();
        let order = EliminationOrder::from_order(&graph, vec![4, 6, 7, 8, 3, 9, 1, 2, 5]);
        assert_eq!(order.width(), 2);
        let td = order.decompose(&graph);
        assert_eq!(td.order(), 9);
        assert!(td.nodes().all(|n| n.bag.len() <= 3));
        assert_eq!(td.width(), 2);
        assert!(td.verify(&graph).is_ok());
    }

    #[test]
    fn root_is_last_eliminated() {
        let graph = scenario();
        let td = build_decomposition(&graph, &[4, 6, 7, 8, 3, 9, 1, 2, 5]);
        assert_eq!(td.root(), Some(5));
        assert_eq!(td.node(5).unwrap().parent, None);
    }

    #[test]
    fn partial_order_is_completed() {
        let graph = scenario();
        let td = build_decomposition(&graph, &[4, 6]);
        assert_eq!(td.order(), graph.order());
        assert_eq!(td.node(4).unwrap().bag.len(), 2);
        assert!(td.verify(&graph).is_ok());
    }

    #[test]
    fn disconnected_graph() {
        let graph = EliminationGraph::from_edges(&[(0, 1), (1, 2), (0, 2), (5, 6)]);
        let td = build_decomposition(&graph, &[5, 0, 1, 2]);
        assert_eq!(td.order(), 5);
        assert!(td.verify(&graph).is_ok());
    }

    #[test]
    fn dropped_vertex_outside_order() {
        let graph = EliminationGraph::from_edges(&[(0, 1)]);
        let td = build_decomposition(&graph, &[0]);
        assert_eq!(td.root(), Some(1));
        assert_eq!(td.node(0).unwrap().parent, Some(1));
        assert!(td.verify(&graph).is_ok());
    }

    #[test]
    fn empty_graph() {
        let td = build_decomposition(&EliminationGraph::default(), &[]);
        assert_eq!(td.order(), 0);
        assert_eq!(td.width(), 0);
    }
}
