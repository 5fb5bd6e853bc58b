use crate::elimination_order::EliminationOrder;
use crate::graph::{BaseGraph, EliminationGraph, MutableGraph};
use std::cmp::max;

pub trait Selector: From<EliminationGraph> {
    type Value: Ord;

    fn graph(&self) -> &EliminationGraph;
    fn value(&self, v: usize) -> Self::Value;
    fn eliminate_vertex(&mut self, v: usize) -> Vec<usize> {
        self.graph_mut().eliminate_vertex(v)
    }
    fn graph_mut(&mut self) -> &mut EliminationGraph;
}

pub struct MinFillSelector {
    graph: EliminationGraph,
}

impl From<EliminationGraph> for MinFillSelector {
    fn from(graph: EliminationGraph) -> Self {
        Self { graph }
    }
}

impl Selector for MinFillSelector {
    type Value = usize;

    fn graph(&self) -> &EliminationGraph {
        &self.graph
    }

    fn value(&self, v: usize) -> usize {
        self.graph.fill_in_count(v)
    }

    fn graph_mut(&mut self) -> &mut EliminationGraph {
        &mut self.graph
    }
}

pub struct MinDegreeSelector {
    graph: EliminationGraph,
}

impl From<EliminationGraph> for MinDegreeSelector {
    fn from(graph: EliminationGraph) -> Self {
        Self { graph }
    }
}

impl Selector for MinDegreeSelector {
    type Value = usize;

    fn graph(&self) -> &EliminationGraph {
        &self.graph
    }

    fn value(&self, v: usize) -> usize {
        self.graph.degree(v)
    }

    fn graph_mut(&mut self) -> &mut EliminationGraph {
        &mut self.graph
    }
}

/// Min-fill with ties broken by degree.
pub struct MinFillDegreeSelector {
    inner: MinFillSelector,
}

impl From<EliminationGraph> for MinFillDegreeSelector {
    fn from(graph: EliminationGraph) -> Self {
        Self {
            inner: MinFillSelector::from(graph),
        }
    }
}

impl Selector for MinFillDegreeSelector {
    type Value = (usize, usize);

    fn graph(&self) -> &EliminationGraph {
        self.inner.graph()
    }

    fn value(&self, v: usize) -> (usize, usize) {
        (self.inner.value(v), self.inner.graph.degree(v))
    }

    fn graph_mut(&mut self) -> &mut EliminationGraph {
        self.inner.graph_mut()
    }
}

pub type MinFillDecomposer = HeuristicEliminationOrder<MinFillSelector>;
pub type MinDegreeDecomposer = HeuristicEliminationOrder<MinDegreeSelector>;
pub type MinFillDegreeDecomposer = HeuristicEliminationOrder<MinFillDegreeSelector>;

/// Greedy elimination: always eliminates the remaining vertex with the smallest
/// selector value, the smallest id among equal values.
pub struct HeuristicEliminationOrder<S: Selector> {
    selector: S,
}

impl<S: Selector> HeuristicEliminationOrder<S> {
    pub fn with_graph(graph: &EliminationGraph) -> Self {
        Self {
            selector: S::from(graph.clone()),
        }
    }

    pub fn compute(self) -> EliminationOrder {
        let mut selector = self.selector;
        let mut order = Vec::with_capacity(selector.graph().order());
        let mut width = 0;
        loop {
            let v = match selector
                .graph()
                .vertices()
                .min_by_key(|v| selector.value(*v))
            {
                Some(v) => v,
                None => break,
            };
            width = max(width, selector.graph().degree(v));
            order.push(v);
            let dropped = selector.eliminate_vertex(v);
            order.extend(dropped);
        }
        EliminationOrder::new(order, width)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpperboundHeuristicType {
    MinFill,
    MinDegree,
    MinFillDegree,
    All,
}

impl Default for UpperboundHeuristicType {
    fn default() -> Self {
        Self::MinFill
    }
}

impl UpperboundHeuristicType {
    pub fn compute(&self, graph: &EliminationGraph) -> EliminationOrder {
        match self {
            UpperboundHeuristicType::MinFill => MinFillDecomposer::with_graph(graph).compute(),
            UpperboundHeuristicType::MinDegree => MinDegreeDecomposer::with_graph(graph).compute(),
            UpperboundHeuristicType::MinFillDegree => {
                MinFillDegreeDecomposer::with_graph(graph).compute()
            }
            UpperboundHeuristicType::All => {
                let mut best = MinFillDecomposer::with_graph(graph).compute();
                for other in [
                    MinDegreeDecomposer::with_graph(graph).compute(),
                    MinFillDegreeDecomposer::with_graph(graph).compute(),
                ]
                .iter()
                {
                    if other.width() < best.width() {
                        best = other.clone();
                    }
                }
                best
            }
        }
    }
}

pub fn compute_upperbound(graph: &EliminationGraph) -> EliminationOrder {
    MinFillDecomposer::with_graph(graph).compute()
}
