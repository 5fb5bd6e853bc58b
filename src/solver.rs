use crate::elimination_order::EliminationOrder;
use crate::exact::QuickBB;
#[cfg(feature = "log")]
use crate::graph::BaseGraph;
use crate::graph::EliminationGraph;
use crate::timeout::stopper_for;
use crate::tree_decomposition::TreeDecomposition;
use crate::upperbound::UpperboundHeuristicType;
#[cfg(feature = "log")]
use log::info;
use std::time::Duration;

pub use crate::elimination_order::build_decomposition;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub treewidth: usize,
    pub elimination_order: Vec<usize>,
    pub optimal: bool,
}

impl Solution {
    pub fn decompose(&self, graph: &EliminationGraph) -> TreeDecomposition {
        build_decomposition(graph, &self.elimination_order)
    }
}

impl From<Solution> for EliminationOrder {
    fn from(solution: Solution) -> Self {
        EliminationOrder::new(solution.elimination_order, solution.treewidth)
    }
}

/// `upperbound` only seeds the incumbent of the exact search.
#[derive(Clone, Copy, Debug, Default)]
pub struct Solver {
    time_limit: Option<Duration>,
    upperbound: UpperboundHeuristicType,
}

impl Solver {
    pub fn default_exact() -> Self {
        Self::default()
    }

    impl_setter!(self, time_limit, Option<Duration>);
    impl_setter!(self, upperbound, UpperboundHeuristicType);

    pub fn solve(&self, graph: &EliminationGraph) -> Solution {
        #[cfg(feature = "log")]
        info!("attempting to solve graph with {} vertices", graph.order());
        let result = QuickBB::with_graph(graph)
            .upperbound_heuristic(self.upperbound)
            .stopper(stopper_for(self.time_limit))
            .compute();
        Solution {
            treewidth: result.treewidth,
            elimination_order: result.elimination_order,
            optimal: result.optimal,
        }
    }
}

/// Exact treewidth of `graph`, or the best width found within `time_limit`.
pub fn solve(graph: &EliminationGraph, time_limit: Option<Duration>) -> Solution {
    Solver::default_exact().time_limit(time_limit).solve(graph)
}
