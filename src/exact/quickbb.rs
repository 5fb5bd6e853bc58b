use crate::exact::SearchResult;
use crate::graph::{BaseGraph, EliminationGraph, MutableGraph};
use crate::lowerbound::compute_lowerbound;
use crate::timeout::{stopper_for, NeverStop, Stopper};
use crate::upperbound::UpperboundHeuristicType;
use std::cmp::max;
use std::time::Duration;

#[cfg(feature = "log")]
use log::{debug, info};

/// Depth-first branch and bound over elimination orders.
///
/// Every search node eliminates one vertex from a private copy of the
/// graph. A node is explored only if its bound
/// `max(width so far, minor-min-width of the remaining graph)` is strictly
/// smaller than the best width found so far. Simplicial vertices, and almost
/// simplicial vertices whose degree does not exceed the lower bound of the
/// input, are eliminated without branching.
pub struct QuickBB {
    graph: EliminationGraph,
    upperbound_heuristic: UpperboundHeuristicType,
    stopper: Box<dyn Stopper>,
}

impl QuickBB {
    pub fn with_graph(graph: &EliminationGraph) -> Self {
        Self {
            graph: graph.clone(),
            upperbound_heuristic: UpperboundHeuristicType::default(),
            stopper: Box::new(NeverStop),
        }
    }

    impl_setter!(self, upperbound_heuristic, UpperboundHeuristicType);
    impl_setter!(self, stopper, Box<dyn Stopper>);

    pub fn time_limit(self, time_limit: Option<Duration>) -> Self {
        self.stopper(stopper_for(time_limit))
    }

    pub fn compute(self) -> SearchResult {
        let QuickBB {
            graph,
            upperbound_heuristic,
            mut stopper,
        } = self;
        stopper.init();

        if graph.order() < 2 {
            return SearchResult {
                treewidth: 0,
                elimination_order: graph.vertices().collect(),
                lowerbound: 0,
                optimal: true,
            };
        }

        let upperbound = upperbound_heuristic.compute(&graph);
        let lowerbound = compute_lowerbound(&graph);
        #[cfg(feature = "log")]
        info!(
            "order {} size {}: lowerbound {} upperbound {}",
            graph.order(),
            graph.size(),
            lowerbound,
            upperbound.width()
        );
        if lowerbound >= upperbound.width() {
            return SearchResult {
                treewidth: upperbound.width(),
                elimination_order: upperbound.into_order(),
                lowerbound,
                optimal: true,
            };
        }

        let mut ctx = SearchContext {
            best_upperbound: upperbound.width(),
            best_order: upperbound.into_order(),
            lowerbound,
            stopper: stopper.as_mut(),
            stopped: false,
            visited: 0,
        };
        let mut order = Vec::with_capacity(graph.order());
        ctx.branch_and_bound(&graph, &mut order, lowerbound, 0);

        #[cfg(feature = "log")]
        info!(
            "search {} after {} nodes with width {}",
            if ctx.stopped { "stopped" } else { "finished" },
            ctx.visited,
            ctx.best_upperbound
        );
        SearchResult {
            treewidth: ctx.best_upperbound,
            elimination_order: ctx.best_order,
            lowerbound,
            optimal: !ctx.stopped,
        }
    }
}

struct SearchContext<'a> {
    best_upperbound: usize,
    best_order: Vec<usize>,
    lowerbound: usize,
    stopper: &'a mut dyn Stopper,
    stopped: bool,
    visited: usize,
}

impl<'a> SearchContext<'a> {
    fn should_stop(&mut self) -> bool {
        if !self.stopped {
            self.stopped = self.stopper.stop();
            #[cfg(feature = "handle-ctrlc")]
            {
                self.stopped = self.stopped || crate::signals::received_ctrl_c();
            }
        }
        self.stopped
    }

    /// `f` bounds the width of every completion of `order`, `g` is the width
    /// of `order` itself.
    fn branch_and_bound(
        &mut self,
        graph: &EliminationGraph,
        order: &mut Vec<usize>,
        f: usize,
        g: usize,
    ) {
        self.visited += 1;
        if graph.order() < 2 {
            debug_assert_eq!(f, g);
            if f < self.best_upperbound {
                #[cfg(feature = "log")]
                debug!("improved upperbound {} -> {}", self.best_upperbound, f);
                self.best_upperbound = f;
                self.best_order.clear();
                self.best_order.extend(order.iter().copied().chain(graph.vertices()));
            }
            return;
        }

        let lowerbound = self.lowerbound;
        let candidates: Vec<usize> = match graph.vertices().find(|v| {
            graph.is_simplicial(*v)
                || (graph.degree(*v) <= lowerbound && graph.is_almost_simplicial(*v))
        }) {
            Some(v) => vec![v],
            None => graph.vertices().collect(),
        };

        for v in candidates {
            if self.should_stop() {
                return;
            }
            let degree = graph.degree(v);
            let mut child = graph.clone();
            let len = order.len();
            order.push(v);
            order.extend(child.eliminate_vertex(v));

            let next_g = max(g, degree);
            let next_f = max(g, compute_lowerbound(&child));
            if next_f < self.best_upperbound {
                self.branch_and_bound(&child, order, next_f, next_g);
            }
            order.truncate(len);
        }
    }
}
