use crate::elimination_order::EliminationOrder;

mod quickbb;
pub use quickbb::QuickBB;

/// Outcome of an exact search. `optimal` is false when the search was stopped
/// before the bounds met or the search space was exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub treewidth: usize,
    pub elimination_order: Vec<usize>,
    pub lowerbound: usize,
    pub optimal: bool,
}

impl SearchResult {
    pub fn into_elimination_order(self) -> EliminationOrder {
        EliminationOrder::new(self.elimination_order, self.treewidth)
    }
}
