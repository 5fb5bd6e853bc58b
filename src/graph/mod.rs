pub use base_graph::BaseGraph;
pub use elimination_graph::EliminationGraph;
pub use mutable_graph::MutableGraph;

mod base_graph;
mod elimination_graph;
mod mutable_graph;
