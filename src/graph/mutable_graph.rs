use crate::graph::base_graph::BaseGraph;

pub trait MutableGraph: BaseGraph {
    fn new() -> Self;
    fn add_edge(&mut self, u: usize, v: usize) -> bool;
    fn remove_edge(&mut self, u: usize, v: usize) -> bool;
    /// Removes `u` and returns the neighbors that were left isolated and dropped with it.
    fn remove_vertex(&mut self, u: usize) -> Vec<usize>;
    /// Merges `v` into `u`. Panics if the two are not adjacent.
    fn contract_edge(&mut self, u: usize, v: usize);

    fn make_clique(&mut self, vertices: &[usize]) {
        for (i, v) in vertices.iter().enumerate() {
            for u in vertices.iter().skip(i + 1) {
                self.add_edge(*u, *v);
            }
        }
    }

    fn eliminate_vertex(&mut self, u: usize) -> Vec<usize> {
        let nb: Vec<usize> = match self.neighborhood(u) {
            Ok(nb) => nb.to_vec(),
            Err(_) => return vec![],
        };
        self.make_clique(&nb);
        self.remove_vertex(u)
    }
}
