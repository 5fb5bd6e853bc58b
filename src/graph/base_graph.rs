use crate::error::Error;
use std::fmt::Debug;

pub trait BaseGraph: Clone + Debug {
    fn degree(&self, u: usize) -> usize;
    fn order(&self) -> usize;
    fn has_vertex(&self, u: usize) -> bool;
    fn has_edge(&self, u: usize, v: usize) -> bool;
    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_>;
    fn neighborhood(&self, u: usize) -> Result<&[usize], Error>;

    fn is_clique(&self, vertices: &[usize]) -> bool {
        for (i, v) in vertices.iter().enumerate() {
            for u in vertices.iter().skip(i + 1) {
                if !self.has_edge(*u, *v) {
                    return false;
                }
            }
        }
        true
    }

    fn is_simplicial(&self, u: usize) -> bool {
        match self.neighborhood(u) {
            Ok(nb) => self.is_clique(nb),
            Err(_) => false,
        }
    }

    /// Whether removing a single neighbor turns the neighborhood of `u` into a clique.
    fn is_almost_simplicial(&self, u: usize) -> bool {
        let nb = match self.neighborhood(u) {
            Ok(nb) => nb,
            Err(_) => return false,
        };
        let mut rest: Vec<usize> = Vec::with_capacity(nb.len());
        for skip in 0..nb.len() {
            rest.clear();
            rest.extend(
                nb.iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, v)| *v),
            );
            if self.is_clique(&rest) {
                return true;
            }
        }
        false
    }

    fn fill_in_count(&self, u: usize) -> usize {
        let nb = match self.neighborhood(u) {
            Ok(nb) => nb,
            Err(_) => return 0,
        };
        let mut count = 0;
        for (i, x) in nb.iter().enumerate() {
            for y in nb.iter().skip(i + 1) {
                if !self.has_edge(*x, *y) {
                    count += 1;
                }
            }
        }
        count
    }
}
