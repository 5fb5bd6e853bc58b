use crate::error::Error;
use crate::graph::BaseGraph;
use fxhash::FxHashSet;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeDecompositionValidationError {
    HasCycle,
    NotConnected,
    MissingVertex(usize),
    MissingEdge((usize, usize)),
    NotInducingSubtree(usize),
}

impl Display for TreeDecompositionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            TreeDecompositionValidationError::HasCycle => write!(f, "Has Cycle"),
            TreeDecompositionValidationError::NotConnected => write!(f, "Not Connected"),
            TreeDecompositionValidationError::MissingVertex(v) => {
                write!(f, "Missing Vertex: {}", v)
            }
            TreeDecompositionValidationError::MissingEdge((u, v)) => {
                write!(f, "Missing Edge: ({}, {})", u, v)
            }
            TreeDecompositionValidationError::NotInducingSubtree(v) => {
                write!(f, "Not Inducing Subtree: {}", v)
            }
        }
    }
}

impl std::error::Error for TreeDecompositionValidationError {}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: usize,
    pub bag: BTreeSet<usize>,
    pub parent: Option<usize>,
    pub children: BTreeSet<usize>,
}

impl TreeNode {
    fn new(id: usize) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Rooted tree of bags. Nodes are keyed by id and iterated in ascending id
/// order; each node stores a back reference to its parent.
#[derive(Debug, Clone, Default)]
pub struct TreeDecomposition {
    nodes: BTreeMap<usize, TreeNode>,
    root: Option<usize>,
}

enum Visit {
    Enter,
    Exit,
}

impl TreeDecomposition {
    pub fn with_root(id: usize, bag: BTreeSet<usize>) -> Self {
        let mut td = Self::default();
        td.add_node(id).bag = bag;
        td.set_root(id);
        td
    }

    pub fn add_node(&mut self, id: usize) -> &mut TreeNode {
        self.nodes.entry(id).or_insert_with(|| TreeNode::new(id))
    }

    pub fn set_root(&mut self, id: usize) {
        if self.nodes.contains_key(&id) {
            self.root = Some(id);
        }
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn node(&self, id: usize) -> Result<&TreeNode, Error> {
        self.nodes.get(&id).ok_or(Error::NotFound(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.nodes.values()
    }

    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Parent/child pairs, ordered by child id.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .values()
            .filter_map(|node| node.parent.map(|parent| (parent, node.id)))
    }

    pub fn max_bag_size(&self) -> usize {
        self.nodes.values().map(|n| n.bag.len()).max().unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.max_bag_size().saturating_sub(1)
    }

    /// Makes `child` a child of `parent`, detaching it from its previous
    /// parent. Panics if `parent` is `child` or lies in its subtree.
    pub fn connect_to_parent(&mut self, parent: usize, child: usize) {
        assert!(
            !self.is_ancestor(child, parent),
            "{}",
            Error::invalid_operation(format!(
                "cannot attach {} below its descendant {}",
                child, parent
            ))
        );
        self.add_node(parent);
        let old_parent = self.add_node(child).parent.replace(parent);
        if let Some(old_parent) = old_parent.filter(|p| *p != parent) {
            if let Some(node) = self.nodes.get_mut(&old_parent) {
                node.children.remove(&child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.insert(child);
        }
    }

    /// Whether `ancestor` is `node` or one of its parents.
    fn is_ancestor(&self, ancestor: usize, node: usize) -> bool {
        let mut current = Some(node);
        for _ in 0..=self.nodes.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.nodes.get(&id).and_then(|n| n.parent),
                None => return false,
            }
        }
        false
    }

    /// Merges the bag and the children of `child` into `parent` and deletes `child`.
    pub fn contract_child_to_parent(&mut self, parent: usize, child: usize) -> Result<(), Error> {
        if !self.nodes.contains_key(&parent) {
            return Err(Error::NotFound(parent));
        }
        match self.nodes.get(&child) {
            None => return Err(Error::NotFound(child)),
            Some(node) if node.parent != Some(parent) => {
                return Err(Error::invalid_operation(format!(
                    "{} is not a child of {}",
                    child, parent
                )));
            }
            _ => {}
        }
        let removed = self
            .nodes
            .remove(&child)
            .ok_or(Error::NotFound(child))?;
        for grandchild in removed.children.iter().copied() {
            if let Some(node) = self.nodes.get_mut(&grandchild) {
                node.parent = Some(parent);
            }
        }
        let node = self.nodes.get_mut(&parent).ok_or(Error::NotFound(parent))?;
        node.children.remove(&child);
        node.children.extend(removed.children);
        node.bag.extend(removed.bag);
        Ok(())
    }

    /// Contracts every tree edge whose bags are in a subset relation.
    pub fn flatten(&mut self) {
        while let Some((parent, child)) = self.find_combinable() {
            if self.contract_child_to_parent(parent, child).is_err() {
                break;
            }
        }
    }

    fn find_combinable(&self) -> Option<(usize, usize)> {
        self.edges()
            .find(|(parent, child)| match (self.nodes.get(parent), self.nodes.get(child)) {
                (Some(a), Some(b)) => a.bag.is_subset(&b.bag) || b.bag.is_subset(&a.bag),
                _ => false,
            })
    }

    /// Depth-first traversal from the root. Both callbacks receive the node,
    /// its depth, whether it is a leaf and whether it is the last of its siblings.
    pub fn dfs<Pre, Post>(&self, mut pre_order: Pre, mut post_order: Post)
    where
        Pre: FnMut(&TreeNode, usize, bool, bool),
        Post: FnMut(&TreeNode, usize, bool, bool),
    {
        let root = match self.root {
            Some(root) => root,
            None => return,
        };
        let mut stack = vec![(root, 0, true, Visit::Enter)];
        while let Some((id, depth, is_last, visit)) = stack.pop() {
            let node = match self.nodes.get(&id) {
                Some(node) => node,
                None => continue,
            };
            match visit {
                Visit::Enter => {
                    pre_order(node, depth, node.is_leaf(), is_last);
                    stack.push((id, depth, is_last, Visit::Exit));
                    let n = node.children.len();
                    for (i, c) in node.children.iter().enumerate().rev() {
                        stack.push((*c, depth + 1, i + 1 == n, Visit::Enter));
                    }
                }
                Visit::Exit => post_order(node, depth, node.is_leaf(), is_last),
            }
        }
    }

    pub fn iter(&self) -> TreeDecompositionIterator<'_> {
        TreeDecompositionIterator {
            td: self,
            stack: self.root.into_iter().collect(),
        }
    }

    pub fn verify<G: BaseGraph>(&self, graph: &G) -> Result<(), TreeDecompositionValidationError> {
        if self.is_cyclic() {
            return Err(TreeDecompositionValidationError::HasCycle);
        }

        if !self.is_connected() {
            return Err(TreeDecompositionValidationError::NotConnected);
        }

        if let Some(v) = self.get_missing_vertex(graph) {
            return Err(TreeDecompositionValidationError::MissingVertex(v));
        }

        if let Some(e) = self.get_missing_edge(graph) {
            return Err(TreeDecompositionValidationError::MissingEdge(e));
        }

        if let Some(v) = self.get_vertex_not_inducing_subtree(graph) {
            return Err(TreeDecompositionValidationError::NotInducingSubtree(v));
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        if self.nodes.is_empty() {
            return true;
        }
        self.iter().count() == self.nodes.len()
    }

    fn is_cyclic(&self) -> bool {
        let mut visited: FxHashSet<usize> = FxHashSet::default();
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return true;
            }
            if let Some(node) = self.nodes.get(&id) {
                for c in node.children.iter().copied() {
                    if self.nodes.get(&c).and_then(|n| n.parent) != Some(id) {
                        return true;
                    }
                    stack.push(c);
                }
            }
        }
        false
    }

    fn get_missing_vertex<G: BaseGraph>(&self, graph: &G) -> Option<usize> {
        let mut vertices: BTreeSet<usize> = graph.vertices().collect();
        self.nodes.values().for_each(|n| {
            n.bag.iter().for_each(|x| {
                vertices.remove(x);
            })
        });
        vertices.iter().next().copied()
    }

    fn get_missing_edge<G: BaseGraph>(&self, graph: &G) -> Option<(usize, usize)> {
        for u in graph.vertices() {
            let nb = match graph.neighborhood(u) {
                Ok(nb) => nb,
                Err(_) => continue,
            };
            for v in nb.iter().copied().filter(|v| u < *v) {
                if !self
                    .nodes
                    .values()
                    .any(|n| n.bag.contains(&u) && n.bag.contains(&v))
                {
                    return Some((u, v));
                }
            }
        }
        None
    }

    fn get_vertex_not_inducing_subtree<G: BaseGraph>(&self, graph: &G) -> Option<usize> {
        for u in graph.vertices() {
            let mut inducing: FxHashSet<usize> = self
                .nodes
                .values()
                .filter(|n| n.bag.contains(&u))
                .map(|n| n.id)
                .collect();
            let first = match inducing.iter().next() {
                Some(first) => *first,
                None => continue,
            };
            inducing.remove(&first);
            let mut stack = vec![first];
            while let Some(c) = stack.pop() {
                let node = &self.nodes[&c];
                for n in node.parent.iter().chain(node.children.iter()).copied() {
                    if inducing.remove(&n) {
                        stack.push(n);
                    }
                }
            }
            if !inducing.is_empty() {
                return Some(u);
            }
        }
        None
    }
}

/// Pre-order iterator over the nodes reachable from the root.
pub struct TreeDecompositionIterator<'a> {
    td: &'a TreeDecomposition,
    stack: Vec<usize>,
}

impl<'a> Iterator for TreeDecompositionIterator<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.td.nodes.get(&self.stack.pop()?)?;
        self.stack.extend(current.children.iter().rev().copied());
        Some(current)
    }
}
