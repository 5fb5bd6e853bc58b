use quickbb_td::exact::QuickBB;
use quickbb_td::graph::{BaseGraph, EliminationGraph, MutableGraph};
use quickbb_td::lowerbound::compute_lowerbound;
use quickbb_td::upperbound::compute_upperbound;
use quickbb_td::{build_decomposition, get_width, solve};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

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

fn random_graph(rng: &mut StdRng, n: usize, p: f64) -> EliminationGraph {
    let mut graph = EliminationGraph::new();
    for u in 0..n {
        for v in u + 1..n {
            if rng.gen_bool(p) {
                graph.add_edge(u, v);
            }
        }
    }
    graph
}

fn permute(items: &mut Vec<usize>, k: usize, f: &mut dyn FnMut(&[usize])) {
    if k == items.len() {
        f(items);
        return;
    }
    for i in k..items.len() {
        items.swap(k, i);
        permute(items, k + 1, f);
        items.swap(k, i);
    }
}

fn brute_force_treewidth(graph: &EliminationGraph) -> usize {
    let mut vertices: Vec<usize> = graph.vertices().collect();
    let mut best = vertices.len().saturating_sub(1);
    permute(&mut vertices, 0, &mut |order: &[usize]| {
        best = best.min(get_width(graph, order));
    });
    best
}

/// Number of vertices outside `eliminated` and other than `vertices[v]` that
/// are reachable from it through `eliminated`, i.e. its degree once the
/// vertices of `eliminated` are gone.
fn eliminated_degree(graph: &EliminationGraph, vertices: &[usize], eliminated: u32, v: usize) -> usize {
    let position = |x: usize| vertices.iter().position(|y| *y == x).unwrap_or(0);
    let mut visited: u32 = 1 << v;
    let mut stack = vec![v];
    let mut degree = 0;
    while let Some(u) = stack.pop() {
        for w in graph.neighborhood(vertices[u]).unwrap().iter().map(|x| position(*x)) {
            if visited & (1 << w) != 0 {
                continue;
            }
            visited |= 1 << w;
            if eliminated & (1 << w) != 0 {
                stack.push(w);
            } else {
                degree += 1;
            }
        }
    }
    degree
}

/// Treewidth by dynamic programming over the set of eliminated vertices.
fn subset_treewidth(graph: &EliminationGraph) -> usize {
    let vertices: Vec<usize> = graph.vertices().collect();
    let n = vertices.len();
    let mut tw = vec![usize::MAX; 1 << n];
    tw[0] = 0;
    for set in 1u32..(1 << n) {
        for v in (0..n).filter(|v| set & (1 << v) != 0) {
            let rest = set & !(1 << v);
            let width = tw[rest as usize].max(eliminated_degree(graph, &vertices, rest, v));
            tw[set as usize] = tw[set as usize].min(width);
        }
    }
    tw[(1 << n) - 1]
}

fn assert_permutation(graph: &EliminationGraph, order: &[usize]) {
    let mut sorted = order.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, graph.vertices().collect::<Vec<_>>());
}

#[test]
fn scenario_decomposition() {
    let graph = scenario();
    let solution = solve(&graph, Some(Duration::from_secs(360)));
    assert_eq!(solution.treewidth, 2);
    assert!(solution.optimal);
    assert_permutation(&graph, &solution.elimination_order);

    let td = build_decomposition(&graph, &solution.elimination_order);
    assert_eq!(td.order(), 9);
    assert!(td.nodes().all(|node| node.bag.len() <= 3));
    assert_eq!(td.width(), 2);
    assert!(td.verify(&graph).is_ok());
}

#[test]
fn agrees_with_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..40 {
        let n = rng.gen_range(2..9);
        let graph = random_graph(&mut rng, n, 0.5);
        let result = QuickBB::with_graph(&graph).compute();
        assert!(result.optimal);
        assert_eq!(result.treewidth, brute_force_treewidth(&graph), "{}", graph);
        assert_permutation(&graph, &result.elimination_order);
    }
}

#[test]
fn agrees_with_subset_dp_on_larger_graphs() {
    let mut rng = StdRng::seed_from_u64(1234);
    for n in [9, 10].iter() {
        for density in [0.2, 0.35, 0.5, 0.7].iter() {
            let graph = random_graph(&mut rng, *n, *density);
            let result = QuickBB::with_graph(&graph).compute();
            assert!(result.optimal);
            assert_eq!(result.treewidth, subset_treewidth(&graph), "{}", graph);
            assert_permutation(&graph, &result.elimination_order);
        }
    }
}

#[test]
fn subset_dp_matches_permutations() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..10 {
        let graph = random_graph(&mut rng, 6, 0.5);
        assert_eq!(subset_treewidth(&graph), brute_force_treewidth(&graph));
    }
}

#[test]
fn bounds_bracket_result() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let n = rng.gen_range(5..14);
        let graph = random_graph(&mut rng, n, 0.35);
        let lowerbound = compute_lowerbound(&graph);
        let upperbound = compute_upperbound(&graph);
        let result = QuickBB::with_graph(&graph).compute();
        assert!(lowerbound <= result.treewidth);
        assert!(result.treewidth <= upperbound.width());
        assert_eq!(result.lowerbound, lowerbound);
    }
}

#[test]
fn replay_empties_graph() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let graph = random_graph(&mut rng, 10, 0.3);
        let solution = solve(&graph, None);
        let mut replay = graph.clone();
        for v in solution.elimination_order.iter() {
            replay.eliminate_vertex(*v);
        }
        assert_eq!(replay.order(), 0);
        assert_eq!(get_width(&graph, &solution.elimination_order), solution.treewidth);
    }
}

#[test]
fn decompositions_are_valid() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let graph = random_graph(&mut rng, 12, 0.25);
        let solution = solve(&graph, None);
        let td = build_decomposition(&graph, &solution.elimination_order);
        assert_eq!(td.order(), graph.order());
        assert_eq!(td.width(), solution.treewidth);
        assert!(td.verify(&graph).is_ok());
    }
}

#[test]
fn expired_budget_returns_valid_order() {
    let mut rng = StdRng::seed_from_u64(5);
    let graph = random_graph(&mut rng, 25, 0.3);
    let solution = solve(&graph, Some(Duration::from_secs(0)));
    assert_permutation(&graph, &solution.elimination_order);
    assert_eq!(get_width(&graph, &solution.elimination_order), solution.treewidth);
    let td = build_decomposition(&graph, &solution.elimination_order);
    assert!(td.verify(&graph).is_ok());
}
