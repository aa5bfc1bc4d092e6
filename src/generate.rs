//! Seeded random graphs, for demos, benchmarks and differential tests.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::graph::{FlowGraph, NodeId};

/// Each ordered pair of distinct nodes gets an edge with probability `edge_probability`,
/// with a capacity drawn uniformly from `0..=max_capacity`.
pub fn random_graph(
    n: usize,
    edge_probability: f64,
    max_capacity: i64,
    seed: u64,
) -> FlowGraph<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = FlowGraph::with_nodes(n);
    for u in 0..n {
        for v in 0..n {
            if u != v && rng.gen_bool(edge_probability) {
                graph.add_edge(u, v, rng.gen_range(0..=max_capacity));
            }
        }
    }
    graph
}

/// A `width` x `height` 4-connected grid where every pixel is also linked to both
/// terminals, the shape of graphs built for image segmentation. Returns the graph and
/// its terminals `(s, t)`, which are the last two nodes.
pub fn random_grid(
    width: usize,
    height: usize,
    max_capacity: i64,
    seed: u64,
) -> (FlowGraph<i64>, NodeId, NodeId) {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = width * height;
    let (s, t) = (pixels, pixels + 1);
    let mut graph = FlowGraph::with_nodes(pixels + 2);
    for y in 0..height {
        for x in 0..width {
            let u = y * width + x;
            graph.add_edge(s, u, rng.gen_range(0..=max_capacity));
            graph.add_edge(u, t, rng.gen_range(0..=max_capacity));
            if x + 1 < width {
                let w = rng.gen_range(0..=max_capacity);
                graph.add_edge(u, u + 1, w);
                graph.add_edge(u + 1, u, w);
            }
            if y + 1 < height {
                let w = rng.gen_range(0..=max_capacity);
                graph.add_edge(u, u + width, w);
                graph.add_edge(u + width, u, w);
            }
        }
    }
    (graph, s, t)
}
