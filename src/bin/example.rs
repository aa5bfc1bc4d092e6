use bk_mincut::{generate::random_graph, min_cut, FlowGraph, MinCut};

fn print_cut(name: &str, cut: &MinCut<i64>) {
    println!("{name}: max flow {}", cut.value);
    println!("  source side {:?}", cut.source_side);
    println!("  sink side   {:?}", cut.sink_side);
}

fn main() -> bk_mincut::Result<()> {
    // s = 0, a = 1, b = 2, t = 3
    let diamond = FlowGraph::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (1, 2, 1)]);
    println!("Created the diamond s->a(3), s->b(2), a->t(2), b->t(3), a->b(1)");
    print_cut("diamond", &min_cut(diamond, 0, 3)?);

    let random = random_graph(12, 0.3, 20, 7);
    println!("Created a random graph with 12 nodes and {} edges", random.edge_count());
    print_cut("random", &min_cut(random, 0, 11)?);
    Ok(())
}
