use std::sync::{LazyLock, Mutex};

use bk_mincut::{BkSolver, FlowGraph, MinCut, NodeId};
use flexi_logger::{Logger, LoggerHandle};

pub mod edmonds_karp;

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .set_palette("196;208;3;7;8".to_owned())
            .format(|w, now, record| {
                let style = flexi_logger::style(record.level());
                write!(
                    w,
                    "{} {pref}[{}] {}{suf}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                    pref = style.prefix(),
                    suf = style.suffix(),
                )
            })
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}

/// Checks that `cut` splits the nodes of `graph` in two with `s` and `t` apart, and that its
/// value is the capacity of the edges crossing it.
#[allow(dead_code)]
pub fn assert_cut(graph: &FlowGraph<i64>, s: NodeId, t: NodeId, cut: &MinCut<i64>) {
    assert!(cut.source_side.is_disjoint(&cut.sink_side), "{cut:?}");
    assert_eq!(
        cut.source_side.len() + cut.sink_side.len(),
        graph.node_count(),
        "{cut:?}"
    );
    assert!(cut.source_side.contains(&s), "{cut:?}");
    assert!(cut.sink_side.contains(&t), "{cut:?}");
    assert_eq!(
        graph.cut_capacity(|u| cut.is_source_side(u)),
        cut.value,
        "{cut:?}"
    );
}

/// Solves step by step, checking every invariant between steps.
#[allow(dead_code)]
pub fn solve_checked(graph: FlowGraph<i64>, s: NodeId, t: NodeId) -> (MinCut<i64>, BkSolver<i64>) {
    let mut solver = BkSolver::new(graph, s, t).unwrap();
    solver.check_invariants().unwrap();
    let mut steps = 0;
    let mut last_flow = 0;
    while solver.step().unwrap() {
        steps += 1;
        if let Err(e) = solver.check_invariants() {
            panic!("{e} after step {steps}\n{:?}", solver.trees());
        }
        let flow = solver.flow_value();
        assert!(flow > last_flow, "flow went from {last_flow} to {flow}");
        last_flow = flow;
    }
    assert_eq!(solver.stats().augmentations, steps);
    let cut = solver.solve().unwrap();
    assert_eq!(cut.value, last_flow);
    (cut, solver)
}
