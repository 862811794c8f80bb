use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use narwhal::graph::{EdgeKind, Graph, GraphBuilder, Node, NodeId};
use narwhal::{LayoutRequest, layout};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct GraphSpec {
    /// `(opcode, control, width)` per node; ids are positions.
    nodes: Vec<(&'static str, bool, f64)>,
    /// `(from, to, operand index, kind)`.
    edges: Vec<(u32, u32, usize, EdgeKind)>,
}

impl GraphSpec {
    fn build(&self) -> Graph {
        let mut b = GraphBuilder::default();
        for (id, &(opcode, control, width)) in self.nodes.iter().enumerate() {
            b.add_node(Node::new(NodeId(id as u32), opcode, width, 40.0).with_control(control))
                .unwrap();
        }
        for &(from, to, index, kind) in &self.edges {
            b.add_edge(NodeId(from), NodeId(to), index, kind);
        }
        b.build().unwrap()
    }

    fn push(&mut self, opcode: &'static str, control: bool, width: f64) -> u32 {
        self.nodes.push((opcode, control, width));
        self.nodes.len() as u32 - 1
    }
}

/// `loops * depth` loops in sequence, each fed by the exit and phi of the one before it, with a
/// body of `body` operations.
fn build_loop_chain_spec(loops: usize, depth: usize, body: usize) -> GraphSpec {
    let mut spec = GraphSpec {
        nodes: Vec::new(),
        edges: Vec::new(),
    };
    let start = spec.push("Start", true, 100.0);
    let mut ctrl = start;
    let mut value = spec.push("Parameter", false, 150.0);
    spec.edges.push((start, value, 0, EdgeKind::Value));

    for _ in 0..loops {
        for _ in 0..depth {
            let lp = spec.push("Loop", true, 100.0);
            let phi = spec.push("Phi", false, 100.0);
            let mut last = phi;
            for k in 0..body {
                // Alternate widths so the slot search has to work around neighbours.
                let width = [100.0, 150.0, 250.0][k % 3];
                let n = spec.push("Int32Add", false, width);
                spec.edges.push((last, n, 0, EdgeKind::Value));
                spec.edges.push((value, n, 1, EdgeKind::Value));
                last = n;
            }
            let back = spec.push("IfTrue", true, 100.0);
            let exit = spec.push("IfFalse", true, 100.0);
            spec.edges.extend([
                (ctrl, lp, 0, EdgeKind::Control),
                (back, lp, 1, EdgeKind::Control),
                (value, phi, 0, EdgeKind::Value),
                (last, phi, 1, EdgeKind::Value),
                (lp, phi, 2, EdgeKind::Control),
                (last, back, 0, EdgeKind::Value),
                (lp, exit, 0, EdgeKind::Control),
            ]);
            ctrl = exit;
            value = phi;
        }
    }

    let ret = spec.push("Return", true, 100.0);
    spec.edges.push((ctrl, ret, 0, EdgeKind::Control));
    spec.edges.push((value, ret, 1, EdgeKind::Value));
    spec
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("loops_6_b4", 2usize, 3usize, 4usize),
        ("loops_16_b8", 8usize, 2usize, 8usize),
        ("loops_60_b12", 20usize, 3usize, 12usize),
    ];

    for (name, loops, depth, body) in cases {
        let spec = build_loop_chain_spec(loops, depth, body);
        group.bench_with_input(BenchmarkId::new("full", name), &spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |mut g| {
                    let summary = layout(black_box(&mut g), &LayoutRequest::full()).unwrap();
                    black_box(summary.max_rank);
                },
                BatchSize::LargeInput,
            )
        });

        let mut laid_out = spec.build();
        layout(&mut laid_out, &LayoutRequest::full()).unwrap();
        group.bench_with_input(BenchmarkId::new("cached", name), &laid_out, |b, g| {
            b.iter_batched(
                || g.clone(),
                |mut g| {
                    let summary = layout(black_box(&mut g), &LayoutRequest::cached()).unwrap();
                    black_box(summary.max_back_edge_number);
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
