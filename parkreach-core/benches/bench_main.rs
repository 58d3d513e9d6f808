use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use parkreach_core::{
    CachedPaths, DestinationGroup, DestinationPoint, Origin, PathLengths, PointToPointPaths,
    PruningPolicy, StreetGraph, estimate_group_distance,
    algo::EstimateStats,
    loading::{EdgeRecord, GraphSettings, NodeRecord, build_street_graph},
    model::CoordinateFrame,
};

const SIDE: i64 = 60;
const SPACING: f64 = 80.0;

#[allow(clippy::cast_precision_loss)]
fn grid() -> StreetGraph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            let id = row * SIDE + col;
            nodes.push(NodeRecord {
                id,
                lat: 0.0,
                lon: 0.0,
                x: Some(col as f64 * SPACING),
                y: Some(row as f64 * SPACING),
            });
            if col + 1 < SIDE {
                edges.push(EdgeRecord {
                    u: id,
                    v: id + 1,
                    length: SPACING,
                });
            }
            if row + 1 < SIDE {
                edges.push(EdgeRecord {
                    u: id,
                    v: id + SIDE,
                    length: SPACING,
                });
            }
        }
    }
    let settings = GraphSettings {
        frame: CoordinateFrame::Provided,
        undirected: true,
    };
    build_street_graph(&nodes, &edges, &settings).expect("grid graph")
}

fn place(graph: &StreetGraph, id: i64) -> (geo::Point<f64>, Option<petgraph::graph::NodeIndex>) {
    let node = graph.node_index(id).expect("node in grid");
    (graph.node(node).expect("node weight").geometry, Some(node))
}

fn groups(graph: &StreetGraph) -> Vec<DestinationGroup> {
    (0..40)
        .map(|g| DestinationGroup {
            id: format!("park-{g}"),
            points: (0..4)
                .map(|p| {
                    let (geometry, node) = place(graph, (g * 89 + p * 7) % (SIDE * SIDE));
                    DestinationPoint { geometry, node }
                })
                .collect(),
        })
        .collect()
}

fn run<P: PathLengths>(paths: &mut P, origins: &[Origin], groups: &[DestinationGroup], policy: &PruningPolicy) {
    let mut stats = EstimateStats::default();
    for origin in origins {
        for group in groups {
            black_box(
                estimate_group_distance(origin, group, policy, paths, &mut stats)
                    .expect("estimate"),
            );
        }
    }
}

fn bench_estimator(c: &mut Criterion) {
    let graph = grid();
    let groups = groups(&graph);
    let origins: Vec<Origin> = (0..10)
        .map(|i| {
            let (geometry, node) = place(&graph, i * 353);
            Origin {
                id: format!("origin-{i}"),
                geometry,
                node,
            }
        })
        .collect();

    let mut group = c.benchmark_group("estimate_group_distance");
    for threshold in [1500.0, 5000.0] {
        let policy = PruningPolicy::new(threshold).expect("threshold");
        group.bench_with_input(BenchmarkId::new("cached", threshold), &policy, |b, policy| {
            b.iter(|| run(&mut CachedPaths::new(&graph), &origins, &groups, policy));
        });
        group.bench_with_input(
            BenchmarkId::new("point_to_point", threshold),
            &policy,
            |b, policy| {
                b.iter(|| run(&mut PointToPointPaths::new(&graph), &origins, &groups, policy));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_estimator);
criterion_main!(benches);
