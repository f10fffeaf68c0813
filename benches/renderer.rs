use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use stackflow::config::LayoutConfig;
use stackflow::layout::{ContainerSize, compute_layout};
use stackflow::parser::parse_graph;
use stackflow::render::{RenderEmitter, Scene, render_svg};
use stackflow::theme::Theme;
use std::hint::black_box;

fn chain_source(nodes: usize, dangling: usize) -> String {
    let nodes_json: Vec<String> = (0..nodes)
        .map(|i| {
            format!(
                r#"{{"id": "n{i}", "label": "Step {i}", "note": "detail for step {i}"}}"#
            )
        })
        .collect();
    let mut edges_json: Vec<String> = (1..nodes)
        .map(|i| format!(r#"{{"from": "n{}", "to": "n{}"}}"#, i - 1, i))
        .collect();
    edges_json.extend((0..dangling).map(|i| format!(r#"{{"from": "n{i}", "to": "ghost{i}"}}"#)));
    format!(
        r#"{{"type": "flowchart", "nodes": [{}], "edges": [{}]}}"#,
        nodes_json.join(","),
        edges_json.join(",")
    )
}

const SIZES: [(usize, usize); 4] = [(4, 0), (32, 4), (256, 32), (1024, 128)];

fn bench_config() -> LayoutConfig {
    LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (nodes, dangling) in SIZES {
        let input = chain_source(nodes, dangling);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &input, |b, input| {
            b.iter(|| parse_graph(black_box(input)).expect("parse failed"));
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::standard();
    let config = bench_config();
    let container = ContainerSize::new(600.0, 400.0);
    for (nodes, dangling) in SIZES {
        let graph = parse_graph(&chain_source(nodes, dangling)).expect("parse failed");
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &graph, |b, graph| {
            b.iter(|| compute_layout(black_box(&graph.nodes), container, &theme, &config));
        });
    }
    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    let theme = Theme::standard();
    let config = bench_config();
    let container = ContainerSize::new(600.0, 400.0);
    for (nodes, dangling) in SIZES {
        let graph = parse_graph(&chain_source(nodes, dangling)).expect("parse failed");
        let layout = compute_layout(&graph.nodes, container, &theme, &config);
        let mut scene = Scene::new();
        let mut emitter = RenderEmitter::new();
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &graph, |b, graph| {
            b.iter(|| emitter.emit(&mut scene, black_box(graph), &layout, &theme));
        });
    }
    group.finish();
}

fn bench_render_svg(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let theme = Theme::standard();
    let config = bench_config();
    let container = ContainerSize::new(600.0, 400.0);
    for (nodes, dangling) in SIZES {
        let graph = parse_graph(&chain_source(nodes, dangling)).expect("parse failed");
        let layout = compute_layout(&graph.nodes, container, &theme, &config);
        let mut scene = Scene::new();
        RenderEmitter::new().emit(&mut scene, &graph, &layout, &theme);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &scene, |b, scene| {
            b.iter(|| render_svg(black_box(scene), &theme));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_layout, bench_emit, bench_render_svg);
criterion_main!(benches);
