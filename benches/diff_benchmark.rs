//! Benchmarks for the diff engine.
//!
//! Run with: cargo bench --bench diff_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use grafana_dashboard_sync::diff::DiffEngine;
use grafana_dashboard_sync::model::{
    ConfigSnapshot, DashboardDocument, DataSourceRecord, DataSourceRef, Panel, Target, Variable,
};
use grafana_dashboard_sync::DataSourceRefMode;
use std::hint::black_box;

/// One dashboard with `rows` collapsed rows of eight panels each.
fn generate_dashboard(index: usize, rows: usize, env: &str) -> DashboardDocument {
    let panels = (0..rows)
        .map(|row| {
            let children = (0..8)
                .map(|i| {
                    let targets = (0..3)
                        .map(|t| {
                            let ref_id = char::from(b'A' + t as u8).to_string();
                            Target::new(
                                ref_id,
                                format!("sum(rate(metric_{row}_{i}_{t}{{env=\"{env}\"}}[5m]))"),
                            )
                            .with_datasource(DataSourceRef::typed("prometheus", format!("prom-{env}")))
                        })
                        .collect();
                    Panel::new(format!("Panel {row}.{i}")).with_targets(targets)
                })
                .collect();
            Panel::new(format!("Row {row}"))
                .with_kind("row")
                .with_children(children)
        })
        .collect();

    DashboardDocument::new(format!("Dashboard {index}"), format!("uid-{index}"))
        .with_panels(panels)
        .with_variables(vec![
            Variable::new("cluster", "label_values(up, cluster)", ""),
            Variable::new("node", "label_values(kube_node_info, node)", format!("/.*{env}.*/")),
        ])
}

/// Generate a snapshot pair whose dashboards differ in every query.
fn generate_snapshot_pair(dashboards: usize, rows: usize) -> (ConfigSnapshot, ConfigSnapshot) {
    let snapshot = |env: &str| {
        ConfigSnapshot::new(env)
            .with_dashboards(
                (0..dashboards)
                    .map(|i| generate_dashboard(i, rows, env))
                    .collect(),
            )
            .with_datasources(vec![
                DataSourceRecord::new("Prometheus", "prometheus").with_uid(format!("prom-{env}")),
                DataSourceRecord::new("Loki", "loki"),
            ])
    };
    (snapshot("prod"), snapshot("staging"))
}

fn bench_diff_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_dashboards");

    for dashboards in [10, 50, 200] {
        let (prod, staging) = generate_snapshot_pair(dashboards, 4);
        let engine = DiffEngine::new();

        group.bench_with_input(
            BenchmarkId::from_parameter(dashboards),
            &(prod, staging),
            |b, (prod, staging)| {
                b.iter(|| black_box(engine.diff(black_box(prod), black_box(staging))));
            },
        );
    }

    group.finish();
}

fn bench_identical(c: &mut Criterion) {
    let (prod, _) = generate_snapshot_pair(100, 4);
    let engine = DiffEngine::new().with_datasource_refs(DataSourceRefMode::Strict);

    c.bench_function("diff_identical_100_dashboards", |b| {
        b.iter(|| black_box(engine.diff(black_box(&prod), black_box(&prod))));
    });
}

criterion_group!(benches, bench_diff_sizes, bench_identical);
criterion_main!(benches);
