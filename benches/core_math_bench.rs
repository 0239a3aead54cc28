use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use table_chart_rs::api::{ChartConfig, ChartEngine, ChartType};
use table_chart_rs::core::{
    AggregateSnapshot, ChartFamily, DataSource, Dataset, GeometryBuilder, GeometryOptions, Row,
    ScaleRequest, ValueScale, Viewport,
};
use table_chart_rs::render::{Color, NullRenderer};

fn wide_dataset(rows: usize, categories: usize) -> Dataset {
    let rows = (0..rows)
        .map(|row| {
            Row::new(
                (0..categories)
                    .map(|category| ((row * 31 + category * 17) % 97) as f64 + 1.0)
                    .collect(),
            )
        })
        .collect();
    Dataset::new(
        rows,
        (0..categories).map(|index| format!("C{index}")).collect(),
        None,
    )
    .expect("valid dataset")
}

fn bench_aggregate_snapshot(c: &mut Criterion) {
    let dataset = wide_dataset(9, 2_000);
    c.bench_function("aggregate_snapshot_9x2k", |b| {
        b.iter(|| {
            let _ = AggregateSnapshot::compute(black_box(&dataset));
        })
    });
}

fn bench_value_scale(c: &mut Criterion) {
    c.bench_function("value_scale_ticks", |b| {
        b.iter(|| {
            let _ = ValueScale::compute(ScaleRequest::from_band_size(
                black_box(12_345.6),
                black_box(1_080.0),
                30.0,
            ))
            .expect("scale");
        })
    });
}

fn bench_cumulative_bar_geometry(c: &mut Criterion) {
    let source = DataSource::new(wide_dataset(9, 500));
    let options = GeometryOptions::new(vec![Color::BLACK; 9]);
    let viewport = Viewport::new(1920, 1080);

    c.bench_function("cumulative_bar_geometry_9x500", |b| {
        b.iter(|| {
            let _ = GeometryBuilder::new(
                ChartFamily::CumulativeBar,
                black_box(&source),
                &options,
                viewport,
            )
            .build()
            .expect("geometry");
        })
    });
}

fn bench_engine_line_frame(c: &mut Criterion) {
    let config = ChartConfig::new(ChartType::Line)
        .with_dimensions(1600, 900)
        .with_grid_lines(true);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");

    c.bench_function("engine_line_frame_9x200", |b| {
        b.iter(|| {
            let source = DataSource::new(wide_dataset(9, 200));
            let _ = engine.set_data(black_box(source)).expect("apply");
        })
    });
}

criterion_group!(
    benches,
    bench_aggregate_snapshot,
    bench_value_scale,
    bench_cumulative_bar_geometry,
    bench_engine_line_frame
);
criterion_main!(benches);
