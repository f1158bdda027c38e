mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::generate_csv_dataset;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use futures::io::Cursor;
use sales::prelude::*;
use tokio::runtime::Runtime;

/// Validate, batch and persist CSV uploads of different sizes
fn bench_ingest_dataset_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_sizes");
    let runtime = Runtime::new().unwrap();

    for (size_name, num_rows) in [("small_1k", 1_000), ("medium_10k", 10_000), ("large_100k", 100_000)] {
        let csv_data = generate_csv_dataset(num_rows);
        group.throughput(Throughput::Elements(num_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &csv_data, |b, csv_data| {
            b.to_async(&runtime).iter(|| async {
                let rows = CsvRowStream::new(Cursor::new(csv_data.clone().into_bytes()));
                let mut pipeline = IngestPipeline::new(ConcurrentSalesStore::new(), BatchSize::DEFAULT);
                black_box(pipeline.run(rows).await.unwrap());
            });
        });
    }

    group.finish();
}

/// Effect of batch size on the same upload
fn bench_ingest_batch_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_batch_sizes");
    let runtime = Runtime::new().unwrap();
    let csv_data = generate_csv_dataset(10_000);

    for batch_size in [1usize, 20, 500, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &batch_size, |b, &batch_size| {
            b.to_async(&runtime).iter(|| async {
                let rows = CsvRowStream::new(Cursor::new(csv_data.clone().into_bytes()));
                let batch_size = BatchSize::new(batch_size).unwrap();
                let mut pipeline = IngestPipeline::new(ConcurrentSalesStore::new(), batch_size);
                black_box(pipeline.run(rows).await.unwrap());
            });
        });
    }

    group.finish();
}

/// Row validation alone, without IO or storage
fn bench_validate_row(c: &mut Criterion) {
    let row = RawRow::new()
        .with("USER_NAME", "  John Doe ")
        .with("AGE", "29")
        .with("HEIGHT", 177i64)
        .with("GENDER", "M")
        .with("SALE_AMOUNT", "21312")
        .with("LAST_PURCHASE_DATE", "2020-11-05T13:15:30+08:00");

    c.bench_function("validate_row", |b| b.iter(|| black_box(validate_row(black_box(&row)))));
}

/// Export a populated in-memory store as NDJSON
fn bench_export(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let store = Arc::new(ConcurrentSalesStore::new());
    runtime.block_on(async {
        let rows = CsvRowStream::new(Cursor::new(generate_csv_dataset(10_000).into_bytes()));
        IngestPipeline::new(Arc::clone(&store), BatchSize::DEFAULT)
            .run(rows)
            .await
            .unwrap();
    });
    let range = DateRange::since(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());

    c.bench_function("export_10k", |b| {
        b.to_async(&runtime).iter(|| async {
            let mut output = Vec::with_capacity(2 << 20);
            let written = ExportPipeline::new(Arc::clone(&store))
                .run(range, &mut output)
                .await
                .unwrap();
            black_box((written, output));
        });
    });
}

criterion_group!(
    benches,
    bench_ingest_dataset_sizes,
    bench_ingest_batch_sizes,
    bench_validate_row,
    bench_export
);
criterion_main!(benches);
