//! Criterion benchmarks for fieldlog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fieldlog::prelude::*;
use std::io;

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn sink_logger(options: Vec<LoggerOption>) -> Logger {
    let mut all = vec![with_custom_writer(io::sink())];
    all.extend(options);
    Logger::new(all).expect("logger builds")
}

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger(vec![]);
    group.bench_function("info_plain", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.bench_function("infof", |b| {
        b.iter(|| logger.infof(format_args!("request {} took {}ms", black_box(42), 7)));
    });

    let gated = sink_logger(vec![with_level(Level::Error)]);
    group.bench_function("gated_debug", |b| {
        b.iter(|| gated.debug(black_box("never rendered")));
    });

    let caller = sink_logger(vec![with_caller_reporting(true)]);
    group.bench_function("info_with_caller", |b| {
        b.iter(|| caller.info(black_box("with call site")));
    });

    let formatted = sink_logger(vec![with_time_format(true, "")]);
    group.bench_function("info_formatted_time", |b| {
        b.iter(|| formatted.info(black_box("rfc3339")));
    });

    group.finish();
}

// ============================================================================
// Field Chaining Benchmarks
// ============================================================================

fn bench_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("fields");

    for count in [1usize, 5, 20] {
        let fields: Fields = (0..count).map(|i| (format!("key{}", i), i)).collect();

        let logger = sink_logger(vec![]);
        group.bench_function(format!("with_fields_{}", count), |b| {
            b.iter(|| logger.with_fields(black_box(fields.clone())).info("chained"));
        });

        let sorted = sink_logger(vec![with_field_sort(true)]);
        group.bench_function(format!("sorted_{}", count), |b| {
            b.iter(|| sorted.with_fields(black_box(fields.clone())).info("sorted"));
        });
    }

    let logger = sink_logger(vec![with_global_fields(
        Fields::new().with("service", "bench").with("env", "local"),
    )]);
    group.bench_function("entry_acquire_release", |b| {
        b.iter(|| {
            let entry = logger.new_entry();
            logger.release_entry(black_box(entry));
        });
    });

    group.finish();
}

// ============================================================================
// Concurrency Benchmarks
// ============================================================================

fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");
    let logger = sink_logger(vec![]);

    for threads in [2usize, 4] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_function(format!("threads_{}", threads), |b| {
            b.iter(|| {
                std::thread::scope(|scope| {
                    for t in 0..threads {
                        let logger = &logger;
                        scope.spawn(move || {
                            for i in 0..100 {
                                logger.with_field("thread", t).info(black_box(i));
                            }
                        });
                    }
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_emission, bench_fields, bench_concurrent);
criterion_main!(benches);
