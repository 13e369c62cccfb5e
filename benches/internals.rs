use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use procbench::command::{CommandLine, split_args};
use procbench::errors::BenchError;
use procbench::scheduler::{BatchScheduler, ResultsBuffer};
use procbench::stats;
use procbench::timer::ProcessTimer;
use procbench::types::{RunMode, RunSample};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Deterministic pseudo-random durations so every run benchmarks the same data.
fn make_samples(size: usize) -> Vec<f64> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    (0..size)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 100_000) as f64 / 100.0
        })
        .collect()
}

/// Returns immediately; isolates scheduler overhead from process start-up.
struct InstantTimer;

impl ProcessTimer for InstantTimer {
    fn time(&self, index: usize, _command: &CommandLine) -> Result<RunSample, BenchError> {
        Ok(RunSample {
            index,
            duration_ms: index as f64,
        })
    }
}

// ---------------------------------------------------------------------------
// Benchmarks: statistics
// ---------------------------------------------------------------------------

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for &size in &[1, 10, 100, 1000] {
        let samples = make_samples(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, samples| {
            b.iter(|| stats::summarize(samples).unwrap());
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmarks: scheduler
// ---------------------------------------------------------------------------

fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler");
    let command = CommandLine::new("noop", Vec::new());

    for &concurrency in &[1, 4, 16] {
        group.bench_with_input(
            BenchmarkId::from_parameter(concurrency),
            &concurrency,
            |b, &concurrency| {
                let mode = if concurrency == 1 {
                    RunMode::Sequential
                } else {
                    RunMode::Parallel { concurrency }
                };
                b.iter(|| {
                    let mut buffer = ResultsBuffer::new(100);
                    BatchScheduler::new(&InstantTimer, mode)
                        .run(&command, &mut buffer)
                        .unwrap();
                    buffer.into_samples().unwrap()
                });
            },
        );
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmarks: command building
// ---------------------------------------------------------------------------

fn bench_split_args(c: &mut Criterion) {
    let input = r#"--size 1000 --name "hello world" 'x y' --verbose --threads=8"#;
    c.bench_function("split_args", |b| b.iter(|| split_args(input)));
}

criterion_group!(benches, bench_summarize, bench_scheduler, bench_split_args);
criterion_main!(benches);
