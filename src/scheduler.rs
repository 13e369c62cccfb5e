use std::ops::Range;
use std::thread;

use tracing::debug;

use crate::command::CommandLine;
use crate::errors::BenchError;
use crate::timer::ProcessTimer;
use crate::types::RunMode;

/// Fixed-length store of per-run durations, one slot per run index.
#[derive(Debug)]
pub struct ResultsBuffer {
    slots: Vec<Option<f64>>,
}

impl ResultsBuffer {
    pub fn new(runs: usize) -> Self {
        Self {
            slots: vec![None; runs],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Durations in run order. Fails if any slot was never written.
    pub fn into_samples(self) -> Result<Vec<f64>, BenchError> {
        let missing = self.slots.iter().filter(|s| s.is_none()).count();
        if missing > 0 {
            return Err(BenchError::IncompleteResults { missing });
        }
        Ok(self.slots.into_iter().flatten().collect())
    }
}

/// Partition `0..runs` into consecutive ranges of at most `concurrency` runs.
pub fn batch_plan(runs: usize, concurrency: usize) -> impl Iterator<Item = Range<usize>> {
    let step = concurrency.max(1);
    (0..runs)
        .step_by(step)
        .map(move |start| start..(start + step).min(runs))
}

/// Drives a timer over every slot of a results buffer.
pub struct BatchScheduler<'t, T: ProcessTimer> {
    timer: &'t T,
    mode: RunMode,
}

impl<'t, T: ProcessTimer> BatchScheduler<'t, T> {
    pub fn new(timer: &'t T, mode: RunMode) -> Self {
        Self { timer, mode }
    }

    /// Run `command` once per slot of `buffer`.
    ///
    /// Run `i` always lands in slot `i`. In parallel mode a batch is fully
    /// retired before the next one starts; the first failure (by run index)
    /// stops any further batch from launching.
    pub fn run(
        &self,
        command: &CommandLine,
        buffer: &mut ResultsBuffer,
    ) -> Result<(), BenchError> {
        let concurrency = self.mode.concurrency();
        if concurrency == 0 {
            return Err(BenchError::InvalidConfiguration {
                detail: "concurrency limit must be at least 1".to_string(),
            });
        }

        if concurrency == 1 {
            for (index, slot) in buffer.slots.iter_mut().enumerate() {
                record(self.timer, index, command, slot)?;
            }
            return Ok(());
        }

        let runs = buffer.len();
        for (batch, range) in batch_plan(runs, concurrency).enumerate() {
            debug!(batch, first = range.start, size = range.len(), "launching batch");
            let first = range.start;
            run_batch(self.timer, command, first, &mut buffer.slots[range])?;
        }

        Ok(())
    }
}

/// Launch every run of one batch on its own scoped thread and wait for all of
/// them. Each thread owns exactly one slot of `slots`.
fn run_batch<T: ProcessTimer>(
    timer: &T,
    command: &CommandLine,
    first: usize,
    slots: &mut [Option<f64>],
) -> Result<(), BenchError> {
    let assigned: Vec<(usize, &mut Option<f64>)> = slots
        .iter_mut()
        .enumerate()
        .map(|(offset, slot)| (first + offset, slot))
        .collect();

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(assigned.len());
        let mut spawn_error = None;

        for (index, slot) in assigned {
            let spawned = thread::Builder::new()
                .name(format!("procbench-run-{index}"))
                .spawn_scoped(scope, move || record(timer, index, command, slot));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    spawn_error = Some(BenchError::ThreadSpawn { source });
                    break;
                }
            }
        }

        let mut failure = None;
        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failure.get_or_insert(err);
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }

        match failure.or(spawn_error) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    })
}

fn record<T: ProcessTimer>(
    timer: &T,
    index: usize,
    command: &CommandLine,
    slot: &mut Option<f64>,
) -> Result<(), BenchError> {
    let sample = timer.time(index, command)?;
    debug_assert_eq!(sample.index, index);
    *slot = Some(sample.duration_ms);
    Ok(())
}
