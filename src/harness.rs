use tracing::info;

use crate::command::CommandLine;
use crate::errors::BenchError;
use crate::scheduler::{BatchScheduler, ResultsBuffer};
use crate::stats;
use crate::timer::{ProcessTimer, SystemTimer};
use crate::types::{BenchmarkReport, HarnessConfig};

/// Runs a command the configured number of times and summarizes the result.
pub struct RunHarness<T: ProcessTimer = SystemTimer> {
    timer: T,
    config: HarnessConfig,
}

impl RunHarness<SystemTimer> {
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_timer(SystemTimer, config)
    }
}

impl<T: ProcessTimer> RunHarness<T> {
    pub fn with_timer(timer: T, config: HarnessConfig) -> Self {
        Self { timer, config }
    }

    /// Time every run of `command` and build the report.
    ///
    /// Nothing is launched if the configuration is invalid. Any failed run
    /// fails the whole attempt; no partial report is produced.
    pub fn run(&self, command: &CommandLine) -> Result<BenchmarkReport, BenchError> {
        self.validate()?;

        info!(
            command = %command,
            runs = self.config.runs,
            concurrency = self.config.mode.concurrency(),
            "starting benchmark"
        );

        let mut buffer = ResultsBuffer::new(self.config.runs);
        BatchScheduler::new(&self.timer, self.config.mode).run(command, &mut buffer)?;
        let samples = buffer.into_samples()?;
        let statistics = stats::summarize(&samples)?;

        info!(
            average_ms = statistics.average,
            median_ms = statistics.median,
            "benchmark finished"
        );

        Ok(BenchmarkReport {
            command: command.to_string(),
            mode: self.config.mode,
            statistics,
            samples: self.config.keep_samples.then_some(samples),
        })
    }

    fn validate(&self) -> Result<(), BenchError> {
        if self.config.runs < 1 {
            return Err(BenchError::InvalidConfiguration {
                detail: "run count must be at least 1".to_string(),
            });
        }
        if self.config.mode.concurrency() < 1 {
            return Err(BenchError::InvalidConfiguration {
                detail: "concurrency limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
