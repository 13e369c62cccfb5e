use serde::Serialize;

/// One measured execution of the target command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSample {
    /// Position among all runs, fixed when the run is scheduled.
    pub index: usize,
    pub duration_ms: f64,
}

/// How runs are laid out over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// One run at a time, in index order.
    Sequential,
    /// Consecutive batches of at most `concurrency` simultaneous runs.
    Parallel { concurrency: usize },
}

impl RunMode {
    /// Maximum number of runs in flight at once. Sequential is a batch size of one.
    pub fn concurrency(self) -> usize {
        match self {
            RunMode::Sequential => 1,
            RunMode::Parallel { concurrency } => concurrency,
        }
    }
}

/// Everything the harness needs to know besides the command itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    pub runs: usize,
    pub mode: RunMode,
    /// Embed the ordered per-run durations in the report.
    pub keep_samples: bool,
}

impl HarnessConfig {
    pub fn sequential(runs: usize) -> Self {
        Self {
            runs,
            mode: RunMode::Sequential,
            keep_samples: true,
        }
    }

    pub fn parallel(runs: usize, concurrency: usize) -> Self {
        Self {
            runs,
            mode: RunMode::Parallel { concurrency },
            keep_samples: true,
        }
    }
}

/// An extreme value together with the first run that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extreme {
    pub value: f64,
    pub index: usize,
}

/// Summary statistics over one completed sample set, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub sample_count: usize,
    pub average: f64,
    pub median: f64,
    pub fastest: Extreme,
    pub slowest: Extreme,
}

/// Final result of a harness run, handed to the report layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub command: String,
    pub mode: RunMode,
    #[serde(flatten)]
    pub statistics: Statistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<f64>>,
}

impl BenchmarkReport {
    pub fn sample_count(&self) -> usize {
        self.statistics.sample_count
    }

    pub fn average(&self) -> f64 {
        self.statistics.average
    }

    pub fn median(&self) -> f64 {
        self.statistics.median
    }

    pub fn fastest(&self) -> Extreme {
        self.statistics.fastest
    }

    pub fn slowest(&self) -> Extreme {
        self.statistics.slowest
    }
}
