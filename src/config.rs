//! Optional user defaults, read from a TOML file.
//!
//! The file lives at `$PROCBENCH_CONFIG` when set, otherwise at
//! `<config dir>/procbench/config.toml`. Every key is optional and command
//! line flags always win.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::BenchError;

pub const DEFAULT_RUNS: usize = 10;
pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_OUTPUT_FILE: &str = "benchmark_result.txt";
pub const MIN_RUNS: usize = 1;
pub const MAX_RUNS: usize = 100;

pub const CONFIG_ENV_VAR: &str = "PROCBENCH_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub runs: Option<usize>,
    pub concurrency: Option<usize>,
    pub output_file: Option<PathBuf>,
}

impl Config {
    /// Load from the default location. A missing file yields the defaults.
    pub fn discover() -> Result<Self, BenchError> {
        match config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, BenchError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, BenchError> {
        toml::from_str(contents).map_err(|e| BenchError::ConfigParse {
            path: path.to_path_buf(),
            detail: e.message().to_string(),
        })
    }

    pub fn runs(&self) -> usize {
        clamp_runs(self.runs.unwrap_or(DEFAULT_RUNS))
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_CONCURRENCY).max(1)
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
    }
}

/// Keep a requested run count inside the supported range.
pub fn clamp_runs(runs: usize) -> usize {
    runs.clamp(MIN_RUNS, MAX_RUNS)
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("procbench").join("config.toml"))
}
