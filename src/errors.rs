use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("Failed to launch `{command}`: {source}")]
    LaunchFailure {
        command: String,
        source: std::io::Error,
    },

    #[error("Failed to wait for `{command}` to exit: {source}")]
    WaitFailure {
        command: String,
        source: std::io::Error,
    },

    #[error("Failed to start a worker thread: {source}")]
    ThreadSpawn { source: std::io::Error },

    #[error("Invalid configuration: {detail}")]
    InvalidConfiguration { detail: String },

    #[error("{missing} run(s) finished without recording a duration")]
    IncompleteResults { missing: usize },

    #[error("No samples to summarize")]
    NoSamples,

    #[error("'{path}' does not exist or is not a file")]
    TargetNotFound { path: PathBuf },

    #[error("Could not find '{name}' on PATH")]
    ExecutableNotFound { name: String },

    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },
}
