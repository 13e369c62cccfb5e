use std::process::{Child, Command};
use std::time::Instant;

use tracing::{debug, warn};

use crate::command::CommandLine;
use crate::errors::BenchError;
use crate::types::RunSample;

/// Times a single run of a command.
///
/// Implementations are shared across the threads of a parallel batch.
pub trait ProcessTimer: Sync {
    fn time(&self, index: usize, command: &CommandLine) -> Result<RunSample, BenchError>;
}

/// Launches a real child process and measures it with a monotonic clock.
///
/// The child inherits the environment, working directory and standard streams.
/// There is no timeout: the run lasts as long as the program does.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimer;

impl ProcessTimer for SystemTimer {
    fn time(&self, index: usize, command: &CommandLine) -> Result<RunSample, BenchError> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);

        // Only spawn and wait happen between the two clock reads.
        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|source| BenchError::LaunchFailure {
            command: command.to_string(),
            source,
        })?;
        let status = child.wait();
        let elapsed = start.elapsed();

        let status = match status {
            Ok(status) => status,
            Err(source) => {
                abandon(&mut child);
                return Err(BenchError::WaitFailure {
                    command: command.to_string(),
                    source,
                });
            }
        };

        let duration_ms = elapsed.as_secs_f64() * 1000.0;
        debug!(run = index, duration_ms, %status, "run finished");
        if !status.success() {
            warn!(run = index, %status, "command exited unsuccessfully");
        }

        Ok(RunSample { index, duration_ms })
    }
}

/// Kill and reap a child whose wait failed, so no handle or zombie outlives the run.
fn abandon(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
