use crate::error::{BoolSimError, BoolSimResult};
use crate::tools::{ToolCommand, ToolExit, ToolRunner};
use cancel_this::is_cancelled;
use log::{debug, trace};
use std::fs::File;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Runs tools as child processes of the current process.
///
/// The child is polled every `poll_interval`. Between polls, the active `cancel_this`
/// trigger is checked; a cancelled child is killed before the error is returned.
#[derive(Clone, Debug)]
pub struct SystemRunner {
    poll_interval: Duration,
}

impl SystemRunner {
    pub fn new(poll_interval: Duration) -> SystemRunner {
        SystemRunner { poll_interval }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        SystemRunner::new(Duration::from_millis(10))
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> BoolSimResult<ToolExit> {
        let mut process = Command::new(&command.program);
        process.args(&command.args).stdin(Stdio::null());
        if let Some(path) = &command.stdout {
            let file = File::create(path).map_err(|source| BoolSimError::Io {
                path: path.clone(),
                source,
            })?;
            process.stdout(Stdio::from(file));
        }

        let spawn_error = |source: std::io::Error| BoolSimError::ToolSpawn {
            program: command.program.clone(),
            source,
        };

        let mut child = match process.spawn() {
            Ok(child) => child,
            Err(source) => {
                // Do not leave an empty redirect file behind.
                if let Some(path) = &command.stdout {
                    let _ = std::fs::remove_file(path);
                }
                return Err(spawn_error(source));
            }
        };
        trace!("Started `{}` as pid {}.", command.program, child.id());

        loop {
            if let Err(cancelled) = is_cancelled!() {
                debug!(
                    "Killing `{}` (pid {}): {}",
                    command.program,
                    child.id(),
                    cancelled
                );
                // The child may have exited in the meantime, in which case kill fails.
                let _ = child.kill();
                let _ = child.wait();
                return Err(cancelled.into());
            }

            match child.try_wait().map_err(spawn_error)? {
                Some(status) => {
                    trace!("`{}` finished with {}.", command.program, status);
                    return Ok(status.into());
                }
                None => std::thread::sleep(self.poll_interval),
            }
        }
    }
}
