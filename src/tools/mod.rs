//! Invocation of the external `boolSim`, `boolSim_setutils` and `espresso` executables.
//!
//! Every external call is described by a [`ToolCommand`] and executed by a [`ToolRunner`].
//! The default runner ([`SystemRunner`]) spawns a real process, but any other implementation
//! (e.g., one that writes prepared fixture files) can be plugged into a [`Toolbox`]. All
//! [`crate::model::Model`] and [`crate::state_set::StateSet`] objects created from the same
//! [`Toolbox`] share it.
//!
//! ```no_run
//! use biodivine_boolsim::model::Model;
//! use biodivine_boolsim::tools::{ToolConfig, Toolbox};
//!
//! let toolbox = Toolbox::new(ToolConfig::default().with_parallelism(4)).shared();
//! let model = Model::new(toolbox, "model.net");
//! for attractor in model.attractors().unwrap() {
//!     println!("{}: {} states", attractor.path().display(), attractor.count().unwrap());
//! }
//! ```

mod system_runner;
mod tool_config;


use crate::error::{BoolSimError, BoolSimResult};
use log::{info, warn};
use std::ffi::{OsStr, OsString};
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
pub use system_runner::SystemRunner;
pub use tool_config::ToolConfig;

/// A single invocation of an external program: its name, arguments, and (optionally)
/// a file which receives its standard output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<OsString>,
    pub stdout: Option<PathBuf>,
}

/// Exit status of a finished tool. The `code` is `None` if the process was killed by a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ToolExit {
    pub code: Option<i32>,
}

/// Runs [`ToolCommand`] instances and waits for them to finish.
///
/// Implementations must block until the command completes (including writing its
/// redirected standard output).
pub trait ToolRunner: Send + Sync {
    fn run(&self, command: &ToolCommand) -> BoolSimResult<ToolExit>;
}

/// A [`ToolConfig`] paired with the [`ToolRunner`] that executes the commands it builds.
pub struct Toolbox {
    config: ToolConfig,
    runner: Box<dyn ToolRunner>,
}

impl ToolCommand {
    pub fn new(program: &str) -> ToolCommand {
        ToolCommand {
            program: program.to_string(),
            args: Vec::new(),
            stdout: None,
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> ToolCommand {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I: IntoIterator<Item = S>, S: AsRef<OsStr>>(mut self, args: I) -> ToolCommand {
        self.args
            .extend(args.into_iter().map(|it| it.as_ref().to_os_string()));
        self
    }

    /// Redirect the standard output of the program into the given file.
    pub fn stdout_to(mut self, path: &Path) -> ToolCommand {
        self.stdout = Some(path.to_path_buf());
        self
    }

    /// Returns the `i`-th argument as a (lossy) string, if present.
    pub fn arg_str(&self, i: usize) -> Option<String> {
        self.args.get(i).map(|it| it.to_string_lossy().into_owned())
    }

    /// The argument following the first occurrence of `flag`, e.g. the path after `-o`.
    pub fn flag_value(&self, flag: &str) -> Option<PathBuf> {
        let position = self.args.iter().position(|it| it == flag)?;
        self.args.get(position + 1).map(PathBuf::from)
    }
}

impl Display for ToolCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        if let Some(stdout) = &self.stdout {
            write!(f, " > {}", stdout.display())?;
        }
        Ok(())
    }
}

impl ToolExit {
    pub const SUCCESS: ToolExit = ToolExit { code: Some(0) };

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolExit {
    fn from(value: std::process::ExitStatus) -> Self {
        ToolExit { code: value.code() }
    }
}

impl Debug for Toolbox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolbox")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Toolbox {
    /// A toolbox which runs real processes using [`SystemRunner`].
    pub fn new(config: ToolConfig) -> Toolbox {
        let runner = SystemRunner::new(config.poll_interval);
        Toolbox::with_runner(config, runner)
    }

    pub fn with_runner<R: ToolRunner + 'static>(config: ToolConfig, runner: R) -> Toolbox {
        Toolbox {
            config,
            runner: Box::new(runner),
        }
    }

    /// Wrap the toolbox into an [`Arc`] so that it can be shared by models and state sets.
    pub fn shared(self) -> Arc<Toolbox> {
        Arc::new(self)
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Run the command and wait for it to finish.
    ///
    /// A non-zero exit status is an error unless [`ToolConfig::check_exit_status`]
    /// is disabled, in which case it is only logged.
    pub fn execute(&self, command: &ToolCommand) -> BoolSimResult<ToolExit> {
        info!("Running `{}`.", command);
        let exit = self.runner.run(command)?;
        if !exit.success() {
            if self.config.check_exit_status {
                return Err(BoolSimError::ToolFailed {
                    command: command.to_string(),
                    code: exit.code,
                });
            }
            warn!("`{}` exited with {:?}; continuing.", command, exit.code);
        }
        Ok(exit)
    }
}
