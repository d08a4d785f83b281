use crate::tools::ToolCommand;
use std::path::Path;
use std::time::Duration;

/// Names of the external executables and the fixed flags passed to them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolConfig {
    /// The attractor/reachability solver (default: `boolSim`).
    pub boolsim: String,
    /// The set-difference/intersection utility (default: `boolSim_setutils`).
    pub setutils: String,
    /// The two-level logic minimizer (default: `espresso`).
    pub espresso: String,
    /// Value of the `-p` flag passed to every `boolSim` call (default: `3`).
    pub parallelism: u32,
    /// Treat a non-zero exit status as an error (default: `true`). When disabled, the
    /// failure is only logged and the operation continues as if the tool succeeded.
    pub check_exit_status: bool,
    /// How often a running tool is polled for completion and cancellation
    /// (default: 10ms).
    pub poll_interval: Duration,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            boolsim: "boolSim".to_string(),
            setutils: "boolSim_setutils".to_string(),
            espresso: "espresso".to_string(),
            parallelism: 3,
            check_exit_status: true,
            poll_interval: Duration::from_millis(10),
        }
    }
}

impl ToolConfig {
    pub fn with_boolsim(mut self, program: impl Into<String>) -> ToolConfig {
        self.boolsim = program.into();
        self
    }

    pub fn with_setutils(mut self, program: impl Into<String>) -> ToolConfig {
        self.setutils = program.into();
        self
    }

    pub fn with_espresso(mut self, program: impl Into<String>) -> ToolConfig {
        self.espresso = program.into();
        self
    }

    pub fn with_parallelism(mut self, parallelism: u32) -> ToolConfig {
        self.parallelism = parallelism;
        self
    }

    pub fn with_check_exit_status(mut self, check: bool) -> ToolConfig {
        self.check_exit_status = check;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> ToolConfig {
        self.poll_interval = interval;
        self
    }

    /// `boolSim -t -f <model> -p <parallelism> -o <pattern>`
    pub fn attractor_command(&self, model: &Path, pattern: &Path) -> ToolCommand {
        self.boolsim_command(model).arg("-o").arg(pattern)
    }

    /// `boolSim -t -f <model> -p <parallelism> -i <initial> -o <output> [-n <max_steps>]`
    pub fn reachability_command(
        &self,
        model: &Path,
        initial: &Path,
        output: &Path,
        max_steps: Option<usize>,
    ) -> ToolCommand {
        let command = self
            .boolsim_command(model)
            .arg("-i")
            .arg(initial)
            .arg("-o")
            .arg(output);
        match max_steps {
            Some(steps) => command.arg("-n").arg(steps.to_string()),
            None => command,
        }
    }

    /// `boolSim_setutils -t difference <source> -o <output> <excluded>...`
    pub fn difference_command(
        &self,
        source: &Path,
        output: &Path,
        excluded: &[&Path],
    ) -> ToolCommand {
        self.setutils_command("difference", source, output)
            .args(excluded.iter().copied())
    }

    /// `boolSim_setutils -t intersection <source> -o <output> <other>`
    pub fn intersection_command(&self, source: &Path, output: &Path, other: &Path) -> ToolCommand {
        self.setutils_command("intersection", source, output)
            .arg(other)
    }

    /// `espresso <input> > <output>`
    pub fn espresso_command(&self, input: &Path, output: &Path) -> ToolCommand {
        ToolCommand::new(&self.espresso)
            .arg(input)
            .stdout_to(output)
    }

    fn boolsim_command(&self, model: &Path) -> ToolCommand {
        ToolCommand::new(&self.boolsim)
            .arg("-t")
            .arg("-f")
            .arg(model)
            .arg("-p")
            .arg(self.parallelism.to_string())
    }

    fn setutils_command(&self, operation: &str, source: &Path, output: &Path) -> ToolCommand {
        ToolCommand::new(&self.setutils)
            .arg("-t")
            .arg(operation)
            .arg(source)
            .arg("-o")
            .arg(output)
    }
}
