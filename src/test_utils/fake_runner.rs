//! A [`ToolRunner`] which never starts a process. Each call is recorded and passed to
//! a closure which can produce the files the real tool would have written.

use crate::error::BoolSimResult;
use crate::tools::{ToolCommand, ToolConfig, ToolExit, ToolRunner, Toolbox};
use std::sync::{Arc, Mutex};

/// All commands executed by a [`FakeRunner`], in order.
pub type CallLog = Arc<Mutex<Vec<ToolCommand>>>;

type Behaviour = Box<dyn Fn(&ToolCommand) -> BoolSimResult<ToolExit> + Send + Sync>;

pub struct FakeRunner {
    calls: CallLog,
    behaviour: Behaviour,
}

impl FakeRunner {
    pub fn new<F>(behaviour: F) -> FakeRunner
    where
        F: Fn(&ToolCommand) -> BoolSimResult<ToolExit> + Send + Sync + 'static,
    {
        FakeRunner {
            calls: Arc::new(Mutex::new(Vec::new())),
            behaviour: Box::new(behaviour),
        }
    }

    /// A runner where every tool succeeds without writing anything.
    pub fn succeeding() -> FakeRunner {
        FakeRunner::new(|_| Ok(ToolExit::SUCCESS))
    }

    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, command: &ToolCommand) -> BoolSimResult<ToolExit> {
        self.calls
            .lock()
            .expect("Call log poisoned")
            .push(command.clone());
        (self.behaviour)(command)
    }
}

/// Build a shared toolbox with default configuration around a [`FakeRunner`].
pub fn fake_toolbox<F>(behaviour: F) -> (Arc<Toolbox>, CallLog)
where
    F: Fn(&ToolCommand) -> BoolSimResult<ToolExit> + Send + Sync + 'static,
{
    fake_toolbox_with(ToolConfig::default(), behaviour)
}

pub fn fake_toolbox_with<F>(config: ToolConfig, behaviour: F) -> (Arc<Toolbox>, CallLog)
where
    F: Fn(&ToolCommand) -> BoolSimResult<ToolExit> + Send + Sync + 'static,
{
    let runner = FakeRunner::new(behaviour);
    let calls = runner.calls();
    (Toolbox::with_runner(config, runner).shared(), calls)
}

/// The commands recorded so far, rendered as shell-like strings.
pub fn recorded(calls: &CallLog) -> Vec<String> {
    calls
        .lock()
        .expect("Call log poisoned")
        .iter()
        .map(|it| it.to_string())
        .collect()
}

/// What `espresso` prints for a cover it cannot reduce any further: the input cubes,
/// with a `.p` line added after the `.i`/`.o` header.
pub fn identity_espresso(input: &str) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let cubes: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|it| !it.starts_with('.'))
        .collect();
    let mut result = String::new();
    for line in &lines {
        if line.starts_with(".i") || line.starts_with(".o") {
            result.push_str(line);
            result.push('\n');
        }
    }
    result.push_str(&format!(".p {}\n", cubes.len()));
    for cube in cubes {
        result.push_str(cube);
        result.push('\n');
    }
    result.push_str(".e\n");
    result
}

/// Behaves like `espresso` that returns its input unchanged (see [`identity_espresso`]).
pub fn identity_espresso_behaviour(command: &ToolCommand) -> BoolSimResult<ToolExit> {
    let input = command.arg_str(0).expect("espresso without input file");
    let output = command.stdout.as_ref().expect("espresso without stdout");
    let text = std::fs::read_to_string(input).expect("Cannot read espresso input");
    std::fs::write(output, identity_espresso(&text)).expect("Cannot write espresso output");
    Ok(ToolExit::SUCCESS)
}

/// Behaves like `espresso` that always prints `output`.
pub fn fixed_espresso_behaviour(
    output: &'static str,
) -> impl Fn(&ToolCommand) -> BoolSimResult<ToolExit> + Send + Sync + 'static {
    move |command: &ToolCommand| {
        let path = command.stdout.as_ref().expect("espresso without stdout");
        std::fs::write(path, output).expect("Cannot write espresso output");
        Ok(ToolExit::SUCCESS)
    }
}
