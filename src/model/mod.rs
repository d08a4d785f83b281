//! Boolean network models analysed by `boolSim`.
//!
//! # Example
//!
//! ```no_run
//! use biodivine_boolsim::model::{Model, ReachableConfig};
//! use biodivine_boolsim::tools::{ToolConfig, Toolbox};
//!
//! let toolbox = Toolbox::new(ToolConfig::default()).shared();
//! let model = Model::new(toolbox, "models/tlgl.net");
//!
//! // Writes `models/tlgl_attractor_1.txt`, `models/tlgl_attractor_2.txt`, ...
//! let attractors = model.attractors().unwrap();
//!
//! // Writes `models/tlgl_attractor_1_reach.txt`.
//! let reach = model
//!     .reachable(&attractors[0], &ReachableConfig::default().with_max_steps(10))
//!     .unwrap();
//! println!("Reachable states: {}", reach.count().unwrap());
//! ```

mod attractor_files;
mod reachable_config;

#[cfg(test)]
mod tests;

use crate::append_to_path;
use crate::error::BoolSimResult;
use crate::state_set::StateSet;
use crate::tools::Toolbox;
pub use attractor_files::{AttractorFilesConfig, AttractorFilesState, AttractorFilesStep};
use computation_process::{Generator, Stateful};
use log::info;
pub use reachable_config::ReachableConfig;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Enumerate the attractor files written by `boolSim` (see [`AttractorFilesStep`]).
pub type AttractorFiles =
    Generator<AttractorFilesConfig, AttractorFilesState, StateSet, AttractorFilesStep>;

/// A reference to a Boolean network file in the `boolSim` input format.
#[derive(Clone, Debug)]
pub struct Model {
    toolbox: Arc<Toolbox>,
    path: PathBuf,
    attractors: OnceLock<Vec<StateSet>>,
}

impl Model {
    pub fn new<P: Into<PathBuf>>(toolbox: Arc<Toolbox>, path: P) -> Model {
        Model {
            toolbox,
            path: path.into(),
            attractors: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The model path without its last extension, with all remaining dots in the file name
    /// replaced by `_` (`models/a.b.net` becomes `models/a_b`).
    pub fn base_name(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|it| it.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parts: Vec<&str> = name.split('.').collect();
        let base = if parts.len() > 1 {
            parts[..parts.len() - 1].join("_")
        } else {
            name.clone()
        };
        let base = if base.is_empty() { name } else { base };
        self.path.with_file_name(base)
    }

    /// The `-o` argument of the attractor search (`<base name>_attractor`).
    pub fn attractor_pattern(&self) -> PathBuf {
        append_to_path(&self.base_name(), "_attractor")
    }

    /// Compute the attractors of this model using `boolSim`.
    ///
    /// The solver writes one file per attractor, `<pattern>_1.txt`, `<pattern>_2.txt`, ...
    /// (see [`Model::attractor_pattern`]). These are discovered in order, up to the first
    /// missing index. If the solver writes no files, the result is empty.
    ///
    /// The solver only runs on the first successful call; the result is cached.
    pub fn attractors(&self) -> BoolSimResult<&[StateSet]> {
        if let Some(attractors) = self.attractors.get() {
            return Ok(attractors);
        }

        let pattern = self.attractor_pattern();
        let command = self
            .toolbox
            .config()
            .attractor_command(&self.path, &pattern);
        self.toolbox.execute(&command)?;

        let state = AttractorFilesState::scan(&pattern)?;
        let config = AttractorFilesConfig::new(self.toolbox.clone(), pattern);
        let attractors = AttractorFiles::configure(config, state).collect::<Result<Vec<_>, _>>()?;
        info!(
            "Model `{}` has {} attractor(s).",
            self.path.display(),
            attractors.len()
        );

        Ok(self.attractors.get_or_init(|| attractors))
    }

    /// Compute the states reachable from `initial` using `boolSim`.
    ///
    /// The returned set refers to [`ReachableConfig::output_for`] even if the solver did not
    /// write it. A missing file is only reported once the set is read.
    pub fn reachable(
        &self,
        initial: &StateSet,
        config: &ReachableConfig,
    ) -> BoolSimResult<StateSet> {
        let output = config.output_for(initial.path());
        let command = self
            .toolbox
            .config()
            .reachability_command(&self.path, initial.path(), &output, config.max_steps);
        self.toolbox.execute(&command)?;
        Ok(StateSet::new(self.toolbox.clone(), output))
    }
}
