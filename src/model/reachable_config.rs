use crate::{append_to_path, strip_txt};
use std::path::{Path, PathBuf};

/// Options of [`crate::model::Model::reachable`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachableConfig {
    /// Where to write the reachable set (default: derived from the initial set file,
    /// see [`ReachableConfig::output_for`]).
    pub output: Option<PathBuf>,
    /// Suffix of the derived output file name (default: `reach`).
    pub suffix: String,
    /// Stop the search after the given number of steps, passed as `-n` (default: unbounded).
    pub max_steps: Option<usize>,
}

impl Default for ReachableConfig {
    fn default() -> Self {
        ReachableConfig {
            output: None,
            suffix: "reach".to_string(),
            max_steps: None,
        }
    }
}

impl ReachableConfig {
    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> ReachableConfig {
        self.output = Some(output.into());
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> ReachableConfig {
        self.suffix = suffix.to_string();
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> ReachableConfig {
        self.max_steps = Some(max_steps);
        self
    }

    /// The explicit `output`, or `<initial without .txt>_<suffix>.txt`.
    pub fn output_for(&self, initial: &Path) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None => append_to_path(&strip_txt(initial), &format!("_{}.txt", self.suffix)),
        }
    }
}
