use crate::append_to_path;
use crate::error::{BoolSimError, BoolSimResult};
use crate::state_set::StateSet;
use crate::tools::Toolbox;
use computation_process::{Completable, GeneratorStep};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the attractor files produced by `boolSim -o <pattern>` are located.
#[derive(Clone, Debug)]
pub struct AttractorFilesConfig {
    pub toolbox: Arc<Toolbox>,
    /// Attractor `i` is stored in `<pattern>_<i>.txt`.
    pub pattern: PathBuf,
}

/// Internal state of the attractor file discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttractorFilesState {
    present: BTreeSet<usize>,
    next: usize,
    done: bool,
}

/// Yields the attractor files `<pattern>_1.txt`, `<pattern>_2.txt`, ... in order, stopping at
/// the first index that has no file. Files after such a gap are never reported.
pub struct AttractorFilesStep;

impl AttractorFilesConfig {
    pub fn new(toolbox: Arc<Toolbox>, pattern: PathBuf) -> AttractorFilesConfig {
        AttractorFilesConfig { toolbox, pattern }
    }

    /// Path of the attractor file with the given (1-based) index.
    pub fn file_path(&self, index: usize) -> PathBuf {
        append_to_path(&self.pattern, &format!("_{index}.txt"))
    }
}

impl AttractorFilesState {
    /// Collect the indices of all existing `<pattern>_<i>.txt` files using a single
    /// directory listing. A missing directory means there are no files.
    pub fn scan(pattern: &Path) -> BoolSimResult<AttractorFilesState> {
        let directory = match pattern.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let prefix = match pattern.file_name() {
            Some(name) => format!("{}_", name.to_string_lossy()),
            None => return Ok(AttractorFilesState::from(BTreeSet::new())),
        };

        let entries = match std::fs::read_dir(&directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AttractorFilesState::from(BTreeSet::new()));
            }
            Err(e) => return Err(BoolSimError::from_io(&directory, e)),
        };

        let mut present = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| BoolSimError::from_io(&directory, e))?;
            let name = entry.file_name();
            if let Some(index) = parse_index(&name.to_string_lossy(), &prefix) {
                present.insert(index);
            }
        }

        debug!(
            "Found attractor files {:?} for `{}`.",
            present,
            pattern.display()
        );
        Ok(AttractorFilesState::from(present))
    }

    /// Indices of all files that exist, including those after the first gap.
    pub fn present(&self) -> &BTreeSet<usize> {
        &self.present
    }
}

impl From<BTreeSet<usize>> for AttractorFilesState {
    fn from(value: BTreeSet<usize>) -> Self {
        AttractorFilesState {
            present: value,
            next: 1,
            done: false,
        }
    }
}

/// Match `<prefix><i>.txt` where `<i>` is written exactly as `boolSim` writes it (no sign,
/// no leading zeros).
fn parse_index(file_name: &str, prefix: &str) -> Option<usize> {
    let digits = file_name.strip_prefix(prefix)?.strip_suffix(".txt")?;
    let index = digits.parse::<usize>().ok()?;
    if index.to_string() == digits {
        Some(index)
    } else {
        None
    }
}

impl GeneratorStep<AttractorFilesConfig, AttractorFilesState, StateSet> for AttractorFilesStep {
    fn step(
        context: &AttractorFilesConfig,
        state: &mut AttractorFilesState,
    ) -> Completable<Option<StateSet>> {
        if state.done {
            return Ok(None);
        }

        if !state.present.contains(&state.next) {
            state.done = true;
            let skipped = state.present.range(state.next..).count();
            if skipped > 0 {
                warn!(
                    "Attractor file `{}` is missing; ignoring {} file(s) with higher index.",
                    context.file_path(state.next).display(),
                    skipped
                );
            }
            debug!("Discovered {} attractor file(s).", state.next - 1);
            return Ok(None);
        }

        let path = context.file_path(state.next);
        info!("Found attractor #{} in `{}`.", state.next, path.display());
        state.next += 1;
        Ok(Some(StateSet::new(context.toolbox.clone(), path)))
    }
}
