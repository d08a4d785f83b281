//! Sets of network states stored in `boolSim` state-set files.
//!
//! A state-set file starts with a line of node names, followed by ternary vectors over
//! `0`, `1` and `2` ("don't care"), one symbol per node:
//!
//! ```text
//! A B C
//! 0 2 1
//! 1 2 1
//! ```
//!
//! A [`StateSet`] never rewrites its file. Set operations and simplification produce new
//! files and return a new [`StateSet`] for them. Whether such a file actually exists is only
//! checked once it is read.

mod espresso_format;
mod native_format;


use crate::error::{BoolSimResult, read_file, write_file};
use crate::tools::Toolbox;
use crate::{append_to_path, log_set, strip_txt};
pub use espresso_format::{
    ESPRESSO_FOOTER_LINES, ESPRESSO_HEADER_LINES, parse_espresso_output, write_espresso_input,
};
use log::{debug, info};
pub use native_format::{
    DISPLAY_ANY, ESPRESSO_ANY, NATIVE_ANY, NativeStateSet, Ternary, TernaryVector,
    render_for_display,
};
use num_bigint::BigUint;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// A reference to one `boolSim` state-set file.
#[derive(Clone, Debug)]
pub struct StateSet {
    toolbox: Arc<Toolbox>,
    path: PathBuf,
    count: OnceLock<BigUint>,
}

impl StateSet {
    /// Refer to the state set stored in `path`. The file does not have to exist yet.
    pub fn new<P: Into<PathBuf>>(toolbox: Arc<Toolbox>, path: P) -> StateSet {
        StateSet {
            toolbox,
            path: path.into(),
            count: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn toolbox(&self) -> &Arc<Toolbox> {
        &self.toolbox
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and validate the underlying file.
    pub fn load(&self) -> BoolSimResult<NativeStateSet> {
        let text = read_file(&self.path)?;
        NativeStateSet::parse(&self.path, &text)
    }

    /// The number of binary states in this set (see [`NativeStateSet::count`]).
    ///
    /// The file is only read on the first call. The result is then cached for the lifetime
    /// of this object.
    pub fn count(&self) -> BoolSimResult<BigUint> {
        if let Some(count) = self.count.get() {
            return Ok(count.clone());
        }
        let count = self.load()?.count();
        debug!("Counted {} states in `{}`.", count, self.path.display());
        Ok(self.count.get_or_init(|| count).clone())
    }

    /// The count computed by an earlier call to [`StateSet::count`], if any.
    pub fn cached_count(&self) -> Option<&BigUint> {
        self.count.get()
    }

    /// The text printed by [`StateSet::show`] (see [`render_for_display`]).
    pub fn render(&self) -> BoolSimResult<String> {
        let text = read_file(&self.path)?;
        Ok(render_for_display(&text))
    }

    /// Print the state set to standard output, using `-` for "don't care".
    pub fn show(&self) -> BoolSimResult<()> {
        print!("{}", self.render()?);
        Ok(())
    }

    /// Remove all states of the `excluded` sets from this set using `boolSim_setutils`.
    /// The result is written to `output`.
    pub fn exclude<P: Into<PathBuf>>(
        &self,
        output: P,
        excluded: &[&StateSet],
    ) -> BoolSimResult<StateSet> {
        let output = output.into();
        let excluded: Vec<&Path> = excluded.iter().map(|it| it.path()).collect();
        let command = self
            .toolbox
            .config()
            .difference_command(&self.path, &output, &excluded);
        self.toolbox.execute(&command)?;
        Ok(StateSet::new(self.toolbox.clone(), output))
    }

    /// Intersect this set with `other` using `boolSim_setutils`. The result is written
    /// to `output`.
    pub fn intersect<P: Into<PathBuf>>(
        &self,
        output: P,
        other: &StateSet,
    ) -> BoolSimResult<StateSet> {
        let output = output.into();
        let command = self
            .toolbox
            .config()
            .intersection_command(&self.path, &output, &other.path);
        self.toolbox.execute(&command)?;
        Ok(StateSet::new(self.toolbox.clone(), output))
    }

    /// Path of the `espresso` input created by [`StateSet::simplify`] (`<file>.espresso`).
    pub fn espresso_input_path(&self) -> PathBuf {
        append_to_path(&self.path, ".espresso")
    }

    /// Path of the captured `espresso` output (`<file>_simplified.espresso`).
    pub fn espresso_output_path(&self) -> PathBuf {
        append_to_path(&self.path, "_simplified.espresso")
    }

    /// Path of the state set produced by [`StateSet::simplify`]
    /// (`<file without .txt>_simplified.txt`).
    pub fn simplified_path(&self) -> PathBuf {
        append_to_path(&strip_txt(&self.path), "_simplified.txt")
    }

    /// Compute a smaller set of ternary vectors covering the same states using `espresso`.
    ///
    /// The state set is written as an `espresso` function, minimized, and the resulting cubes
    /// are written back in the native format (with the original node names) into
    /// [`StateSet::simplified_path`].
    pub fn simplify(&self) -> BoolSimResult<StateSet> {
        let source = self.load()?;

        let espresso_input = self.espresso_input_path();
        write_file(&espresso_input, &write_espresso_input(&source))?;

        let espresso_output = self.espresso_output_path();
        let command = self
            .toolbox
            .config()
            .espresso_command(&espresso_input, &espresso_output);
        self.toolbox.execute(&command)?;

        let text = read_file(&espresso_output)?;
        let cubes = parse_espresso_output(&espresso_output, &text, source.nodes.len())?;

        let simplified = NativeStateSet::new(source.nodes, cubes);
        let output = self.simplified_path();
        write_file(&output, &simplified.to_native_string())?;
        info!(
            "Simplified ({}) from {} to {} vectors.",
            log_set(self),
            source.vectors.len(),
            simplified.vectors.len()
        );

        Ok(StateSet::new(self.toolbox.clone(), output))
    }
}
