//! A thin driver for the `boolSim` Boolean network toolset.
//!
//! Attractors and reachable sets are computed by the external `boolSim` solver, set
//! operations by `boolSim_setutils`, and pattern minimization by `espresso`. This crate
//! builds their command lines, names their output files, and translates between the
//! ternary state-set format of `boolSim` and the PLA-like format of `espresso`.
//!
//!  - [`model::Model`] wraps a network file (attractors, reachability).
//!  - [`state_set::StateSet`] wraps one state-set file (count, show, set algebra, simplify).
//!  - [`tools`] describes how external programs are executed.

use crate::state_set::StateSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[cfg(test)]
mod test_utils;

pub mod error;
pub mod model;
pub mod state_set;
pub mod tools;

pub use error::{BoolSimError, BoolSimResult};

/// A utility method for printing useful metadata of state sets.
fn log_set(set: &StateSet) -> String {
    match set.cached_count() {
        Some(count) => format!("file={}; elements={}", set.path().display(), count),
        None => format!("file={}", set.path().display()),
    }
}

/// Append a raw `suffix` to the path (`a/b.txt` + `.espresso` = `a/b.txt.espresso`).
fn append_to_path(path: &Path, suffix: &str) -> PathBuf {
    let mut result = OsString::from(path.as_os_str());
    result.push(suffix);
    PathBuf::from(result)
}

/// Remove the trailing `.txt` from the path, if present.
fn strip_txt(path: &Path) -> PathBuf {
    match path.extension() {
        Some(extension) if extension == "txt" => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}
