pub mod fake_runner;

use crate::state_set::StateSet;
use crate::tools::Toolbox;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// A fresh temporary directory, deleted when the returned value is dropped.
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Cannot create temporary directory")
}

/// Write `content` into `dir/name` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Cannot write fixture");
    path
}

/// Write `content` into `dir/name` and wrap it into a [`StateSet`].
pub fn mk_state_set(toolbox: &Arc<Toolbox>, dir: &Path, name: &str, content: &str) -> StateSet {
    StateSet::new(toolbox.clone(), write_fixture(dir, name, content))
}

/// The state set used in most tests: three nodes, two vectors that differ only in `A`.
///
/// ```text
/// A B C
/// 0 2 1      (states 001, 011)
/// 1 2 1      (states 101, 111)
/// ```
pub const MERGEABLE_SET: &str = "A B C\n0 2 1\n1 2 1\n";
