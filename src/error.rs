use cancel_this::Cancelled;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The result of an operation that runs an external tool or touches a state-set file.
pub type BoolSimResult<T> = Result<T, BoolSimError>;

/// Errors reported by [`crate::model::Model`], [`crate::state_set::StateSet`] and the
/// underlying [`crate::tools::ToolRunner`].
#[derive(Debug, Error)]
pub enum BoolSimError {
    /// The external tool could not be started or waited for (typically, it is not on `PATH`).
    #[error("cannot run `{program}`: {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool finished, but reported a failure. The `code` is `None` when the
    /// process was terminated by a signal.
    #[error("`{command}` failed ({})", describe_exit(.code))]
    ToolFailed { command: String, code: Option<i32> },

    /// A file which should have been produced by an earlier tool invocation does not exist.
    #[error("expected output `{}` does not exist", .path.display())]
    MissingOutput { path: PathBuf },

    /// The file exists, but its content does not follow the expected format.
    #[error("malformed `{}` (line {line}): {message}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Any other I/O problem with the given file.
    #[error("I/O error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A running tool was interrupted by an active `cancel_this` trigger.
    #[error("{0}")]
    Cancelled(Cancelled),
}

impl From<Cancelled> for BoolSimError {
    fn from(value: Cancelled) -> Self {
        BoolSimError::Cancelled(value)
    }
}

impl BoolSimError {
    /// Convert an I/O error on `path` into [`BoolSimError::MissingOutput`] when the file
    /// is not there, or into [`BoolSimError::Io`] otherwise.
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> BoolSimError {
        if source.kind() == std::io::ErrorKind::NotFound {
            BoolSimError::MissingOutput {
                path: path.to_path_buf(),
            }
        } else {
            BoolSimError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn malformed(path: &Path, line: usize, message: impl Into<String>) -> BoolSimError {
        BoolSimError::Malformed {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// True if this error only means that an expected file was never produced.
    pub fn is_missing_output(&self) -> bool {
        matches!(self, BoolSimError::MissingOutput { .. })
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Read the whole file, mapping a missing file to [`BoolSimError::MissingOutput`].
pub(crate) fn read_file(path: &Path) -> BoolSimResult<String> {
    std::fs::read_to_string(path).map_err(|e| BoolSimError::from_io(path, e))
}

/// Write the whole file, replacing any previous content.
pub(crate) fn write_file(path: &Path, content: &str) -> BoolSimResult<()> {
    std::fs::write(path, content).map_err(|source| BoolSimError::Io {
        path: path.to_path_buf(),
        source,
    })
}
