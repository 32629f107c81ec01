//! Error types for quilt invocations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while driving quilt.
#[derive(Debug, Error)]
pub enum QuiltError {
    /// The working directory handed to quilt does not exist.
    #[error("{} is not a valid directory", .0.display())]
    NotADirectory(PathBuf),

    /// The quilt executable could not be found on the search path.
    #[error("quilt is not installed")]
    NotInstalled,

    /// quilt ran and exited with a status other than 0 or 2.
    #[error(
        "quilt exited with status {code}: {}{}",
        .stderr.as_deref().unwrap_or(""),
        .stdout.as_deref().map(|s| format!("\n\n{s}")).unwrap_or_default()
    )]
    Failed {
        code: i32,
        stdout: Option<String>,
        stderr: Option<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuiltError {
    /// The exit status quilt returned, if it got that far.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Failed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for quilt operations.
pub type Result<T> = std::result::Result<T, QuiltError>;
