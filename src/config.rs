use std::path::PathBuf;

use anyhow::Result;

use crate::clients::quilt::DEFAULT_PROGRAM;

/// Overrides the quilt executable.
pub const PROGRAM_ENV: &str = "DOONA_QUILT";

#[derive(Debug, Clone)]
pub struct Config {
    /// quilt executable, looked up on `PATH` when not a path.
    pub program: String,
    pub patches_dir: Option<PathBuf>,
    pub series_file: Option<String>,
    /// Keep quilt's stderr out of the returned output.
    pub quiet: bool,
}

impl Config {
    /// Load config from the environment.
    ///
    /// `QUILT_PATCHES` and `QUILT_SERIES` are the variables quilt itself reads,
    /// so an existing quilt setup carries over.
    pub fn load() -> Result<Self> {
        let program = std::env::var(PROGRAM_ENV).unwrap_or_else(|_| DEFAULT_PROGRAM.to_string());

        let patches_dir = std::env::var_os("QUILT_PATCHES")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        let series_file = match std::env::var("QUILT_SERIES") {
            Ok(series) if !series.is_empty() => Some(series),
            Ok(_) | Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                anyhow::bail!("QUILT_SERIES is not valid unicode")
            }
        };

        Ok(Self {
            program,
            patches_dir,
            series_file,
            quiet: true,
        })
    }

    /// Create a new config with explicit values (useful for tests)
    pub fn new(program: String, patches_dir: Option<PathBuf>, series_file: Option<String>) -> Self {
        Self {
            program,
            patches_dir,
            series_file,
            quiet: true,
        }
    }

    /// Default config for tests
    pub fn default_for_tests() -> Self {
        Self::new(DEFAULT_PROGRAM.to_string(), None, None)
    }
}
