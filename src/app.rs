use std::path;

use anyhow::Context;
use anyhow::Result;

use crate::clients::quilt::QuiltClient;
use crate::config::Config;
use crate::ops::executor::Executor;
use crate::ops::executor::RealExecutor;
use crate::series;
use crate::series::PatchName;

pub struct App<E = RealExecutor> {
    pub config: Config,
    pub quilt: QuiltClient<E>,
}

impl<E: Executor> App<E> {
    pub fn new(config: Config, executor: E, path: path::PathBuf) -> Self {
        let quilt = QuiltClient::new(executor, path)
            .with_program(config.program.clone())
            .with_patches_dir(config.patches_dir.clone())
            .with_series_file(config.series_file.clone())
            .with_quiet(config.quiet);
        Self { config, quilt }
    }
}

/// Shared helper methods for App
impl<E: Executor> App<E> {
    /// Location of the series file quilt is working from.
    pub(crate) fn series_path(&self) -> path::PathBuf {
        series::series_path(
            self.quilt.path(),
            self.config.patches_dir.as_deref(),
            self.config.series_file.as_deref(),
        )
    }

    /// Parse the series file.
    pub(crate) fn read_series(&self) -> Result<Vec<PatchName>> {
        let series_path = self.series_path();
        series::read_series(&series_path)
            .with_context(|| format!("Failed to read series file {}", series_path.display()))
    }

    /// Parse the applied-patches file, empty if nothing was pushed yet.
    pub(crate) fn read_applied(&self) -> Result<Vec<PatchName>> {
        series::read_applied(self.quilt.path()).with_context(|| {
            format!(
                "Failed to read {} in {}",
                series::APPLIED_PATCHES_FILE,
                self.quilt.path().display()
            )
        })
    }
}
