use std::ffi::OsString;
use std::io::ErrorKind;
use std::path;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::instrument;

use crate::error::QuiltError;
use crate::error::Result;
use crate::ops::executor::ExecOutput;
use crate::ops::executor::Executor;
use crate::ops::executor::Invocation;
use crate::ops::executor::RealExecutor;
use crate::series::PatchName;

/// Executable invoked unless configured otherwise.
pub const DEFAULT_PROGRAM: &str = "quilt";

/// Patches directory, relative to the working directory.
pub const DEFAULT_PATCHES_DIR: &str = "patches";

/// Series file name, looked up by quilt relative to the patches directory.
pub const DEFAULT_SERIES_FILE: &str = "series";

// -----------------------------------------------------------------------------
// Types

/// Quilt client.
///
/// Every operation runs exactly one quilt process in the working directory and
/// waits for it to exit. Nothing here guards against two clients mutating the
/// same working directory at once.
pub struct QuiltClient<E = RealExecutor> {
    executor: E,
    path: PathBuf,
    program: String,
    patches_dir: Option<PathBuf>,
    series_file: Option<String>,
    quiet: bool,
}

/// Flags shared by the push and pop-all family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// `-f`: force the operation even if it leaves rejects or local changes.
    pub force: bool,
    /// `--refresh`: refresh each patch after applying or before removing it.
    pub refresh: bool,
}

/// Outcome of asking quilt for the patches that are not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnappliedPatches {
    /// Unapplied patches in series order.
    Found(Vec<PatchName>),
    /// quilt reported that nothing is left to apply.
    Empty,
}

// -----------------------------------------------------------------------------
// QuiltClient impl

impl<E: Executor> QuiltClient<E> {
    pub fn new(executor: E, path: PathBuf) -> Self {
        Self {
            executor,
            path,
            program: DEFAULT_PROGRAM.to_string(),
            patches_dir: None,
            series_file: None,
            quiet: true,
        }
    }

    /// Use a different quilt executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Patches directory; a relative path is taken from the working directory.
    pub fn with_patches_dir(mut self, patches_dir: Option<PathBuf>) -> Self {
        self.patches_dir = patches_dir;
        self
    }

    pub fn with_series_file(mut self, series_file: Option<String>) -> Self {
        self.series_file = series_file;
        self
    }

    /// When not quiet, quilt's stderr is merged into the returned output.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `quilt <args>` and return its stdout.
    ///
    /// Exit codes 0 and 2 both count as success; quilt uses 2 for benign
    /// outcomes such as "no patches in series" or "nothing to pop".
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.exec(args, self.quiet).await?;
        match output.code {
            0 | 2 => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            code => Err(failed(code, output)),
        }
    }

    /// Apply every unapplied patch in series order.
    pub async fn push_all(&self, options: ApplyOptions) -> Result<String> {
        let mut args = vec!["push", "-a"];
        options.append_flags(&mut args);
        self.run(&args).await
    }

    /// Apply patches up to and including `patch`.
    pub async fn push(&self, patch: &str, options: ApplyOptions) -> Result<String> {
        let mut args = vec!["push", patch];
        options.append_flags(&mut args);
        self.run(&args).await
    }

    /// Remove every applied patch, most recent first.
    pub async fn pop_all(&self, options: ApplyOptions) -> Result<String> {
        let mut args = vec!["pop", "-a"];
        options.append_flags(&mut args);
        self.run(&args).await
    }

    /// Remove applied patches down to and including `patch`.
    pub async fn pop(&self, patch: &str) -> Result<String> {
        self.run(&["pop", patch]).await
    }

    /// Drop `patch` from the series. With `remove`, the patch file goes too.
    pub async fn delete(&self, patch: &str, remove: bool) -> Result<String> {
        let mut args = vec!["delete", patch];
        if remove {
            args.push("-r");
        }
        self.run(&args).await
    }

    /// Upgrade quilt's metadata in the working directory to the current format.
    pub async fn upgrade(&self) -> Result<String> {
        self.run(&["upgrade"]).await
    }

    /// Patches from the series that are not applied, relative to the patches
    /// directory.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn unapplied(&self) -> Result<UnappliedPatches> {
        // Patch names are read from stdout, so stderr is never merged here.
        let output = self.exec(&["unapplied"], true).await?;
        match output.code {
            0 | 2 => {
                let cwd = path::absolute(&self.path)?;
                let patches_dir = self.resolved_patches_dir(&cwd);
                let stdout = String::from_utf8_lossy(&output.stdout);
                let patches = stdout
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| relative_patch_name(&cwd, &patches_dir, line))
                    .collect();
                Ok(UnappliedPatches::Found(patches))
            }
            // Exit code 1 means every patch in the series is applied, or the
            // series is empty.
            1 => Ok(UnappliedPatches::Empty),
            code => Err(failed(code, output)),
        }
    }

    /// Spawn quilt and hand back the raw result without classifying the exit
    /// code.
    async fn exec(&self, args: &[&str], capture_stderr: bool) -> Result<ExecOutput> {
        if !self.path.is_dir() {
            return Err(QuiltError::NotADirectory(self.path.clone()));
        }
        let cwd = path::absolute(&self.path)?;
        let invocation = Invocation {
            program: self.program.clone(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            env: self.environment(&cwd),
            cwd,
            capture_stderr,
        };

        debug!("running: {} {}", invocation.program, invocation.args.join(" "));
        let output = self
            .executor
            .execute(&invocation)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => QuiltError::NotInstalled,
                _ => QuiltError::Io(e),
            })?;
        debug!(code = output.code, "quilt exited");

        Ok(output)
    }

    fn environment(&self, cwd: &Path) -> Vec<(String, OsString)> {
        let patches_dir = match &self.patches_dir {
            Some(dir) => dir.clone().into_os_string(),
            None => cwd.join(DEFAULT_PATCHES_DIR).into_os_string(),
        };
        let series_file = self.series_file.as_deref().unwrap_or(DEFAULT_SERIES_FILE);
        vec![
            ("QUILT_PATCHES".to_string(), patches_dir),
            ("QUILT_SERIES".to_string(), OsString::from(series_file)),
        ]
    }

    fn resolved_patches_dir(&self, cwd: &Path) -> PathBuf {
        match &self.patches_dir {
            // Joining an absolute directory replaces `cwd` entirely.
            Some(dir) => cwd.join(dir),
            None => cwd.join(DEFAULT_PATCHES_DIR),
        }
    }
}

// -----------------------------------------------------------------------------
// ApplyOptions impl

impl ApplyOptions {
    fn append_flags(self, args: &mut Vec<&str>) {
        if self.force {
            args.push("-f");
        }
        if self.refresh {
            args.push("--refresh");
        }
    }
}

// -----------------------------------------------------------------------------
// UnappliedPatches impl

impl UnappliedPatches {
    pub fn into_vec(self) -> Vec<PatchName> {
        match self {
            Self::Found(patches) => patches,
            Self::Empty => Vec::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn failed(code: i32, output: ExecOutput) -> QuiltError {
    QuiltError::Failed {
        code,
        stdout: Some(String::from_utf8_lossy(&output.stdout).into_owned()),
        stderr: output
            .stderr
            .map(|stderr| String::from_utf8_lossy(&stderr).into_owned()),
    }
}

/// quilt prints patches prefixed with `QUILT_PATCHES`, which may be relative to
/// the working directory.
fn relative_patch_name(cwd: &Path, patches_dir: &Path, line: &str) -> PatchName {
    let patch = cwd.join(line);
    let relative = pathdiff::diff_paths(&patch, patches_dir).unwrap_or(patch);
    PatchName(relative.to_string_lossy().into_owned())
}
