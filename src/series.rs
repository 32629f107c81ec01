//! Readers for quilt's plain-text patch lists.
//!
//! The series file and `.pc/applied-patches` share one format: one patch name
//! per line, blank lines ignored. Order is significant and duplicates are kept.

use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::clients::quilt::DEFAULT_PATCHES_DIR;
use crate::clients::quilt::DEFAULT_SERIES_FILE;

/// quilt's record of applied patches, relative to the working directory.
pub const APPLIED_PATCHES_FILE: &str = ".pc/applied-patches";

/// A patch, named relative to the patches directory (e.g. `debian/fix.diff`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PatchName(pub String);

impl Display for PatchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatchName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Parse a series file.
pub fn parse_series(reader: impl BufRead) -> io::Result<Vec<PatchName>> {
    parse_patch_list(reader)
}

/// Parse `.pc/applied-patches`.
pub fn parse_applied(reader: impl BufRead) -> io::Result<Vec<PatchName>> {
    parse_patch_list(reader)
}

fn parse_patch_list(mut reader: impl BufRead) -> io::Result<Vec<PatchName>> {
    let mut patches = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let entry = line.strip_suffix(b"\n").unwrap_or(&line[..]);
        if entry.trim_ascii().is_empty() {
            continue;
        }
        patches.push(PatchName(String::from_utf8_lossy(entry).into_owned()));
    }
    Ok(patches)
}

/// Location of the series file for a working directory.
///
/// An absolute `series_file` is used as is; otherwise it lives in the patches
/// directory.
pub fn series_path(
    path: &Path,
    patches_dir: Option<&Path>,
    series_file: Option<&str>,
) -> PathBuf {
    let series_file = Path::new(series_file.unwrap_or(DEFAULT_SERIES_FILE));
    if series_file.is_absolute() {
        return series_file.to_path_buf();
    }
    path.join(patches_dir.unwrap_or(Path::new(DEFAULT_PATCHES_DIR)))
        .join(series_file)
}

/// Read and parse a series file.
pub fn read_series(series_path: &Path) -> io::Result<Vec<PatchName>> {
    parse_series(BufReader::new(File::open(series_path)?))
}

/// Read the applied patches of a working directory.
///
/// quilt only creates the file once something has been pushed, so a missing
/// file means nothing is applied.
pub fn read_applied(path: &Path) -> io::Result<Vec<PatchName>> {
    match File::open(path.join(APPLIED_PATCHES_FILE)) {
        Ok(file) => parse_applied(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}
