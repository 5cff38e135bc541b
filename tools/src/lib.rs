//! # f2cnf-tools - Command Line Tools for the f2cnf Library
//!
//! Helpers shared by the binaries of this crate.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use f2cnf::f2::OutputMode;

/// Prefix of derived output file names
pub const OUT_PREFIX: &str = "sample_F2_";

/// Derives the output path from the input path: the file name is prefixed
/// with [`OUT_PREFIX`] and suffixed with [`OutputMode::file_suffix`], the
/// directory is kept. Returns `None` if the input path has no file name.
#[must_use]
pub fn derived_out_path(in_path: &Path, mode: OutputMode) -> Option<PathBuf> {
    let name = in_path.file_name()?;
    let mut out_name = OsString::from(OUT_PREFIX);
    out_name.push(name);
    out_name.push(mode.file_suffix());
    Some(in_path.with_file_name(out_name))
}
