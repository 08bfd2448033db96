//! Directory-mirroring backends.
//!
//! A [`TreeCopier`] mirrors or merges one directory tree into another, skipping
//! any file or directory whose name is in the exclusion list, and answers with
//! a robocopy-style status code:
//!
//! | bit | meaning                                          |
//! |-----|--------------------------------------------------|
//! | 1   | one or more files were copied                    |
//! | 2   | extra entries exist (or were purged) at the dest |
//! | 4   | file/directory mismatches were found             |
//! | 8   | some entries could not be copied                 |
//! | 16  | serious error, nothing was copied                |
//!
//! Classification of the code is the synchronizer's job, not the copier's.

pub mod native;
pub mod robocopy;

pub use native::NativeCopier;
pub use robocopy::RobocopyCopier;

use crate::models::SyncMode;
use anyhow::Result;
use camino::Utf8PathBuf;
use std::ffi::OsStr;

/// Bit set when files were copied.
pub const STATUS_COPIED: i32 = 1;
/// Bit set when the destination has entries the source lacks.
pub const STATUS_EXTRAS: i32 = 2;
/// Bit set when an entry is a file on one side and a directory on the other.
pub const STATUS_MISMATCH: i32 = 4;
/// Bit set when at least one copy or delete failed.
pub const STATUS_FAILED: i32 = 8;
/// Nothing could be attempted (e.g. the source root is missing).
pub const STATUS_FATAL: i32 = 16;

/// Arguments of one copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub source: Utf8PathBuf,
    pub dest: Utf8PathBuf,
    pub mode: SyncMode,
    pub exclusions: Vec<String>,
    /// When false only the top level of `source` is considered.
    pub recursive: bool,
}

impl CopyRequest {
    /// Whether an entry with this file name must be left alone.
    pub fn is_excluded(&self, name: &OsStr) -> bool {
        is_excluded(name, &self.exclusions)
    }
}

/// Name-based exclusion shared by every backend and by both tree walks.
pub fn is_excluded(name: &OsStr, exclusions: &[String]) -> bool {
    name.to_str()
        .is_some_and(|name| exclusions.iter().any(|token| token == name))
}

/// Mirror or merge a directory tree.
#[cfg_attr(test, mockall::automock)]
pub trait TreeCopier {
    /// Perform the copy and return the status code.
    ///
    /// An `Err` means the backend itself could not run; copy problems inside
    /// the tree are reported through the status bits instead.
    fn copy_tree(&self, request: &CopyRequest) -> Result<i32>;
}

impl<T: TreeCopier + ?Sized> TreeCopier for Box<T> {
    fn copy_tree(&self, request: &CopyRequest) -> Result<i32> {
        (**self).copy_tree(request)
    }
}
