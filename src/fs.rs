//! Filesystem access, limited to the one fact the build cares about:
//! last-modification timestamps.

use std::os::unix::prelude::MetadataExt;
use std::path::Path;

/// MTime info gathered for a file.  This also models "file is absent",
/// which sorts before every real timestamp, so an ordinary `<` comparison
/// implements "missing is infinitely old".
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MTime {
    Missing,
    Stamp(i64),
}

/// stat() an on-disk path, producing its MTime.
pub fn stat(path: impl AsRef<Path>) -> std::io::Result<MTime> {
    Ok(match std::fs::metadata(path) {
        Ok(meta) => MTime::Stamp(meta.mtime()),
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                MTime::Missing
            } else {
                return Err(err);
            }
        }
    })
}

/// The filesystem as seen by the build walk.  A trait so tests can
/// substitute an in-memory implementation.
pub trait FileSystem {
    fn stat(&self, path: &str) -> std::io::Result<MTime>;
}

pub struct RealFileSystem {}

impl RealFileSystem {
    pub fn new() -> Self {
        RealFileSystem {}
    }
}

impl FileSystem for RealFileSystem {
    fn stat(&self, path: &str) -> std::io::Result<MTime> {
        stat(path)
    }
}
