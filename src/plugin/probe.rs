//! Resource availability checks.

use std::fs::File;
use std::path::Path;

/// Decides whether a gated variant's resource is usable.
pub trait AvailabilityProber: Send + Sync {
    /// True iff `path` exists and is readable right now.
    fn probe(&self, path: &Path) -> bool;
}

/// Probes the local filesystem: the path must be a regular file that can be
/// opened for reading. Results are not cached.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSystemProber;

impl AvailabilityProber for FileSystemProber {
    fn probe(&self, path: &Path) -> bool {
        path.is_file() && File::open(path).is_ok()
    }
}

impl<F> AvailabilityProber for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn probe(&self, path: &Path) -> bool {
        self(path)
    }
}
