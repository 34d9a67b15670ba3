/// Trait for reporting walk progress.
///
/// CLI implements with indicatif, tests and library callers use
/// [`SilentReporter`]. Aggregation calls these from rayon workers, so
/// implementations must tolerate concurrent calls.
pub trait ProgressReporter: Send + Sync {
    fn on_tree_start(&self, _root: &str) {}
    fn on_tree_complete(&self, _folders: usize, _duration_secs: f64) {}
    fn on_walk_start(&self, _root: &str) {}
    fn on_album(&self, _relative_path: &str, _items: u64) {}
    fn on_file_skipped(&self, _path: &str, _reason: &str) {}
    fn on_walk_complete(&self, _albums: u64, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
