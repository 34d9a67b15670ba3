use album_index_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// CLI progress reporter: a spinner per walk, with a running album count
/// during aggregation.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
    albums: AtomicU64,
    skipped: AtomicU64,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            albums: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    fn start_spinner(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn finish_spinner(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn set_message(&self, message: String) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_message(message);
            }
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_tree_start(&self, root: &str) {
        self.start_spinner(format!("Indexing {}...", root));
    }

    fn on_tree_complete(&self, folders: usize, duration_secs: f64) {
        self.finish_spinner();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Tree complete: {} folders in {:.2}s",
            folders, duration_secs
        );
    }

    fn on_walk_start(&self, root: &str) {
        self.albums.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        self.start_spinner(format!("Aggregating {}...", root));
    }

    fn on_album(&self, relative_path: &str, _items: u64) {
        let albums = self.albums.fetch_add(1, Ordering::Relaxed) + 1;
        self.set_message(format!("Aggregating... {} albums ({})", albums, relative_path));
    }

    fn on_file_skipped(&self, _path: &str, _reason: &str) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    fn on_walk_complete(&self, albums: u64, duration_secs: f64) {
        self.finish_spinner();
        let skipped = self.skipped.load(Ordering::Relaxed);
        eprintln!(
            "  \x1b[32m✓\x1b[0m Aggregation complete: {} albums in {:.2}s{}",
            albums,
            duration_secs,
            if skipped > 0 {
                format!(", {} unreadable data files skipped", skipped)
            } else {
                String::new()
            }
        );
    }
}
