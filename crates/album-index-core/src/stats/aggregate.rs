use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

use super::{AggregationBucket, GroupTally, StatsReport, UNKNOWN_GROUP};
use crate::error::Error;
use crate::paths;
use crate::progress::{ProgressReporter, SilentReporter};
use crate::records::{JsonPageSource, PageSource, RecordPage};
use crate::scanner::{self, DirListing, ScanOptions};
use crate::valuation::ValuationPolicy;

/// Rolls up album, item and valuation statistics per top-level group.
///
/// The group of a folder is the name of the first folder below the walk
/// start on its branch; folders at the walk start itself fall into
/// [`UNKNOWN_GROUP`]. A folder holding at least one data file counts as one
/// album, and every data file in it contributes its listing pages.
pub struct Aggregator<'a> {
    scan: &'a ScanOptions,
    policy: &'a ValuationPolicy,
    source: &'a dyn PageSource,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> Aggregator<'a> {
    pub fn new(scan: &'a ScanOptions, policy: &'a ValuationPolicy) -> Self {
        Self {
            scan,
            policy,
            source: &JsonPageSource,
            reporter: &SilentReporter,
        }
    }

    pub fn with_source(mut self, source: &'a dyn PageSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_reporter(mut self, reporter: &'a dyn ProgressReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Aggregates `root`, or `root/subtree` when a subtree is given.
    pub fn aggregate(&self, root: &Path, subtree: Option<&str>) -> Result<StatsReport, Error> {
        let start_dir = match subtree {
            Some(subtree) => root.join(paths::sanitize_subtree(subtree)?),
            None => root.to_path_buf(),
        };

        let metadata = fs::metadata(&start_dir).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("Error reading {}: {}", start_dir.display(), err),
            )
        })?;
        if !metadata.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", start_dir.display()),
            )));
        }

        self.reporter
            .on_walk_start(&start_dir.to_string_lossy());
        let walk_start = Instant::now();

        let listing = scanner::list_dir(&start_dir, self.scan)?;
        let own = self.tally_own_files(&start_dir, Path::new(""), None, &listing);

        // Each top-level branch is an independent subtree; tallies are merged
        // back in listing order.
        let branches: Vec<GroupTally> = listing
            .subdirs
            .par_iter()
            .map(|subdir| {
                self.tally_dir(
                    &subdir.path,
                    &PathBuf::from(&subdir.name),
                    Some(subdir.name.as_str()),
                )
            })
            .collect();

        let tally = branches.into_iter().fold(own, GroupTally::merge);
        let report = tally.into_report();

        let duration = walk_start.elapsed();
        self.reporter
            .on_walk_complete(report.total().album_count, duration.as_secs_f64());
        debug!(
            "Aggregated {} in {:.2}s: {} groups, {} albums, {} items",
            start_dir.display(),
            duration.as_secs_f64(),
            report.groups().len(),
            report.total().album_count,
            report.total().item_count,
        );

        Ok(report)
    }

    fn tally_dir(&self, dir: &Path, relative: &Path, group: Option<&str>) -> GroupTally {
        let listing = match scanner::list_dir(dir, self.scan) {
            Ok(listing) => listing,
            Err(err) => {
                warn!("Skipping unreadable folder: {}", err);
                return GroupTally::default();
            }
        };

        let mut tally = self.tally_own_files(dir, relative, group, &listing);
        for subdir in &listing.subdirs {
            let child_group = group.unwrap_or(subdir.name.as_str());
            tally = tally.merge(self.tally_dir(
                &subdir.path,
                &relative.join(&subdir.name),
                Some(child_group),
            ));
        }
        tally
    }

    fn tally_own_files(
        &self,
        dir: &Path,
        relative: &Path,
        group: Option<&str>,
        listing: &DirListing,
    ) -> GroupTally {
        if listing.data_files.is_empty() {
            return GroupTally::default();
        }

        let mut bucket = AggregationBucket {
            album_count: 1,
            ..AggregationBucket::default()
        };

        for file_name in &listing.data_files {
            let path = dir.join(file_name);
            match self.source.load_pages(&path) {
                Ok(pages) => bucket.merge(&self.tally_pages(&pages)),
                Err(err) => {
                    warn!("Skipping data file {}: {}", path.display(), err);
                    self.reporter
                        .on_file_skipped(&path.to_string_lossy(), &err.to_string());
                }
            }
        }

        self.reporter
            .on_album(&paths::to_relative_string(relative), bucket.item_count);
        GroupTally::single(group.unwrap_or(UNKNOWN_GROUP), bucket)
    }

    /// Items and valuation of one data file; album count is left at zero.
    pub fn tally_pages(&self, pages: &[RecordPage]) -> AggregationBucket {
        let mut bucket = AggregationBucket::default();
        for page in pages {
            if self.policy.is_excluded_page(&page.name) {
                continue;
            }
            bucket.item_count += page.records.len() as u64;
            bucket.valuation_sum += page
                .records
                .iter()
                .filter_map(|record| self.policy.record_valuation(record))
                .sum::<f64>();
        }
        bucket
    }
}
