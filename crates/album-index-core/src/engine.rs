use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::albums::{self, Album};
use crate::config::AppConfig;
use crate::error::Error;
use crate::progress::{ProgressReporter, SilentReporter};
use crate::publish;
use crate::records::{JsonPageSource, PageSource, RecordPage};
use crate::scanner::ScanOptions;
use crate::stats::{Aggregator, StatsReport};
use crate::storage::Database;
use crate::tree::{self, FolderNode, TreeIndex};
use crate::valuation::ValuationPolicy;

/// Entry point tying configuration to the catalog operations.
pub struct CatalogEngine {
    config: AppConfig,
    scan: ScanOptions,
    policy: ValuationPolicy,
    source: Box<dyn PageSource>,
}

#[derive(Debug)]
pub struct TreeResult {
    pub tree: FolderNode,
    pub folders: usize,
    pub data_files: usize,
    pub duration: Duration,
}

impl CatalogEngine {
    pub fn new(config: AppConfig) -> Self {
        let scan = config.scan_options();
        let policy = config.valuation_policy();
        Self {
            config,
            scan,
            policy,
            source: Box::new(JsonPageSource),
        }
    }

    pub fn with_page_source(mut self, source: Box<dyn PageSource>) -> Self {
        self.source = source;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.config.albums_root
    }

    pub fn build_tree(&self, reporter: &dyn ProgressReporter) -> Result<TreeResult, Error> {
        reporter.on_tree_start(&self.root().to_string_lossy());
        let start = Instant::now();
        let tree = tree::build_tree(self.root(), &self.scan)?;
        let duration = start.elapsed();

        let folders = tree.node_count();
        let data_files = tree.walk().filter(|n| n.data_file.is_some()).count();
        reporter.on_tree_complete(folders, duration.as_secs_f64());
        debug!(
            "Tree built in {:.2}s: {} folders, {} with data files",
            duration.as_secs_f64(),
            folders,
            data_files,
        );

        Ok(TreeResult {
            tree,
            folders,
            data_files,
            duration,
        })
    }

    /// Builds the tree and persists it to `output`, or to the configured
    /// tree output when none is given.
    pub fn write_tree(
        &self,
        output: Option<&Path>,
        reporter: &dyn ProgressReporter,
    ) -> Result<(TreeResult, PathBuf), Error> {
        let result = self.build_tree(reporter)?;
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.tree_output.clone());
        tree::write_tree_json(&result.tree, &output)?;
        info!("Tree written to {}", output.display());
        Ok((result, output))
    }

    /// Data file of the folder at `relative_path`, if it has one. Uses the
    /// persisted tree when present and falls back to walking the root.
    pub fn resolve(&self, relative_path: &str) -> Result<Option<PathBuf>, Error> {
        let tree = match tree::read_tree_json(&self.config.tree_output) {
            Ok(tree) => tree,
            Err(err) => {
                debug!("Persisted tree unavailable ({}), walking root", err);
                self.build_tree(&SilentReporter)?.tree
            }
        };
        let index = TreeIndex::new(&tree);
        if !index.contains(relative_path) {
            return Err(Error::NotFound(format!("folder '{}'", relative_path)));
        }
        Ok(index.data_file_path(self.root(), relative_path))
    }

    pub fn aggregate(
        &self,
        subtree: Option<&str>,
        reporter: &dyn ProgressReporter,
    ) -> Result<StatsReport, Error> {
        info!("Aggregating collection statistics...");
        Aggregator::new(&self.scan, &self.policy)
            .with_source(self.source.as_ref())
            .with_reporter(reporter)
            .aggregate(self.root(), subtree.filter(|s| !s.trim().is_empty()))
    }

    pub fn albums(&self) -> Result<Vec<Album>, Error> {
        let start = Instant::now();
        let albums = albums::scan_albums(self.root(), &self.scan)?;
        debug!(
            "Album scan completed in {:.2}s: {} albums",
            start.elapsed().as_secs_f64(),
            albums.len()
        );
        Ok(albums)
    }

    pub fn write_albums(&self, output: Option<&Path>) -> Result<(usize, PathBuf), Error> {
        let albums = self.albums()?;
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.albums_output.clone());
        albums::write_albums_json(&albums, &output)?;
        Ok((albums.len(), output))
    }

    /// Installs a converted pages document into an album folder, then
    /// refreshes the persisted tree so navigation sees the new file.
    pub fn publish(
        &self,
        album_path: &str,
        file_name: &str,
        pages: &[RecordPage],
        reporter: &dyn ProgressReporter,
    ) -> Result<PathBuf, Error> {
        let installed =
            publish::install_data_file(self.root(), album_path, file_name, pages, &self.scan)?;
        self.write_tree(None, reporter)?;
        Ok(installed)
    }

    pub fn load_pages(&self, path: &Path) -> Result<Vec<RecordPage>, Error> {
        self.source.load_pages(path)
    }

    pub fn data_file_modified(
        &self,
        album_path: &str,
        file_name: &str,
    ) -> Result<DateTime<Utc>, Error> {
        publish::data_file_modified(self.root(), album_path, file_name)
    }

    pub fn open_store(&self) -> Result<Database, Error> {
        Ok(Database::open(&self.config.store_path)?)
    }
}
