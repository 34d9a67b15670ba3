pub mod albums;
pub mod config;
pub mod engine;
pub mod error;
pub mod paths;
pub mod progress;
pub mod publish;
pub mod records;
pub mod scanner;
pub mod stats;
pub mod storage;
pub mod tree;
pub mod valuation;

pub use config::AppConfig;
pub use engine::{CatalogEngine, TreeResult};
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
pub use stats::{AggregationBucket, StatsReport, UNKNOWN_GROUP};
pub use tree::{FolderNode, TreeIndex};
