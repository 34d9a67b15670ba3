use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "album-index")]
#[command(about = "Index and summarize an album collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the folder tree and write it as JSON
    Tree {
        /// Output file (defaults to the configured tree_output)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the tree instead of writing it
        #[arg(long)]
        stdout: bool,
    },
    /// Show the data file associated with a folder
    Resolve {
        /// Folder path relative to the albums root
        path: String,
    },
    /// Roll up album, item and valuation statistics
    Stats {
        /// Restrict to a folder below the albums root
        #[arg(short, long)]
        path: Option<String>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Write the album and page listing for the gallery
    Albums {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Install a converted pages document into an album folder
    Publish {
        /// Album folder relative to the albums root
        #[arg(short, long)]
        album: String,
        /// Pages document produced by the spreadsheet converter
        #[arg(short, long)]
        pages: PathBuf,
        /// File name to store under (defaults to the pages file name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Print the last modification date of a file in an album folder
    FileDate {
        #[arg(short, long)]
        album: String,
        #[arg(short, long)]
        file: String,
    },
    /// Manage hand-entered collection items
    #[command(subcommand)]
    Items(ItemCommands),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Subcommand)]
pub enum ItemCommands {
    /// List the items of an album
    List {
        #[arg(short, long)]
        album: String,
    },
    /// Add an item to an album
    Add(AddItemArgs),
    /// Remove an item by id
    Remove { id: i64 },
    /// Count items per status for an album, or list albums with items
    Tally {
        #[arg(short, long)]
        album: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct AddItemArgs {
    #[arg(short, long)]
    pub album: String,
    #[arg(short, long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub country: String,
    #[arg(long, default_value = "")]
    pub year: String,
    /// mint, used, variety or self-adhesive
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, default_value = "")]
    pub classification: String,
    #[arg(long)]
    pub valuation: Option<f64>,
    #[arg(long, default_value = "")]
    pub cancellation: String,
    #[arg(long, default_value = "")]
    pub notes: String,
    #[arg(long)]
    pub damaged: bool,
}
