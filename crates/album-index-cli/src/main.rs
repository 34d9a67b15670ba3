mod commands;
mod logging;
mod progress;
mod render;

use std::path::Path;
use std::process;

use album_index_core::storage::{CollectionStore, ItemStatus, ItemTally, NewItem};
use album_index_core::{AppConfig, CatalogEngine};
use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{AddItemArgs, Cli, Commands, ItemCommands, OutputFormat};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match album_index_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let Some(command) = args.command else {
        let _ = Cli::command().print_long_help();
        return;
    };

    if let Err(err) = run(command, config) {
        error!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(command: Commands, config: AppConfig) -> Result<()> {
    match command {
        Commands::PrintConfig => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Tree { output, stdout } => run_tree(&CatalogEngine::new(config), output, stdout),
        Commands::Resolve { path } => {
            let engine = CatalogEngine::new(config);
            match engine.resolve(&path)? {
                Some(data_file) => println!("{}", data_file.display()),
                None => println!("{}", format!("No data file in '{}'", path).yellow()),
            }
            Ok(())
        }
        Commands::Stats { path, format } => {
            let engine = CatalogEngine::new(config);
            let reporter = CliReporter::new();
            let report = engine
                .aggregate(path.as_deref(), &reporter)
                .with_context(|| format!("aggregating {}", engine.root().display()))?;
            match format {
                OutputFormat::Table => render::print_table(&report),
                OutputFormat::Json => render::print_json(&report)?,
                OutputFormat::Csv => render::print_csv(&report)?,
            }
            Ok(())
        }
        Commands::Albums { output } => {
            let engine = CatalogEngine::new(config);
            let (count, written) = engine.write_albums(output.as_deref())?;
            info!(
                "{} albums written to {}",
                format!("{}", count).cyan(),
                written.display()
            );
            Ok(())
        }
        Commands::Publish { album, pages, name } => {
            let engine = CatalogEngine::new(config);
            run_publish(&engine, &album, &pages, name)
        }
        Commands::FileDate { album, file } => {
            let engine = CatalogEngine::new(config);
            let modified = engine.data_file_modified(&album, &file)?;
            println!("{}", modified.to_rfc3339());
            Ok(())
        }
        Commands::Items(command) => run_items(&CatalogEngine::new(config), command),
    }
}

fn run_tree(engine: &CatalogEngine, output: Option<std::path::PathBuf>, stdout: bool) -> Result<()> {
    let reporter = CliReporter::new();
    if stdout {
        let result = engine.build_tree(&reporter)?;
        println!("{}", album_index_core::tree::to_json_string(&result.tree)?);
        return Ok(());
    }

    let (result, written) = engine.write_tree(output.as_deref(), &reporter)?;
    info!(
        "{} folders, {} with data files, written to {}",
        format!("{}", result.folders).cyan(),
        format!("{}", result.data_files).cyan(),
        written.display()
    );
    Ok(())
}

fn run_publish(engine: &CatalogEngine, album: &str, pages: &Path, name: Option<String>) -> Result<()> {
    let file_name = match name {
        Some(name) => name,
        None => pages
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("pages path {} has no file name", pages.display()))?,
    };
    let document = engine
        .load_pages(pages)
        .with_context(|| format!("reading pages document {}", pages.display()))?;

    let reporter = CliReporter::new();
    let installed = engine.publish(album, &file_name, &document, &reporter)?;
    info!("Installed {}", installed.display().to_string().green());
    Ok(())
}

fn run_items(engine: &CatalogEngine, command: ItemCommands) -> Result<()> {
    let store = engine
        .open_store()
        .with_context(|| format!("opening {}", engine.config().store_path.display()))?;

    match command {
        ItemCommands::List { album } => {
            for item in store.list(&album)? {
                println!(
                    "{:>5}  {}  {} {}  {}  {}",
                    item.id,
                    item.name.bold(),
                    item.country,
                    item.year,
                    item.status.map(|s| s.to_string()).unwrap_or_default(),
                    item.valuation
                        .map(|v| format!("{:.2} €", v))
                        .unwrap_or_default(),
                );
            }
        }
        ItemCommands::Add(args) => {
            let item = store.add(new_item(args)?)?;
            info!("Added item {} to '{}'", item.id, item.album_key);
        }
        ItemCommands::Remove { id } => {
            if store.remove(id)? {
                info!("Removed item {}", id);
            } else {
                println!("{}", format!("No item with id {}", id).yellow());
            }
        }
        ItemCommands::Tally { album: Some(album) } => {
            let tally = ItemTally::from_items(&store.list(&album)?);
            println!("Total         : {}", tally.total);
            println!("Used          : {}", tally.used);
            println!("Mint          : {}", tally.mint);
            println!("Varieties     : {}", tally.varieties);
            println!("Self-adhesive : {}", tally.self_adhesive);
            println!("Damaged       : {}", tally.damaged.to_string().red());
        }
        ItemCommands::Tally { album: None } => {
            for (album, count) in store.album_keys()? {
                println!("{:>5}  {}", count, album);
            }
        }
    }
    Ok(())
}

fn new_item(args: AddItemArgs) -> Result<NewItem> {
    let status = args
        .status
        .as_deref()
        .map(str::parse::<ItemStatus>)
        .transpose()
        .map_err(|e| anyhow!(e))?;

    Ok(NewItem {
        album_key: args.album,
        name: args.name,
        country: args.country,
        year: args.year,
        status,
        classification: args.classification,
        valuation: args.valuation,
        cancellation: args.cancellation,
        notes: args.notes,
        damaged: args.damaged,
    })
}
