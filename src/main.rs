//! DUPERY - Command line entry point
//!
//! Bootstraps the registry in a data directory, applies any requested
//! imports and prints what the host would see.

use anyhow::{Context, Error as E, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_chrome::ChromeLayerBuilder;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use dupery::{Personality, PersonalityConfig, PersonalityManager};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding PERSONALITIES.json and the override files.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// JSON configuration file; overrides --dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of stock personalities standing in for the host roster.
    #[arg(long)]
    stock: Option<PathBuf>,

    /// Import a mod's personalities, as SOURCE=FILE. Repeatable.
    #[arg(long = "import", value_parser = parse_import)]
    imports: Vec<(String, PathBuf)>,

    /// Enable tracing (generates a trace-timestamp.json file).
    #[arg(long)]
    tracing: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the personalities the host would receive
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Count personalities across every layer, hidden ones included
    Count,
}

fn parse_import(value: &str) -> std::result::Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((source, file)) if !source.is_empty() && !file.is_empty() => {
            Ok((source.to_string(), PathBuf::from(file)))
        }
        _ => Err(format!("expected SOURCE=FILE, got {:?}", value)),
    }
}

fn load_config(args: &Args) -> Result<PersonalityConfig> {
    match &args.config {
        Some(path) => PersonalityConfig::load(path)
            .with_context(|| format!("Failed to load config file {:?}", path)),
        None => Ok(PersonalityConfig::new(&args.dir)),
    }
}

fn load_stock(path: Option<&Path>) -> Result<Vec<Personality>> {
    let Some(path) = path else {
        tracing::warn!("No --stock roster given, starting with an empty stock layer");
        return Ok(Vec::new());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stock roster {:?}", path))?;
    serde_json::from_str(&content)
        .map_err(|e| E::msg(format!("Failed to parse stock roster {:?}: {}", path, e)))
}

fn print_personalities(personalities: &[Personality], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(personalities)?);
        return Ok(());
    }

    for personality in personalities {
        println!(
            "{:<24} {:<20} {:<10} {}",
            personality.name_string_key,
            personality.name,
            personality.personality_type,
            personality.source_id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let _guard = if args.tracing {
        let (chrome_layer, guard) = ChromeLayerBuilder::new().build();
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .with(chrome_layer)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
        None
    };

    let config = load_config(&args)?;
    let stock = load_stock(args.stock.as_deref())?;

    let mut manager = PersonalityManager::new(config, stock)
        .context("Failed to initialise the personality registry")?;

    for (source_id, file) in &args.imports {
        // One bad mod should not hide the others.
        if let Err(e) = manager.import_personalities(source_id, file) {
            tracing::error!("Skipping import <{}>: {}", source_id, e);
        }
    }

    match args.command {
        Command::List { json } => print_personalities(&manager.get_personalities(), json)?,
        Command::Count => println!("{}", manager.count_personalities()),
    }

    Ok(())
}
