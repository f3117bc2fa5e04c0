//! Watchstore CLI - inspect watcher manifests

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use watchstore::{load_store, Backend, FixSuggestion, Manifest, WatchError, WatcherView};

#[derive(Parser)]
#[command(name = "watchstore")]
#[command(about = "Watchstore - keyed registry for scheduler policy watchers")]
#[command(version)]
struct Cli {
    /// Log store activity (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a manifest file (parse only)
    Validate {
        /// Path to manifest YAML
        file: String,
    },

    /// Load a manifest and list the registered watchers
    List {
        /// Path to manifest YAML
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Load a manifest, remove one key and report what was removed
    Remove {
        /// Path to manifest YAML
        file: String,

        /// Key to remove (matched exactly)
        key: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Listing {
    backend: Backend,
    size: usize,
    watchers: Vec<WatcherView>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate { file } => validate_manifest(&file),
        Commands::List { file, format } => list_watchers(&file, format),
        Commands::Remove { file, key } => remove_watcher(&file, &key),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn validate_manifest(file: &str) -> Result<(), WatchError> {
    let manifest = Manifest::load(file)?;

    println!("{} Manifest '{}' is valid", "✓".green(), file);
    println!("  Backend: {}", manifest.backend);
    println!("  Entries: {}", manifest.watchers.len());
    println!("  Keys: {}", manifest.keys().len());

    let blank = manifest.blank_keys();
    if blank > 0 {
        println!(
            "  {} {} entries with a blank key will be ignored",
            "warning:".yellow(),
            blank
        );
    }
    for key in manifest.duplicate_keys() {
        println!(
            "  {} key '{}' is declared more than once; the last entry wins",
            "warning:".yellow(),
            key
        );
    }

    Ok(())
}

fn list_watchers(file: &str, format: Format) -> Result<(), WatchError> {
    let (manifest, store) = load_store(file)?;

    // The store is unordered: walk the manifest's sorted keys instead.
    let watchers: Vec<WatcherView> = manifest
        .keys()
        .into_iter()
        .filter_map(|key| store.get(key).map(|w| w.view(key)))
        .collect();

    match format {
        Format::Json => {
            let listing = Listing {
                backend: manifest.backend,
                size: store.size(),
                watchers,
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Format::Text => {
            for w in &watchers {
                println!(
                    "{}  {}  {}",
                    w.key.cyan().bold(),
                    w.policy,
                    if w.schedule.is_empty() { "-" } else { w.schedule.as_str() }
                );
            }
            println!(
                "{} watchers registered ({} backend)",
                store.size(),
                manifest.backend
            );
        }
    }

    Ok(())
}

fn remove_watcher(file: &str, key: &str) -> Result<(), WatchError> {
    let (_, mut store) = load_store(file)?;

    let removed = store.remove(key).ok_or_else(|| WatchError::UnknownKey {
        key: key.to_string(),
    })?;

    println!(
        "{} Removed '{}' (policy: {})",
        "✓".green(),
        key,
        removed.policy()
    );
    println!("{} watchers remaining", store.size());

    Ok(())
}
