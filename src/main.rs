//! Page-Prompt main entry point
//!
//! This is the command-line interface for inspecting, migrating and testing
//! rule configurations stored in a JSON key/value snapshot.

use anyhow::Context;
use clap::{Parser, Subcommand};
use page_prompt::pattern::{is_matchable_url, normalize_pattern, parse_pattern};
use page_prompt::rules::{CompiledRules, Configuration, Migrator};
use page_prompt::settings::{load_settings_or_default, Settings};
use page_prompt::storage::{load_configuration, save_if_changed, MemoryStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Page-Prompt: pick the right prompt for the page you are on
///
/// Rule configurations are read from a JSON file holding the key/value store
/// snapshot (keys `promptConfig`, `ruleConfig` or `urlPatterns`).
#[derive(Parser, Debug)]
#[command(name = "page-prompt")]
#[command(version = "1.0.0")]
#[command(about = "URL rule matching for page-aware prompts", long_about = None)]
struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the prompt and selector chosen for each URL
    Match {
        /// Path to the store snapshot
        #[arg(value_name = "STORE")]
        store: PathBuf,

        /// URLs to match
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,

        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Upgrade the stored configuration to the current schema
    Migrate {
        /// Path to the store snapshot
        #[arg(value_name = "STORE")]
        store: PathBuf,

        /// Print the migrated configuration without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the (migrated) configuration
    Show {
        /// Path to the store snapshot
        #[arg(value_name = "STORE")]
        store: PathBuf,
    },

    /// List patterns that can never match
    Check {
        /// Path to the store snapshot
        #[arg(value_name = "STORE")]
        store: PathBuf,
    },

    /// Explain how a single pattern is normalized and what it matches
    Pattern {
        /// Raw pattern as a user would type it
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// URLs to test against the pattern
        #[arg(value_name = "URL")]
        urls: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let settings = load_settings_or_default(cli.settings.as_deref()).with_context(|| {
        format!(
            "Failed to load settings from {}",
            cli.settings
                .as_deref()
                .map_or_else(|| "<default>".into(), Path::to_string_lossy)
        )
    })?;
    tracing::debug!("Default prompt: {}", settings.default_prompt);

    match cli.command {
        Command::Match { store, urls, json } => handle_match(&settings, &store, &urls, json),
        Command::Migrate { store, dry_run } => handle_migrate(&settings, &store, dry_run),
        Command::Show { store } => handle_show(&settings, &store),
        Command::Check { store } => handle_check(&settings, &store),
        Command::Pattern { pattern, urls } => handle_pattern(&pattern, &urls),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_prompt=info,warn"),
            1 => EnvFilter::new("page_prompt=debug,info"),
            2 => EnvFilter::new("page_prompt=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_store(path: &Path) -> anyhow::Result<MemoryStore> {
    MemoryStore::open(path).with_context(|| format!("Failed to read store {}", path.display()))
}

fn write_store(path: &Path, store: &MemoryStore) -> anyhow::Result<()> {
    store
        .write_to(path)
        .with_context(|| format!("Failed to write store {}", path.display()))
}

fn load(settings: &Settings, store: &MemoryStore) -> Configuration {
    let mut migrator = Migrator::with_default_prompt(settings.default_prompt.clone());
    load_configuration(store, &mut migrator)
}

/// Handles `match`: prints the prompt and selector for each URL
fn handle_match(settings: &Settings, path: &Path, urls: &[String], json: bool) -> anyhow::Result<()> {
    let store = read_store(path)?;
    let config = load(settings, &store);
    let rules = CompiledRules::new(&config, &settings.default_prompt);

    for url in urls {
        if !is_matchable_url(url) {
            tracing::warn!("Skipping {}: not an http(s) page URL", url);
            continue;
        }

        let result = rules.find(url);
        if json {
            let line = serde_json::json!({ "url": url, "match": result });
            println!("{}", line);
        } else {
            println!("{}", url);
            println!("  prompt: {}", result.prompt);
            if result.css_selector.is_empty() {
                println!("  selector: <none>");
            } else {
                println!("  selector: {}", result.css_selector);
            }
        }
    }

    Ok(())
}

/// Handles `migrate`: rewrites the store in the canonical shape
fn handle_migrate(settings: &Settings, path: &Path, dry_run: bool) -> anyhow::Result<()> {
    let mut store = read_store(path)?;
    let config = load(settings, &store);

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if save_if_changed(&mut store, &config)? {
        write_store(path, &store)?;
        tracing::info!(
            "Wrote {} groups ({} rules) to {}",
            config.groups.len(),
            config.rule_count(),
            path.display()
        );
        println!("✓ Store migrated: {}", path.display());
    } else {
        println!("✓ Store already canonical: {}", path.display());
    }

    Ok(())
}

/// Handles `show`: prints the migrated configuration
fn handle_show(settings: &Settings, path: &Path) -> anyhow::Result<()> {
    let store = read_store(path)?;
    let config = load(settings, &store);

    for group in &config.groups {
        let label = if group.is_default { "default group" } else { "group" };
        println!("[{}] {} ({} rules)", label, group.id, group.rules.len());
        println!("  prompt: {}", group.prompt);
        if group.is_default && !group.css_selector.is_empty() {
            println!("  selector: {}", group.css_selector);
        }
        for rule in &group.rules {
            println!("  - rule {}", rule.id);
            for line in rule.url_pattern.lines() {
                println!("      {}", line);
            }
            if !rule.css_selector.is_empty() {
                println!("      selector: {}", rule.css_selector);
            }
        }
    }

    Ok(())
}

/// Handles `check`: lists patterns that fail to compile
fn handle_check(settings: &Settings, path: &Path) -> anyhow::Result<()> {
    let store = read_store(path)?;
    let config = load(settings, &store);
    let rules = CompiledRules::new(&config, &settings.default_prompt);

    let invalid = rules.invalid_patterns();
    if invalid.is_empty() {
        println!("✓ All patterns are valid");
        return Ok(());
    }

    println!("Invalid patterns ({}):", invalid.len());
    for entry in invalid {
        println!(
            "  - group {} / rule {}: '{}' ({})",
            entry.group_id, entry.rule_id, entry.pattern, entry.reason
        );
    }

    Ok(())
}

/// Handles `pattern`: shows normalization and tests URLs
fn handle_pattern(raw: &str, urls: &[String]) -> anyhow::Result<()> {
    println!("Pattern:    {}", raw);
    println!("Normalized: {}", normalize_pattern(raw));

    let matcher = match parse_pattern(raw) {
        Ok(matcher) => matcher,
        Err(e) => {
            println!("✗ Invalid: {}", e);
            return Ok(());
        }
    };
    println!("✓ Valid");

    for url in urls {
        let mark = if matcher.test(url) { "✓" } else { "✗" };
        println!("  {} {}", mark, url);
    }

    Ok(())
}
