//! pgtail - semantic highlighting for PostgreSQL logs
//!
//! Command-line entry point: highlights log lines and manages the
//! highlighting configuration (toggles, custom patterns, import/export).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pgtail_core::{Category, HighlightingConfig};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "pgtail")]
#[command(about = "Semantic highlighting for PostgreSQL server logs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Highlighting config file (defaults to <config dir>/pgtail/highlighting.toml)
    #[arg(long, global = true, env = "PGTAIL_CONFIG")]
    config: Option<PathBuf>,

    /// Set log level
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Highlight log lines from a file or stdin
    Highlight {
        /// Log file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Print raw [style]text[/] markup instead of ANSI escapes
        #[arg(long)]
        markup: bool,

        /// Disable styling (same as NO_COLOR=1)
        #[arg(long)]
        no_color: bool,
    },

    /// List highlighters with their priority and state
    List {
        /// Only show one category
        #[arg(short, long)]
        category: Option<Category>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Highlight built-in sample lines
    Preview {
        /// Only show one category
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Enable a highlighter
    Enable {
        /// Highlighter name
        name: String,
    },

    /// Disable a highlighter
    Disable {
        /// Highlighter name
        name: String,
    },

    /// Add a custom regex highlighter
    Add {
        /// Unique name
        name: String,

        /// Regular expression; must not match an empty string
        pattern: String,

        /// Theme key or inline style such as "bold magenta"
        #[arg(default_value = "custom")]
        style: String,

        /// Priority (lower wins overlaps; defaults to the custom band)
        #[arg(short, long)]
        priority: Option<i32>,
    },

    /// Remove a custom highlighter
    Remove {
        /// Custom pattern name
        name: String,
    },

    /// Print the config as TOML, or write it to a file
    Export {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the config with a validated TOML file
    Import {
        /// TOML file to import
        file: PathBuf,
    },

    /// Check a config file (defaults to the active one)
    Validate {
        /// TOML file to check
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let level = level.as_str().to_lowercase();
    let filter = EnvFilter::new(format!("pgtail={},pgtail_core={}", level, level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Log to stderr; stdout carries highlighted output
        .init();

    debug!("pgtail v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = cli.config.unwrap_or_else(HighlightingConfig::default_path);
    debug!("Using config {}", config_path.display());

    match cli.command {
        Commands::Highlight {
            file,
            markup,
            no_color,
        } => cli::highlight::handle(&config_path, file, markup, no_color)?,
        Commands::List { category, format } => {
            cli::list::handle_list(&config_path, category, &format)?
        }
        Commands::Preview { category } => cli::list::handle_preview(&config_path, category)?,
        Commands::Enable { name } => cli::manage::handle_toggle(&config_path, &name, true)?,
        Commands::Disable { name } => cli::manage::handle_toggle(&config_path, &name, false)?,
        Commands::Add {
            name,
            pattern,
            style,
            priority,
        } => cli::manage::handle_add(&config_path, &name, &pattern, &style, priority)?,
        Commands::Remove { name } => cli::manage::handle_remove(&config_path, &name)?,
        Commands::Export { output } => cli::config::handle_export(&config_path, output)?,
        Commands::Import { file } => cli::config::handle_import(&config_path, &file)?,
        Commands::Validate { file } => cli::config::handle_validate(&config_path, file)?,
    }

    Ok(())
}
