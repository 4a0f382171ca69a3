//! Captain's Log CLI
//!
//! Write and read short timestamped log entries, grouped by category.
//!
//! # Commands
//!
//! - `write` - Append an entry to the selected category
//! - `read` - Show the entries of the selected category
//! - `read-all` - Show entries of every category, interleaved by time
//! - `categories` - List known categories

mod commands;
mod render;

use captainlog_core::{CoreResult, LogStore, StoreConfig};
use clap::{Parser, Subcommand};
use commands::read::OutputFormat;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Captain's Log: a personal, categorized log.
#[derive(Parser)]
#[command(name = "captainlog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Category to write to or read from
    #[arg(global = true, short, long, default_value = "default")]
    category: String,

    /// Path to the log file (defaults to ~/.captainlog.redb)
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an entry to your captain's log
    Write {
        /// Entry text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Read entries from your captain's log
    Read {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Read all entries in all categories
    ReadAll {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List categories and their entry counts
    Categories,

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so table output stays clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("captainlog: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        category,
        path,
        command,
        ..
    } = cli;
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Write { text } => {
            let store = open_store(path)?;
            commands::write::run(&store, &category, &text.join(" "))?;
        }
        Commands::Read { format } => {
            let store = open_store(path)?;
            commands::read::run(&store, &category, format, &mut out)?;
        }
        Commands::ReadAll { format } => {
            let store = open_store(path)?;
            commands::read::run_all(&store, format, &mut out)?;
        }
        Commands::Categories => {
            let store = open_store(path)?;
            commands::categories::run(&store, &mut out)?;
        }
        Commands::Version => {
            writeln!(out, "Captain's Log CLI v{}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "Captain's Log Core v{}", captainlog_core::VERSION)?;
        }
    }

    Ok(())
}

fn open_store(path: Option<PathBuf>) -> CoreResult<LogStore> {
    let config = match path {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::default_location()?,
    };
    LogStore::open(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn category_defaults_to_default() {
        let cli = Cli::parse_from(["captainlog", "read"]);
        assert_eq!(cli.category, "default");
        assert!(matches!(cli.command, Commands::Read { format: OutputFormat::Text }));
    }

    #[test]
    fn write_joins_words() {
        let cli = Cli::parse_from(["captainlog", "-c", "work", "write", "started", "sprint"]);
        assert_eq!(cli.category, "work");
        match cli.command {
            Commands::Write { text } => assert_eq!(text.join(" "), "started sprint"),
            _ => panic!("expected write"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["captainlog", "read-all", "--format", "json", "-p", "/tmp/x"]);
        assert_eq!(cli.path, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Commands::ReadAll { format: OutputFormat::Json }));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["captainlog", "read", "--format", "jsn"]).is_err());
    }

    #[test]
    fn write_requires_text() {
        assert!(Cli::try_parse_from(["captainlog", "write"]).is_err());
    }
}
