//! sprig CLI - parse S-expression source and print the resulting trees

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::parse::{self, ParseOptions};
use config::OutputFormat;

#[derive(Parser)]
#[command(name = "sprig")]
#[command(about = "Parse S-expressions into bounded syntax trees", long_about = None)]
#[command(version)]
struct Cli {
    /// Source file to parse; reads standard input when absent or `-`
    file: Option<PathBuf>,

    /// Output format (defaults to the config file's, then text)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(long, env = "SPRIG_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum list nesting depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Arena capacity in nodes
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Print node counts to stderr after parsing
    #[arg(long)]
    stats: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Command-line flags win over the config file.
    fn parse_options(&self, config: &config::Config) -> ParseOptions {
        let mut limits = config.limits;
        if let Some(max_depth) = self.max_depth {
            limits.max_depth = max_depth;
        }
        if let Some(max_nodes) = self.max_nodes {
            limits.max_nodes = max_nodes;
        }
        ParseOptions {
            limits,
            format: self.format.unwrap_or(config.output.format),
            stats: self.stats || config.output.stats,
            stack_size: config.output.stack_mib.saturating_mul(1024 * 1024),
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.debug);

    // Load configuration
    let config = config::load_config(cli.config.clone())?;
    let options = cli.parse_options(&config);

    let source = parse::read_source(cli.file.as_deref())?;
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    parse::run(source, &options, &mut stdout.lock(), &mut stderr.lock())
}
