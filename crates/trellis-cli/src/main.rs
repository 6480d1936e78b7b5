//! Trellis CLI - Command line interface for graph analysis

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, connectivity, inspect, order, path, traverse};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(author, version, about = "Graph analysis toolkit")]
pub struct Cli {
    /// Output format: table, json (defaults to the configured format)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file
    #[arg(long, env = "TRELLIS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::config_file_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a graph's header and adjacency list
    Inspect(inspect::InspectArgs),
    /// Breadth-first search tree
    Bfs(traverse::BfsArgs),
    /// Depth-first search tree or forest
    Dfs(traverse::DfsArgs),
    /// Single-source shortest paths
    Dijkstra(path::DijkstraArgs),
    /// All-pairs shortest paths
    Floyd(path::FloydArgs),
    /// Build (topological) order of a dependency graph
    Order(order::OrderArgs),
    /// Connected components, ignoring edge direction
    Components(connectivity::ComponentsArgs),
    /// Check whether a directed graph is strongly connected
    Strong(connectivity::StrongArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with resolved settings
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = cli.config_path();
        tracing::debug!("Using config at: {:?}", config_path);

        let config = Config::load(&config_path)?;
        let format = cli.format.unwrap_or(config.format);

        Ok(Self { config, format })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting trellis CLI");

    // These work without loading a (possibly broken) config file
    match &cli.command {
        Commands::Config(args) => return commands::config::run(args, &cli.config_path()),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let ctx = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Inspect(args) => inspect::run(args, &ctx)?,
        Commands::Bfs(args) => traverse::run_bfs(args, &ctx)?,
        Commands::Dfs(args) => traverse::run_dfs(args, &ctx)?,
        Commands::Dijkstra(args) => path::run_dijkstra(args, &ctx)?,
        Commands::Floyd(args) => path::run_floyd(args, &ctx)?,
        Commands::Order(args) => order::run(args, &ctx)?,
        Commands::Components(args) => connectivity::run_components(args, &ctx)?,
        Commands::Strong(args) => connectivity::run_strong(args, &ctx)?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
