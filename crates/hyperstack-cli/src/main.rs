mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hyperstack", about = "Multidimensional image restructuring tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stack/image axes, extents and metadata
    Info(commands::info::InfoArgs),
    /// Insert empty hyperplanes along an axis
    AddData(commands::add_data::AddDataArgs),
    /// Print the sample values at a coordinate
    Probe(commands::probe::ProbeArgs),
    /// Apply neighborhood noise reduction to every XY plane
    Noise(commands::noise::NoiseArgs),
    /// Combine two stacks (or a stack and a constant)
    Calc(commands::calc::CalcArgs),
    /// Convert a PNG/TIFF image into a stack file
    Import(commands::import::ImportArgs),
    /// Save one XY plane of a stack as an image
    Export(commands::export::ExportArgs),
    /// Run a pipeline config file
    Run(commands::pipeline::RunArgs),
    /// Print a default pipeline config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::AddData(args) => commands::add_data::run(args),
        Commands::Probe(args) => commands::probe::run(args),
        Commands::Noise(args) => commands::noise::run(args),
        Commands::Calc(args) => commands::calc::run(args),
        Commands::Import(args) => commands::import::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Run(args) => commands::pipeline::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
