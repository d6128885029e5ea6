use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use hyperstack_core::pipeline::config::PipelineConfig;
use hyperstack_core::pipeline::{run_pipeline_reported, PipelineStage, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::summary::print_pipeline_summary;

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline config file (TOML)
    pub config: PathBuf,

    /// Override the config's input path
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Override the config's output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Drives an indicatif bar from pipeline stage events.
struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.pb.set_message(stage.to_string());
        if let Some(total) = total_items {
            self.pb.set_length(total as u64);
        }
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read config {}", args.config.display()))?;
    let mut config: PipelineConfig =
        toml::from_str(&contents).context("Invalid pipeline config")?;
    if let Some(ref input) = args.input {
        config.input = input.clone();
    }
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    debug!(config = %args.config.display(), steps = config.steps.len(), "Pipeline config loaded");

    print_pipeline_summary(&config);

    let pb = ProgressBar::new(config.steps.len().max(1) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let reporter = Arc::new(BarReporter { pb: pb.clone() });
    let stack = run_pipeline_reported(&config, reporter)?;

    pb.finish_with_message("Done");
    println!(
        "\nOutput saved to {} ({})",
        config.output.display(),
        stack
            .dims()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" x ")
    );

    Ok(())
}
