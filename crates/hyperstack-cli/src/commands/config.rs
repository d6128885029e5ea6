use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hyperstack_core::axis::AxisLabel;
use hyperstack_core::ops::calculator::CalculatorOp;
use hyperstack_core::ops::noise::{Neighborhood, NoiseReducer};
use hyperstack_core::pipeline::config::{Operand, PipelineConfig, PipelineStep};
use hyperstack_core::restructure::InsertionRequest;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save an example PipelineConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = PipelineConfig {
        steps: vec![
            PipelineStep::AddData(InsertionRequest::new(AxisLabel::Z, 1, 2)),
            PipelineStep::NoiseReduction {
                method: NoiseReducer::Median,
                neighborhood: Neighborhood::default(),
            },
            PipelineStep::Calculator {
                op: CalculatorOp::Multiply,
                operand: Operand::Constant(1.0),
            },
        ],
        ..PipelineConfig::default()
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Example config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
