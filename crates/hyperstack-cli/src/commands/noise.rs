use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use hyperstack_core::ops::noise::{reduce_noise_any, Neighborhood, NoiseReducer};

use super::{load_stack, save_stack};

#[derive(Clone, ValueEnum)]
pub enum NoiseMethodArg {
    Mean,
    Median,
    Minimum,
    Maximum,
    Midpoint,
    HarmonicMean,
    GeometricMean,
}

impl From<&NoiseMethodArg> for NoiseReducer {
    fn from(arg: &NoiseMethodArg) -> Self {
        match arg {
            NoiseMethodArg::Mean => NoiseReducer::Mean,
            NoiseMethodArg::Median => NoiseReducer::Median,
            NoiseMethodArg::Minimum => NoiseReducer::Minimum,
            NoiseMethodArg::Maximum => NoiseReducer::Maximum,
            NoiseMethodArg::Midpoint => NoiseReducer::Midpoint,
            NoiseMethodArg::HarmonicMean => NoiseReducer::HarmonicMean,
            NoiseMethodArg::GeometricMean => NoiseReducer::GeometricMean,
        }
    }
}

#[derive(Args)]
pub struct NoiseArgs {
    /// Input stack (.hst) or image file
    pub file: PathBuf,

    /// Neighborhood statistic
    #[arg(long, value_enum, default_value = "median")]
    pub method: NoiseMethodArg,

    /// Window radius in pixels (window is 2r+1 wide)
    #[arg(long, default_value = "1")]
    pub radius: usize,

    /// Separate vertical radius; defaults to --radius
    #[arg(long)]
    pub radius_y: Option<usize>,

    /// Output file path
    #[arg(short, long, default_value = "result.hst")]
    pub output: PathBuf,
}

pub fn run(args: &NoiseArgs) -> Result<()> {
    let stack = load_stack(&args.file)?;
    let reducer = NoiseReducer::from(&args.method);
    let neighborhood = Neighborhood {
        radius_x: args.radius,
        radius_y: args.radius_y.unwrap_or(args.radius),
    };

    println!(
        "{} filter, {}x{} window",
        reducer,
        2 * neighborhood.radius_x + 1,
        2 * neighborhood.radius_y + 1
    );
    let filtered = reduce_noise_any(&stack, reducer, neighborhood)?;

    save_stack(&filtered, &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
