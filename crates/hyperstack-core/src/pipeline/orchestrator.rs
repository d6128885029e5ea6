use std::sync::Arc;

use tracing::info;

use crate::dataset::AnyHyperstack;
use crate::error::Result;
use crate::io;

use super::config::PipelineConfig;
use super::helpers::apply_step;
use super::types::{NoOpReporter, PipelineStage, ProgressReporter};

/// Run the full pipeline with a thread-safe progress reporter.
///
/// The working stack is replaced after every step; a failing step leaves
/// the output file untouched.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<AnyHyperstack> {
    reporter.begin_stage(PipelineStage::Reading, None);
    let mut stack = io::load(&config.input)?;
    reporter.finish_stage();
    info!(
        input = %config.input.display(),
        dims = ?stack.dims(),
        steps = config.steps.len(),
        "Pipeline started"
    );

    for (i, step) in config.steps.iter().enumerate() {
        reporter.begin_stage(PipelineStage::of(step), Some(config.steps.len()));
        stack = apply_step(stack, step)?;
        reporter.advance(i + 1);
        reporter.finish_stage();
    }

    reporter.begin_stage(PipelineStage::Writing, None);
    io::save(&stack, &config.output)?;
    reporter.finish_stage();
    info!(output = %config.output.display(), "Output saved");

    Ok(stack)
}

/// Run the full pipeline.
pub fn run_pipeline(config: &PipelineConfig) -> Result<AnyHyperstack> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}
