pub mod config;
mod helpers;
mod orchestrator;
mod types;

pub use helpers::apply_step;
pub use orchestrator::{run_pipeline, run_pipeline_reported};
pub use types::{PipelineStage, ProgressReporter};
