pub mod add_data;
pub mod calc;
pub mod config;
pub mod export;
pub mod import;
pub mod info;
pub mod noise;
pub mod pipeline;
pub mod probe;

use std::path::Path;

use anyhow::{Context, Result};
use hyperstack_core::dataset::AnyHyperstack;
use hyperstack_core::io;

/// Parse a comma-separated coordinate list such as `"3,4,0"`.
pub(crate) fn parse_coords(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid coordinate list '{s}' (expected e.g. '3,4,0')"))
}

pub(crate) fn load_stack(path: &Path) -> Result<AnyHyperstack> {
    io::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

pub(crate) fn save_stack(stack: &AnyHyperstack, path: &Path) -> Result<()> {
    io::save(stack, path).with_context(|| format!("Failed to save {}", path.display()))
}
