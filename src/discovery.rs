//! Discovery of KoboldCpp launch configs.
//!
//! A model is anything with a `.kcpps` extension directly inside the configs
//! directory; the base name becomes the model identifier used everywhere
//! downstream. File content is never read here.

use anyhow::{Context, Result};
use std::path::Path;

/// Extension (without the dot) that marks a file as a KoboldCpp config.
pub const CONFIG_EXTENSION: &str = "kcpps";

/// Scan `configs_dir` for `.kcpps` files and return their base names,
/// sorted lexicographically for reproducible output.
///
/// Non-recursive; subdirectories and non-matching files are ignored. The
/// caller is responsible for creating the directory if it does not exist.
pub fn discover_models(configs_dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(configs_dir).with_context(|| {
        format!("Failed to read configs directory: {}", configs_dir.display())
    })?;

    let mut models = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| {
            format!("Failed to enumerate {}", configs_dir.display())
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(CONFIG_EXTENSION) {
            continue;
        }
        match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => models.push(stem.to_string()),
            None => log::warn!("Skipping non-UTF-8 file name: {}", path.display()),
        }
    }

    models.sort();
    Ok(models)
}
