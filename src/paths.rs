//! Explicit path context threaded through the pipeline.
//!
//! Every component takes a [`SwapPaths`] instead of resolving paths against
//! the ambient working directory, so the whole pipeline runs against
//! injected temporary directories in tests.

use std::path::PathBuf;

use crate::cli::Cli;

/// Resolved locations for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct SwapPaths {
    /// Directory holding the user's .kcpps files.
    pub configs_dir: PathBuf,
    /// Destination of the generated llama-swap config.
    pub output_file: PathBuf,
    /// Target of the one-time `koboldcpp --unpack` extraction.
    pub extract_dir: PathBuf,
}

impl From<&Cli> for SwapPaths {
    fn from(cli: &Cli) -> Self {
        Self {
            configs_dir: cli.configs_dir.clone(),
            output_file: cli.output.clone(),
            extract_dir: cli.extract_dir.clone(),
        }
    }
}
