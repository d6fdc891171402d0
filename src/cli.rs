use clap::Parser;
use std::path::PathBuf;

/// Kobold Swap - llama-swap made easy for the KoboldCpp ecosystem
///
/// Scans a folder of .kcpps files, generates a llama-swap config.yaml with
/// one routing entry per file, then launches a llama-swap executable placed
/// next to this binary and supervises it until it exits.
#[derive(Parser, Debug)]
#[command(name = "kobold-swap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory scanned (non-recursively) for .kcpps files
    ///
    /// Each file becomes one model entry keyed by its base name.
    #[arg(long, value_name = "DIR", default_value = "configs")]
    pub configs_dir: PathBuf,

    /// Path of the generated llama-swap config file
    ///
    /// Fully rewritten on every run; never merged with previous content.
    #[arg(long, value_name = "PATH", default_value = "config.yaml")]
    pub output: PathBuf,

    /// Directory the one-time `koboldcpp --unpack` extraction targets
    ///
    /// Created on first run if absent; every generated launch command invokes
    /// the koboldcpp-launcher inside it.
    #[arg(long, value_name = "DIR", default_value = "kcpp-extracted")]
    pub extract_dir: PathBuf,
}
