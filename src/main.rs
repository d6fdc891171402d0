use anyhow::Result;
use clap::Parser;

mod cli;
mod discovery;
mod paths;
mod supervisor;
mod synthesis;

use cli::Cli;
use paths::SwapPaths;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let paths = SwapPaths::from(&cli);

    eprintln!("Kobold Swap");

    // First run: create the configs directory and hand control back to the
    // user so they can populate it. Success exit, nothing else happens.
    if !paths.configs_dir.exists() {
        std::fs::create_dir_all(&paths.configs_dir)?;
        eprintln!(
            "Configs folder created, place your .kcpps files in {}.",
            paths.configs_dir.display()
        );
        eprintln!("Make sure they are set to not show the launcher and don't launch a browser.");
        return Ok(());
    }

    let models = discovery::discover_models(&paths.configs_dir)?;
    if models.is_empty() {
        eprintln!(
            "No .kcpps files found in {}. Exiting.",
            paths.configs_dir.display()
        );
        return Ok(());
    }
    log::info!("Discovered {} model config(s)", models.len());

    // A failed write is the one condition that flips the exit code.
    let config = synthesis::SwapConfig::build(&models, &paths)?;
    synthesis::write_config(&config, &paths.output_file).await?;
    eprintln!("Successfully generated {}", paths.output_file.display());

    supervisor::run(&paths).await
}
