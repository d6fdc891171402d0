//! Supervision of the llama-swap child process, plus the one-time KoboldCpp
//! extraction that the generated launch commands depend on.
//!
//! The child handle has exactly one release path: [`supervise`] waits on the
//! child and, if interrupted first, requests graceful termination and then
//! waits again. Both branches end with the child reaped before control
//! returns.

use anyhow::{Context, Result};
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitStatus;
use tokio::process::{Child, Command};

use crate::paths::SwapPaths;

/// Proxy executable expected next to our own binary. Platforms with
/// mandatory executable extensions get it appended via `EXE_SUFFIX`.
const PROXY_NAME: &str = "llama-swap";

/// Model-server binary resolved from PATH for the extraction step.
const MODEL_SERVER: &str = "koboldcpp";

/// Run the extraction once if the target directory is missing.
///
/// Advisory step: a koboldcpp binary that is absent from PATH or exits
/// non-zero is logged and otherwise ignored. llama-swap reports a broken
/// launch command with far more context than we could here.
pub async fn ensure_extracted(paths: &SwapPaths) -> Result<()> {
    if paths.extract_dir.exists() {
        log::debug!(
            "Extraction directory {} already present",
            paths.extract_dir.display()
        );
        return Ok(());
    }

    let koboldcpp = match which::which(MODEL_SERVER) {
        Ok(path) => path,
        Err(err) => {
            log::warn!(
                "{MODEL_SERVER} not found in PATH ({err}); skipping extraction into {}",
                paths.extract_dir.display()
            );
            return Ok(());
        }
    };

    eprintln!(
        "Unpacking {} into {}...",
        koboldcpp.display(),
        paths.extract_dir.display()
    );
    match Command::new(&koboldcpp)
        .arg("--unpack")
        .arg(&paths.extract_dir)
        .status()
        .await
    {
        Ok(status) if status.success() => log::info!("Extraction completed"),
        Ok(status) => log::warn!("{MODEL_SERVER} --unpack exited with {status}"),
        Err(err) => log::warn!("Failed to run {MODEL_SERVER} --unpack: {err}"),
    }

    Ok(())
}

/// Look for the llama-swap executable next to our own binary.
///
/// Returns `None` when it is absent; the caller treats that as non-fatal
/// because the config file has already been produced.
pub fn locate_proxy() -> Result<Option<PathBuf>> {
    let exe = std::env::current_exe().context("Failed to resolve own executable path")?;
    let dir = exe
        .parent()
        .context("Own executable path has no parent directory")?;
    let proxy = dir.join(format!("{PROXY_NAME}{}", std::env::consts::EXE_SUFFIX));
    Ok(proxy.exists().then_some(proxy))
}

/// Extraction, proxy lookup, launch, and supervision until exit.
pub async fn run(paths: &SwapPaths) -> Result<()> {
    ensure_extracted(paths).await?;

    let Some(proxy) = locate_proxy()? else {
        eprintln!(
            "Warning: {PROXY_NAME} not found next to this executable. \
             Skipping launch; {} was still generated.",
            paths.output_file.display()
        );
        return Ok(());
    };

    eprintln!("Launching {}...", proxy.display());
    let child = match Command::new(&proxy).spawn() {
        Ok(child) => child,
        Err(err) => {
            // Same effect as a missing executable: config exists, no proxy.
            eprintln!("Error launching {}: {err}", proxy.display());
            return Ok(());
        }
    };
    eprintln!("{PROXY_NAME} launched successfully!");

    let status = supervise(child, async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No interrupt channel available; only the child's own exit
            // can end the wait.
            std::future::pending::<()>().await;
        }
    })
    .await?;
    log::info!("{PROXY_NAME} exited with {status}");
    Ok(())
}

/// Block until the child exits or `interrupt` resolves.
///
/// On interrupt the child gets a graceful termination request and is then
/// waited on again, so the handle is always reaped exactly once before this
/// returns.
pub async fn supervise(
    mut child: Child,
    interrupt: impl Future<Output = ()>,
) -> Result<ExitStatus> {
    tokio::select! {
        status = child.wait() => {
            status.context("Failed to wait for llama-swap")
        }
        () = interrupt => {
            eprintln!("\nShutting down {PROXY_NAME}...");
            request_termination(&mut child);
            child
                .wait()
                .await
                .context("Failed to wait for llama-swap after termination request")
        }
    }
}

/// Ask the child to terminate. SIGTERM where available, so the proxy can
/// shut its own backends down cleanly.
#[cfg(unix)]
fn request_termination(child: &mut Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    // id() is None once the child has already been reaped.
    let Some(pid) = child.id() else { return };
    if let Err(err) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        log::warn!("SIGTERM to pid {pid} failed ({err}); falling back to kill");
        let _ = child.start_kill();
    }
}

#[cfg(not(unix))]
fn request_termination(child: &mut Child) {
    let _ = child.start_kill();
}
