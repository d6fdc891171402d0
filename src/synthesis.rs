//! Generation of the llama-swap routing config.
//!
//! One [`ModelEntry`] per discovered identifier, all under a single `models:`
//! key. Entry order follows discovery order (the mapping is an [`IndexMap`],
//! and serde_yaml writes it as-is), and the file is rewritten from scratch on
//! every run.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::discovery::CONFIG_EXTENSION;
use crate::paths::SwapPaths;

/// Namespace prefixed to every model key.
const MODEL_NAMESPACE: &str = "koboldcpp";

/// Launcher binary inside the extraction directory.
const LAUNCHER_BIN: &str = "koboldcpp-launcher";

/// Port token left verbatim in every cmd; llama-swap substitutes it when it
/// actually starts the backend.
const PORT_PLACEHOLDER: &str = "${PORT}";

/// Health endpoint llama-swap polls to decide a backend is up. Identical for
/// every KoboldCpp instance.
const CHECK_ENDPOINT: &str = "/ping";

/// One routing entry: how llama-swap starts and health-checks one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub cmd: String,
    #[serde(rename = "checkEndpoint")]
    pub check_endpoint: String,
}

/// The full generated config: a single ordered `models` mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapConfig {
    pub models: IndexMap<String, ModelEntry>,
}

impl SwapConfig {
    /// Build the routing mapping for the given identifiers, in order.
    ///
    /// Duplicate identifiers are rejected: the mapping would silently drop
    /// one entry and there is no sensible precedence between two files that
    /// claim the same model name.
    pub fn build(identifiers: &[String], paths: &SwapPaths) -> Result<Self> {
        let launcher = paths.extract_dir.join(LAUNCHER_BIN);
        let mut models = IndexMap::with_capacity(identifiers.len());

        for id in identifiers {
            let key = format!("{MODEL_NAMESPACE}/{id}");
            let config_file = paths.configs_dir.join(format!("{id}.{CONFIG_EXTENSION}"));
            let entry = ModelEntry {
                cmd: format!(
                    "{} --config {} --port {PORT_PLACEHOLDER} --hordemodelname {id}",
                    launcher.display(),
                    config_file.display()
                ),
                check_endpoint: CHECK_ENDPOINT.to_string(),
            };
            if models.insert(key.clone(), entry).is_some() {
                bail!(
                    "Duplicate model identifier '{id}' would overwrite key '{key}'; \
                     rename one of the .kcpps files"
                );
            }
        }

        Ok(Self { models })
    }

    /// Serialize to YAML, preserving entry order.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize llama-swap config")
    }
}

/// Persist the config with truncate-and-replace semantics.
///
/// The write failing is the only condition in the whole tool that produces a
/// non-zero exit.
pub async fn write_config(config: &SwapConfig, output_file: &Path) -> Result<()> {
    let yaml = config.to_yaml()?;
    tokio::fs::write(output_file, yaml)
        .await
        .with_context(|| format!("Failed to write {}", output_file.display()))
}
