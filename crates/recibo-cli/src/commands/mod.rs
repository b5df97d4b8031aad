//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod scan;

use std::path::Path;

use recibo_core::ReciboConfig;

/// Load the effective configuration: an explicit path, the default config
/// file if it exists, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ReciboConfig> {
    if let Some(path) = config_path {
        return Ok(ReciboConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        return Ok(ReciboConfig::from_file(&default_path)?);
    }

    Ok(ReciboConfig::default())
}
