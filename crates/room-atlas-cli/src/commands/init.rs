use std::path::Path;
use std::process::ExitCode;

use anyhow::{Result, bail};
use room_atlas_config::AtlasConfig;

/// Writes a config file holding the default project layout.
pub fn run(config_path: &Path, force: bool) -> Result<ExitCode> {
    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }

    AtlasConfig::default().save_to_path(config_path)?;
    println!("Wrote {}", config_path.display());
    Ok(ExitCode::SUCCESS)
}
