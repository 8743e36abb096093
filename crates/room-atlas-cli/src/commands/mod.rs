pub mod check;
pub mod init;
pub mod normalize;
pub mod validate;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use room_atlas_config::AtlasConfig;
use room_atlas_engine::RoomSchema;
use serde_json::Value;

/// Exit status for failed documents, invalid records or drift.
pub const FAILED: u8 = 1;
/// Exit status for schema, configuration and usage errors.
pub const USAGE: u8 = 2;

/// Project settings: config file values, or built-in defaults without one.
pub struct Settings {
    config: AtlasConfig,
}

/// Paths for one command after command-line overrides are applied.
pub struct Paths {
    pub schema: PathBuf,
    pub rooms_dir: PathBuf,
    pub out_dir: PathBuf,
    pub glob: String,
}

impl Settings {
    /// An explicit `--config` must exist; the implicit `./atlas.toml` may not.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => match AtlasConfig::load_from_path(path)? {
                Some(config) => config,
                None => bail!("Config file not found: {}", path.display()),
            },
            None => AtlasConfig::load()?.unwrap_or_default(),
        };
        log::debug!("settings: {config:?}");
        Ok(Self { config })
    }

    pub fn with(
        &self,
        schema: Option<PathBuf>,
        rooms_dir: Option<PathBuf>,
        out_dir: Option<PathBuf>,
        glob: Option<String>,
    ) -> Paths {
        Paths {
            schema: schema.unwrap_or_else(|| self.config.schema_path.clone()),
            rooms_dir: rooms_dir.unwrap_or_else(|| self.config.rooms_dir.clone()),
            out_dir: out_dir.unwrap_or_else(|| self.config.out_dir.clone()),
            glob: glob.unwrap_or_else(|| self.config.glob.clone()),
        }
    }
}

/// Reads the schema once, returning the derived grammar and the raw document.
pub fn load_schema(path: &Path) -> Result<(RoomSchema, Value)> {
    let document = room_atlas_engine::read_schema_document(path).context("SCHEMA ERROR")?;
    let schema = RoomSchema::from_json_schema(&document).context("SCHEMA ERROR")?;
    Ok((schema, document))
}

pub fn usage_error(err: anyhow::Error) -> ExitCode {
    eprintln!("[room-atlas] {err:#}");
    ExitCode::from(USAGE)
}

pub fn print_json(payload: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}
