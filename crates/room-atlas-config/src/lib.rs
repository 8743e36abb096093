use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "atlas.toml";

pub const DEFAULT_SCHEMA_PATH: &str = "schema/room_schema_v1.0.json";
pub const DEFAULT_ROOMS_DIR: &str = "rooms";
pub const DEFAULT_OUT_DIR: &str = "normalized";
pub const DEFAULT_GLOB: &str = "**/*.md";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid glob {glob:?} in config file at {config_path}: {source}")]
    InvalidGlob {
        config_path: PathBuf,
        glob: String,
        source: glob::PatternError,
    },
}

/// Paths and selection for an atlas project, usually read from `atlas.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub schema_path: PathBuf,
    pub rooms_dir: PathBuf,
    pub out_dir: PathBuf,
    pub glob: String,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            rooms_dir: PathBuf::from(DEFAULT_ROOMS_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            glob: DEFAULT_GLOB.to_string(),
        }
    }
}

impl AtlasConfig {
    /// Loads a config file; `Ok(None)` when it does not exist.
    ///
    /// `~` and `$VAR` are expanded in every path, and relative paths are
    /// resolved against the directory holding the config file.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: AtlasConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        glob::Pattern::new(&config.glob).map_err(|source| ConfigError::InvalidGlob {
            config_path: config_path.to_path_buf(),
            glob: config.glob.clone(),
            source,
        })?;

        let base = config_path.parent().unwrap_or(Path::new(""));
        config.schema_path = Self::resolve(base, config.schema_path);
        config.rooms_dir = Self::resolve(base, config.rooms_dir);
        config.out_dir = Self::resolve(base, config.out_dir);

        Ok(Some(config))
    }

    /// Loads `atlas.toml` from the working directory, if present.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(DEFAULT_CONFIG_FILE)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn resolve(base: &Path, path: PathBuf) -> PathBuf {
        let path = Self::expand_path(&path).unwrap_or(path);
        if path.is_absolute() {
            path
        } else {
            base.join(path)
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let config_file = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&config_file, content).unwrap();
        config_file
    }

    #[test]
    fn test_defaults_match_project_layout() {
        let config = AtlasConfig::default();

        assert_eq!(config.schema_path, PathBuf::from("schema/room_schema_v1.0.json"));
        assert_eq!(config.rooms_dir, PathBuf::from("rooms"));
        assert_eq!(config.out_dir, PathBuf::from("normalized"));
        assert_eq!(config.glob, "**/*.md");
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "glob = \"*.md\"\n");

        let config = AtlasConfig::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.glob, "*.md");
        assert_eq!(config.rooms_dir, temp_dir.path().join("rooms"));
        assert_eq!(config.out_dir, temp_dir.path().join("normalized"));
        assert_eq!(config.schema_path, temp_dir.path().join("schema/room_schema_v1.0.json"));
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "rooms_dir = \"/srv/atlas/rooms\"\n");

        let config = AtlasConfig::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.rooms_dir, PathBuf::from("/srv/atlas/rooms"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = AtlasConfig::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_env_var_in_toml() {
        unsafe {
            env::set_var("ATLAS_TEST_ROOT", "/custom/atlas");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "out_dir = \"$ATLAS_TEST_ROOT/json\"\n");
        let config = AtlasConfig::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.out_dir, PathBuf::from("/custom/atlas/json"));

        unsafe {
            env::remove_var("ATLAS_TEST_ROOT");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = AtlasConfig::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "rooms_dir = [");

        let result = AtlasConfig::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_invalid_glob_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "glob = \"rooms/[\"\n");

        let result = AtlasConfig::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::InvalidGlob { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join(DEFAULT_CONFIG_FILE);
        let test_config = AtlasConfig {
            schema_path: PathBuf::from("/tmp/schema.json"),
            rooms_dir: PathBuf::from("/tmp/rooms"),
            out_dir: PathBuf::from("/tmp/out"),
            glob: "*.md".to_string(),
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = AtlasConfig::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
