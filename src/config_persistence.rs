//! Config file location, first-run creation, and tolerant loading.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::{sanitize_config, Config};

const CONFIG_DIR_NAME: &str = "blockbench";
const CONFIG_FILE_NAME: &str = "blockbench.toml";

pub fn config_file_path() -> Result<PathBuf, String> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| "could not determine the user config directory".to_string())?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn write_config(path: &Path, config: &Config) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create {}: {err}", parent.display()))?;
    }
    let serialized =
        toml::to_string(config).map_err(|err| format!("failed to serialize config: {err}"))?;
    std::fs::write(path, serialized)
        .map_err(|err| format!("failed to write {}: {err}", path.display()))
}

/// Reads the config at `path`, writing the defaults first if it does not exist.
/// A file that fails to parse is left untouched and defaults are used instead.
pub fn load_or_create_config(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        info!(
            "Config file not found. Creating default config. path={}",
            path.display()
        );
        write_config(path, &Config::default())?;
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let config = toml::from_str::<Config>(&content).unwrap_or_else(|err| {
        warn!(
            "Config file is invalid, using defaults. path={} error={}",
            path.display(),
            err
        );
        Config::default()
    });
    Ok(sanitize_config(config))
}
