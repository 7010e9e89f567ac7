use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use easydict_config::Config;

const APP_DIR: &str = "EasyDictWin";
const CONFIG_FILE: &str = "config.json";

/// `<config dir>/EasyDictWin/config.json`
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir().context("No config directory for this user")?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Load settings, falling back to defaults.
///
/// A missing file is created from the defaults. An unreadable or corrupt one
/// is left alone and the defaults are used for this run.
pub fn load_config(path: &Path) -> Config {
    let config = match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<Config>(&data) {
            Ok(config) => {
                tracing::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Corrupt settings at {}, using defaults: {}", path.display(), e);
                Config::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let config = Config::default();
            match save_config(path, &config) {
                Ok(()) => tracing::info!("Created default settings at {}", path.display()),
                Err(e) => tracing::warn!("Failed to write default settings: {:#}", e),
            }
            config
        }
        Err(e) => {
            tracing::warn!("Cannot read settings at {}, using defaults: {}", path.display(), e);
            Config::default()
        }
    };

    config.with_env_overrides()
}

pub fn save_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let data = serde_json::to_string_pretty(config)?;
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
