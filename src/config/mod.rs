pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::Config;

const CONFIG_FILE_NAME: &str = ".hrval.toml";

/// Get the global config file path (~/.hrval.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (next to the manifest)
pub fn local_config_path(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults
/// Checks local config first, then global config
pub fn load_config(manifest_path: Option<&Path>) -> Config {
    if let Some(path) = manifest_path {
        let local = local_config_path(path);
        if local.exists() {
            if let Ok(content) = fs::read_to_string(&local) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
                log::warn!("ignoring unparsable config file {}", local.display());
            }
        }
    }

    if let Some(global) = global_config_path() {
        if global.exists() {
            if let Ok(content) = fs::read_to_string(&global) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
                log::warn!("ignoring unparsable config file {}", global.display());
            }
        }
    }

    Config::default()
}
