//! Configuration paths
//!
//! Settings live under:
//! - Unix/macOS: `$XDG_CONFIG_HOME/wrap-toggle/` or `~/.config/wrap-toggle/`
//! - Windows: `%APPDATA%\wrap-toggle\`

use std::{env, path::PathBuf};

const APP_DIR: &str = "wrap-toggle";

/// File name of the persisted configuration object.
pub const SETTINGS_FILE: &str = "data.json";

/// Base config directory.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/wrap-toggle/data.json`
pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_FILE))
}
