use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the XDG data directory for the application.
/// Defaults to ~/.local/share/arialog if XDG_DATA_HOME is not set.
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join("arialog"))
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/share/arialog")))
        .context("Could not determine data directory")
}

/// Resolve the XDG config directory for the application.
/// Defaults to ~/.config/arialog if XDG_CONFIG_HOME is not set.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("arialog"))
        .or_else(|| dirs::home_dir().map(|h| h.join(".config/arialog")))
        .context("Could not determine config directory")
}

/// Get the default logs directory.
pub fn logs_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("logs"))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Ensure the data directory exists.
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir()?;
    ensure_dir(&dir)?;
    ensure_dir(&logs_dir()?)?;
    Ok(dir)
}

/// Ensure the config directory exists.
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir()?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Expand user home directory in path (e.g., ~/path -> /home/user/path).
pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}
