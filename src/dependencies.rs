use crate::config::Config;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Resolve a configured tool: an existing absolute/relative path is
/// taken as-is, otherwise fall back to a PATH lookup on the file name.
pub fn resolve_tool(configured: &str) -> Option<PathBuf> {
    let path = Path::new(configured);
    if path.exists() {
        return Some(path.to_path_buf());
    }
    let name = path.file_name()?.to_str()?;
    which::which(name).ok()
}

/// Verify the log-fetching tools from the config are present.
///
/// A missing tool would otherwise just make every refresh fail silently,
/// so startup aborts with an actionable message instead.
pub fn verify_dependencies(config: &Config) -> Result<()> {
    let mut missing = Vec::new();

    for (label, configured) in [("tail", &config.tail_bin), ("logread", &config.logread_bin)] {
        match resolve_tool(configured) {
            Some(path) => {
                debug!("Found {}: {}", label, path.display());
            }
            None => {
                warn!("Missing required command: {} ({})", label, configured);
                missing.push((label, configured.clone()));
            }
        }
    }

    if !missing.is_empty() {
        let mut error_msg = String::from("Missing required commands:\n");
        for (label, configured) in &missing {
            match installation_hint(label) {
                Some(hint) => error_msg.push_str(&format!("  {} ({}): {}\n", label, configured, hint)),
                None => error_msg.push_str(&format!("  {} ({})\n", label, configured)),
            }
        }
        anyhow::bail!("{}", error_msg);
    }

    info!("All required commands are available");
    Ok(())
}

/// Get installation hints for the tools the panel shells out to.
fn installation_hint(command: &str) -> Option<&'static str> {
    match command {
        "tail" => Some("part of busybox/coreutils; on OpenWrt: opkg install coreutils-tail"),
        "logread" => Some("part of the OpenWrt base system (ubox); adjust logread_bin in config.toml on other hosts"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tool_from_path_lookup() {
        // These should exist on most systems
        assert!(resolve_tool("sh").is_some());
        assert!(resolve_tool("/nonexistent/dir/sh").is_some());
        assert!(resolve_tool("nonexistent_command_xyz123").is_none());
    }

    #[test]
    fn test_verify_dependencies_reports_missing() {
        let config = Config {
            tail_bin: "nonexistent_tail_xyz123".to_string(),
            logread_bin: "nonexistent_logread_xyz123".to_string(),
            ..Config::default()
        };
        let err = verify_dependencies(&config).unwrap_err();
        assert!(err.to_string().contains("tail"));
        assert!(err.to_string().contains("logread"));
    }
}
