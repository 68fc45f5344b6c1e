use crate::commands::{CommandError, CommandExecutor};
use crate::uci::{UciError, UciStore};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Maximum number of lines shown per excerpt.
pub const EXCERPT_LINES: usize = 50;

/// Log file used when the aria2 config has no (or an empty) `log` option.
pub const DEFAULT_LOG_PATH: &str = "/var/log/aria2.log";

const UCI_PACKAGE: &str = "aria2";
const UCI_SECTION_TYPE: &str = "aria2";
const UCI_LOG_OPTION: &str = "log";

/// Errors that abort a whole refresh. No partial result is produced and
/// no retry is attempted; the next poll tick is the only recovery.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("failed to load aria2 configuration: {0}")]
    ConfigLoad(#[from] UciError),

    #[error("log fetch failed: {0}")]
    Command(#[from] CommandError),
}

/// An ordered log excerpt, most-recent-first, capped at [`EXCERPT_LINES`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogExcerpt {
    lines: Vec<String>,
}

impl LogExcerpt {
    /// Excerpt from `tail -n 50` output: the file's last lines in file
    /// order, so reversing puts the most recent line first. The cap is
    /// enforced here as well rather than trusting tail's own limit.
    pub fn from_tail_output(output: &str) -> Self {
        Self::reversed(output)
    }

    /// Excerpt from `logread` output: full chronological history for the
    /// tag, so after reversing only the first [`EXCERPT_LINES`] entries
    /// are kept.
    pub fn from_syslog_output(output: &str) -> Self {
        Self::reversed(output)
    }

    fn reversed(output: &str) -> Self {
        let trimmed = output.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        let mut lines: Vec<String> = trimmed.lines().rev().map(str::to_string).collect();
        lines.truncate(EXCERPT_LINES);
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The render payload of one successful refresh. Replaces the previous
/// payload wholesale; a failed refresh leaves the old one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelContent {
    /// Log file path resolved from UCI for this refresh.
    pub log_path: String,
    /// Tail of the configured log file, most recent line first.
    pub file_excerpt: LogExcerpt,
    /// Matching syslog entries, most recent line first.
    pub syslog_excerpt: LogExcerpt,
}

/// Pulls the two log excerpts that make up the panel.
///
/// Holds no state between refreshes; the UCI package is loaded fresh on
/// every call and released when the call finishes, success or not.
#[derive(Debug, Clone)]
pub struct LogPanel {
    uci_config_dir: PathBuf,
    tail_bin: String,
    logread_bin: String,
    syslog_tag: String,
}

impl LogPanel {
    pub fn new(
        uci_config_dir: impl Into<PathBuf>,
        tail_bin: impl Into<String>,
        logread_bin: impl Into<String>,
        syslog_tag: impl Into<String>,
    ) -> Self {
        Self {
            uci_config_dir: uci_config_dir.into(),
            tail_bin: tail_bin.into(),
            logread_bin: logread_bin.into(),
            syslog_tag: syslog_tag.into(),
        }
    }

    /// One refresh cycle: resolve the log path from UCI, fetch both
    /// excerpts concurrently, and build the panel content. Either fetch
    /// failing fails the whole refresh.
    ///
    /// Overlapping refreshes are neither coalesced nor cancelled; the
    /// caller applies results in arrival order and the last one wins.
    pub async fn refresh(
        &self,
        executor: &impl CommandExecutor,
    ) -> Result<PanelContent, RefreshError> {
        let mut store = UciStore::new(&self.uci_config_dir);
        // Unloaded when the session drops, on the error paths below too.
        let session = store.session(UCI_PACKAGE)?;

        let log_path = match session.get_first(UCI_SECTION_TYPE, UCI_LOG_OPTION) {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => DEFAULT_LOG_PATH.to_string(),
        };
        debug!("Refreshing log panel from {}", log_path);

        let lines_arg = EXCERPT_LINES.to_string();
        let tail_args = ["-n", &lines_arg, &log_path];
        let logread_args = ["-e", self.syslog_tag.as_str()];
        let (tail_out, syslog_out) = tokio::try_join!(
            executor.exec(&self.tail_bin, &tail_args),
            executor.exec(&self.logread_bin, &logread_args),
        )?;

        Ok(PanelContent {
            log_path,
            file_excerpt: LogExcerpt::from_tail_output(&tail_out),
            syslog_excerpt: LogExcerpt::from_syslog_output(&syslog_out),
        })
    }
}
