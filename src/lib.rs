pub mod commands;
pub mod config;
pub mod dependencies;
pub mod logging;
pub mod panel;
pub mod paths;
pub mod theme;
pub mod tui;
pub mod uci;
pub mod ui;

pub use commands::{CommandError, CommandExecutor, SystemExecutor};
pub use config::Config;
pub use panel::{LogExcerpt, LogPanel, PanelContent, RefreshError, DEFAULT_LOG_PATH, EXCERPT_LINES};
pub use uci::{UciError, UciSession, UciStore};
