use crate::theme::Theme;
use ratatui::{
    prelude::*,
    style::Modifier,
    widgets::{Block, Borders, Paragraph},
};

/// Header widget showing app name and the current data source
pub struct Header {
    title: String,
}

impl Header {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn render(&self, theme: &Theme, area: Rect, frame: &mut Frame) {
        let header_text = format!("arialog v{} │ {}", env!("CARGO_PKG_VERSION"), self.title);

        let paragraph = Paragraph::new(header_text)
            .style(theme.primary_style().add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(theme.border_style()),
            );

        frame.render_widget(paragraph, area);
    }
}

/// Footer widget showing keybind hints and refresh status
pub struct Footer {
    left_hint: String,
    status: FooterStatus,
}

/// Refresh failures are deliberately not surfaced here: the panel keeps
/// its previous content and the failure goes to the log file only.
#[derive(Debug, Clone)]
pub enum FooterStatus {
    Ready,
    Refreshing,
}

impl Footer {
    pub fn new() -> Self {
        Self {
            left_hint: "↑↓/jk: scroll  r: refresh  Esc/q: quit".to_string(),
            status: FooterStatus::Ready,
        }
    }

    pub fn set_status(&mut self, status: FooterStatus) {
        self.status = status;
    }

    pub fn render(&self, theme: &Theme, area: Rect, frame: &mut Frame) {
        let (status_text, status_style) = match &self.status {
            FooterStatus::Ready => (String::new(), theme.dim_style()),
            FooterStatus::Refreshing => ("refreshing...".to_string(), theme.primary_style()),
        };

        let footer_text = format!("  {} │ {}  ", self.left_hint, status_text);

        let paragraph = Paragraph::new(footer_text).style(status_style).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(theme.border_style()),
        );

        frame.render_widget(paragraph, area);
    }
}

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}
