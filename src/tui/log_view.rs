use crate::panel::{LogExcerpt, PanelContent, EXCERPT_LINES};
use crate::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

const HEADING_LOG_FILE: &str = "Last 50 lines of log file:";
const HEADING_SYSLOG: &str = "Last 50 lines of syslog:";
const PLACEHOLDER_EMPTY: &str = "No log data.";
const PLACEHOLDER_LOADING: &str = "Collecting data...";

/// The log panel's render target: holds the most recently completed
/// refresh result and draws it. A failed refresh never reaches this
/// type, so the previous content stays on screen.
#[derive(Debug, Clone)]
pub struct LogView {
    content: Option<PanelContent>,
    poll_interval_secs: u64,
    scroll: u16,
    viewport_height: u16,
}

impl LogView {
    pub fn new(poll_interval_secs: u64) -> Self {
        Self {
            content: None,
            poll_interval_secs,
            scroll: 0,
            viewport_height: 0,
        }
    }

    /// Replace the rendered content with a fresh refresh result.
    pub fn set_content(&mut self, content: PanelContent) {
        self.content = Some(content);
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height.max(1));
    }

    pub fn scroll_home(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_end(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> u16 {
        (self.line_count() as u16).saturating_sub(self.viewport_height)
    }

    fn line_count(&self) -> usize {
        match &self.content {
            // heading + excerpt + blank + heading + excerpt
            Some(c) => {
                excerpt_line_count(&c.file_excerpt) + excerpt_line_count(&c.syslog_excerpt) + 3
            }
            None => 1,
        }
    }

    /// Text lines of the panel body, styled.
    fn body_lines(&self, theme: &Theme) -> Vec<Line<'_>> {
        let content = match &self.content {
            Some(c) => c,
            None => {
                return vec![Line::styled(PLACEHOLDER_LOADING, theme.dim_style())];
            }
        };

        let mut lines = Vec::with_capacity(self.line_count());
        lines.push(Line::styled(HEADING_LOG_FILE, theme.heading_style()));
        push_excerpt(&mut lines, &content.file_excerpt, theme);
        lines.push(Line::raw(""));
        lines.push(Line::styled(HEADING_SYSLOG, theme.heading_style()));
        push_excerpt(&mut lines, &content.syslog_excerpt, theme);
        lines
    }

    pub fn render(&mut self, theme: &Theme, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let title = match &self.content {
            Some(c) => format!("Aria2 - Log Data ({})", c.log_path),
            None => "Aria2 - Log Data".to_string(),
        };

        // Two border rows inside the body chunk
        self.viewport_height = chunks[0].height.saturating_sub(2);
        self.scroll = self.scroll.min(self.max_scroll());

        let body = Paragraph::new(self.body_lines(theme))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(theme.border_style()),
            )
            .style(theme.primary_style())
            .scroll((self.scroll, 0));
        frame.render_widget(body, chunks[0]);

        let footer = Paragraph::new(format!(
            "Refresh every {} seconds.",
            self.poll_interval_secs
        ))
        .alignment(Alignment::Right)
        .style(theme.dim_style());
        frame.render_widget(footer, chunks[1]);
    }
}

fn excerpt_line_count(excerpt: &LogExcerpt) -> usize {
    if excerpt.is_empty() {
        1
    } else {
        excerpt.lines().len().min(EXCERPT_LINES)
    }
}

fn push_excerpt<'a>(lines: &mut Vec<Line<'a>>, excerpt: &'a LogExcerpt, theme: &Theme) {
    if excerpt.is_empty() {
        lines.push(Line::styled(PLACEHOLDER_EMPTY, theme.dim_style()));
    } else {
        for line in excerpt.lines() {
            lines.push(Line::raw(line.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::LogExcerpt;

    fn content(file: &str, syslog: &str) -> PanelContent {
        PanelContent {
            log_path: "/var/log/aria2.log".to_string(),
            file_excerpt: LogExcerpt::from_tail_output(file),
            syslog_excerpt: LogExcerpt::from_syslog_output(syslog),
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_loading_placeholder_before_first_refresh() {
        let view = LogView::new(5);
        let lines = view.body_lines(&Theme::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), PLACEHOLDER_LOADING);
    }

    #[test]
    fn test_body_has_headings_and_reversed_excerpts() {
        let mut view = LogView::new(5);
        view.set_content(content("A\nB\nC", "x\ny"));

        let theme = Theme::default();
        let texts: Vec<String> = view.body_lines(&theme).iter().map(line_text).collect();
        assert_eq!(
            texts,
            [HEADING_LOG_FILE, "C", "B", "A", "", HEADING_SYSLOG, "y", "x"]
        );
    }

    #[test]
    fn test_empty_excerpts_render_placeholder() {
        let mut view = LogView::new(5);
        view.set_content(content("", ""));

        let theme = Theme::default();
        let texts: Vec<String> = view.body_lines(&theme).iter().map(line_text).collect();
        assert_eq!(
            texts,
            [
                HEADING_LOG_FILE,
                PLACEHOLDER_EMPTY,
                "",
                HEADING_SYSLOG,
                PLACEHOLDER_EMPTY
            ]
        );
    }

    #[test]
    fn test_scroll_clamps_to_zero() {
        let mut view = LogView::new(5);
        view.scroll_up(3);
        view.scroll_home();
        assert_eq!(view.scroll, 0);
    }
}
