use ratatui::style::{Color, Modifier, Style};
use std::env;

/// Theme identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Phosphor,
    Amber,
    Mono,
}

/// Color palette shared by all themes.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: Color,
    pub dim: Color,
    pub accent_bg: Color,
    pub accent_fg: Color,
    pub border: Color,
}

fn supports_truecolor() -> bool {
    env::var("COLORTERM")
        .map(|v| v == "truecolor" || v == "24bit")
        .unwrap_or(false)
}

impl Palette {
    fn phosphor() -> Self {
        if supports_truecolor() {
            Self {
                primary: Color::Rgb(0x3C, 0xFF, 0x8A),
                dim: Color::Rgb(0x0E, 0x5A, 0x2E),
                accent_bg: Color::Rgb(0x0F, 0x2A, 0x1A),
                accent_fg: Color::Rgb(0xBF, 0xFF, 0xD6),
                border: Color::Rgb(0x16, 0x7A, 0x43),
            }
        } else {
            Self {
                primary: Color::Indexed(10),
                dim: Color::Indexed(22),
                accent_bg: Color::Indexed(22),
                accent_fg: Color::Indexed(10),
                border: Color::Indexed(2),
            }
        }
    }

    fn amber() -> Self {
        if supports_truecolor() {
            Self {
                primary: Color::Rgb(0xFF, 0xB3, 0x40),
                dim: Color::Rgb(0x66, 0x44, 0x11),
                accent_bg: Color::Rgb(0x1A, 0x14, 0x0A),
                accent_fg: Color::Rgb(0xFF, 0xCC, 0x80),
                border: Color::Rgb(0x7A, 0x5A, 0x20),
            }
        } else {
            Self {
                primary: Color::Indexed(11),
                dim: Color::Indexed(58),
                accent_bg: Color::Indexed(58),
                accent_fg: Color::Indexed(11),
                border: Color::Indexed(3),
            }
        }
    }

    fn mono() -> Self {
        Self {
            primary: Color::White,
            dim: Color::DarkGray,
            accent_bg: Color::DarkGray,
            accent_fg: Color::White,
            border: Color::Gray,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: ThemeName,
    palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Phosphor)
    }
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let palette = match name {
            ThemeName::Phosphor => Palette::phosphor(),
            ThemeName::Amber => Palette::amber(),
            ThemeName::Mono => Palette::mono(),
        };
        Self { name, palette }
    }

    pub fn from_env() -> Self {
        if let Ok(theme_str) = env::var("ARIALOG_THEME") {
            match theme_str.to_lowercase().as_str() {
                "amber" => Self::new(ThemeName::Amber),
                "mono" => Self::new(ThemeName::Mono),
                _ => Self::default(),
            }
        } else {
            Self::default()
        }
    }

    /// Create primary text style
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.palette.primary)
    }

    /// Create dim text style
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.palette.dim)
    }

    /// Style for the excerpt headings
    pub fn heading_style(&self) -> Style {
        Style::default()
            .bg(self.palette.accent_bg)
            .fg(self.palette.accent_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Create border style
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.palette.border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.name, ThemeName::Phosphor);
    }

    #[test]
    fn test_theme_styles() {
        let theme = Theme::new(ThemeName::Mono);
        let _ = theme.primary_style();
        let _ = theme.heading_style();
        // Just ensure they don't panic
    }
}
