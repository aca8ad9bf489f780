use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::task::Priority;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub primary: Color,
    pub accent: Color,
    pub row_even: Color,
    pub row_odd: Color,
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,
    pub completed: Color,
    pub star: Color,
    pub star_dim: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub warn: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0xF9, 0xF9, 0xF9),
            text: Color::Rgb(0x2C, 0x3E, 0x50),
            dim: Color::Rgb(0x7F, 0x8C, 0x8D),
            primary: Color::Rgb(0x34, 0x98, 0xDB),
            accent: Color::Rgb(0xE7, 0x4C, 0x3C),
            row_even: Color::Rgb(0xF0, 0xF0, 0xF0),
            row_odd: Color::Rgb(0xC7, 0xD5, 0xED),
            priority_high: Color::Rgb(0xFA, 0xDB, 0xD8),
            priority_medium: Color::Rgb(0xF7, 0xF3, 0xD0),
            priority_low: Color::Rgb(0xD5, 0xF5, 0xE3),
            completed: Color::Rgb(0x80, 0x80, 0x80),
            star: Color::Rgb(0xFF, 0xD7, 0x00),
            star_dim: Color::Rgb(0x80, 0x80, 0x80),
            selection_bg: Color::Rgb(0x34, 0x98, 0xDB),
            selection_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            warn: Color::Rgb(0xE7, 0x4C, 0x3C),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "dim" => theme.dim = color,
                    "primary" => theme.primary = color,
                    "accent" => theme.accent = color,
                    "row_even" => theme.row_even = color,
                    "row_odd" => theme.row_odd = color,
                    "priority_high" => theme.priority_high = color,
                    "priority_medium" => theme.priority_medium = color,
                    "priority_low" => theme.priority_low = color,
                    "completed" => theme.completed = color,
                    "star" => theme.star = color,
                    "star_dim" => theme.star_dim = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_fg" => theme.selection_fg = color,
                    "warn" => theme.warn = color,
                    _ => {}
                }
            }
        }
        theme
    }

    /// Row background for a priority level
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.priority_high,
            Priority::Medium => self.priority_medium,
            Priority::Low => self.priority_low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_color("#FF0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("FF0000"), None);
        assert_eq!(parse_hex_color("#F00"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        // six bytes but not six ASCII digits
        assert_eq!(parse_hex_color("#aébcd"), None);
        assert_eq!(parse_hex_color("#ûûû"), None);
    }

    #[test]
    fn multibyte_color_value_is_ignored() {
        let mut colors = HashMap::new();
        colors.insert("star".to_string(), "#aébcd".to_string());
        let ui = UiConfig {
            show_key_hints: true,
            colors,
        };
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.star, Theme::default().star);
    }

    #[test]
    fn config_overrides_apply() {
        let mut colors = HashMap::new();
        colors.insert("star".to_string(), "#123456".to_string());
        colors.insert("unknown_key".to_string(), "#654321".to_string());
        let ui = UiConfig {
            show_key_hints: true,
            colors,
        };
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.star, Color::Rgb(0x12, 0x34, 0x56));
        assert_eq!(theme.text, Theme::default().text);
    }
}
