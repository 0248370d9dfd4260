use ratatui::style::Color;

use crate::model::{PendingEdit, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub blue: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Habitica's purple-on-dark palette
        Theme {
            background: Color::Rgb(0x1E, 0x14, 0x33),
            text: Color::Rgb(0xE1, 0xDB, 0xF0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x92, 0x5C, 0xF3),
            dim: Color::Rgb(0x87, 0x81, 0x90),
            red: Color::Rgb(0xF7, 0x4E, 0x52),
            yellow: Color::Rgb(0xFF, 0xB4, 0x45),
            green: Color::Rgb(0x24, 0xCC, 0x8F),
            cyan: Color::Rgb(0x50, 0xB5, 0xE9),
            purple: Color::Rgb(0x9A, 0x62, 0xFF),
            blue: Color::Rgb(0x29, 0x95, 0xCD),
            selection_bg: Color::Rgb(0x36, 0x1F, 0x56),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui]` config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "purple" => theme.purple = color,
                "blue" => theme.blue = color,
                "selection_bg" => theme.selection_bg = color,
                _ => tracing::warn!(key = %key, "unknown color slot"),
            }
        }

        theme
    }

    /// Color of the marker for a staged action
    pub fn pending_color(&self, pending: PendingEdit) -> Color {
        match pending {
            PendingEdit::None => self.dim,
            PendingEdit::MarkUp | PendingEdit::Complete => self.green,
            PendingEdit::MarkDown => self.yellow,
            PendingEdit::Delete => self.red,
            PendingEdit::Edit => self.cyan,
        }
    }
}
