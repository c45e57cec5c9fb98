use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (the default until [`install`] runs).
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

/// Sets the theme for the rest of the process. Only the first call wins.
pub fn install(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("theme already installed, keeping the first one");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    pub accent: Color,
    /// Timeline date headings before, on and after today.
    pub past: Color,
    pub present: Color,
    pub future: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            accent: Color::Green,
            past: Color::Green,
            present: Color::Blue,
            future: Color::Gray,
        }
    }
}

impl Theme {
    /// Get a built-in preset by name, falling back to the default.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            other => {
                if other != "default" {
                    tracing::warn!(preset = other, "unknown theme preset, using default");
                }
                Self::default()
            }
        }
    }

    /// Style for a day cell that is both today and selected.
    pub fn today_selected(&self) -> Style {
        self.today.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)), // purple
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)), // cyan
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            highlight: Style::default()
                .bg(Color::Rgb(68, 71, 90))
                .add_modifier(Modifier::BOLD),
            accent: Color::Rgb(80, 250, 123),
            past: Color::Rgb(80, 250, 123),
            present: Color::Rgb(139, 233, 253),
            future: Color::Rgb(98, 114, 164),
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)), // yellow
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)), // frost
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            highlight: Style::default()
                .bg(Color::Rgb(67, 76, 94))
                .add_modifier(Modifier::BOLD),
            accent: Color::Rgb(163, 190, 140),
            past: Color::Rgb(163, 190, 140),
            present: Color::Rgb(129, 161, 193),
            future: Color::Rgb(76, 86, 106),
        }
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color(" Cyan "), Some(Color::Cyan));
        assert_eq!(parse_color("grey"), Some(Color::Gray));
        assert_eq!(parse_color("#ff80"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn unknown_preset_is_default() {
        assert_eq!(Theme::preset("solarized"), Theme::default());
        assert_eq!(Theme::preset("nord").name, "nord");
    }
}
