use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const KEYS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("h/l \u{2190}/\u{2192}", "Previous/next day"),
            ("j/k \u{2191}/\u{2193}", "Move event selection"),
            ("[/]", "Previous/next month"),
            ("t", "Jump to today"),
        ],
    ),
    (
        "Views",
        &[
            ("1", "Month grid + day list"),
            ("2", "Timeline (timeline variant)"),
            ("o/O", "Next/previous organization filter"),
            ("a", "Show all organizations"),
        ],
    ),
    (
        "Events",
        &[
            ("n", "Create new event"),
            ("e/Enter", "Edit selected event"),
        ],
    ),
];

pub struct Help;

impl Help {
    pub fn render(frame: &mut Frame, area: Rect) {
        let theme = theme::current();
        let popup_w = area.width.clamp(30, 52);
        let popup_h = area.height.clamp(12, 20);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keybindings ")
            .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let mut lines = Vec::new();
        for (section, keys) in KEYS {
            lines.push(Line::from(Span::styled(*section, section_style)));
            for (key, desc) in *keys {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<10}", key), key_style),
                    Span::raw(*desc),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme.dim),
            Span::styled("Esc     ", key_style),
            Span::raw("Quit / close popup"),
        ]));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
