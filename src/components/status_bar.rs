use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Modal, ViewMode};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let w = area.width as usize;
        let style = theme::current().status;

        let mode_str = match app.view_mode {
            ViewMode::Month => "[1]Month",
            ViewMode::Timeline => "[2]Timeline",
        };
        let modal_str = match app.modal {
            Modal::Closed => "",
            Modal::Create(_) => " [New Event]",
            Modal::Update(_) => " [Edit Event]",
        };
        let filter_str = app.orgs.filter_label(app.org_filter.as_ref());
        let left = format!(
            " {}{} ({}) {} ",
            mode_str,
            modal_str,
            app.variant.label(),
            filter_str
        );

        // Status message wins over hints
        let right = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else {
            hints(app, w.saturating_sub(left.len()))
        };

        let padding = " ".repeat(w.saturating_sub(left.len() + right.len()));
        let line = Line::from(vec![
            Span::styled(left, style),
            Span::styled(padding, style),
            Span::styled(right, style),
        ]);

        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}

/// The longest key hint line that fits in `room` columns.
fn hints(app: &App, room: usize) -> String {
    let candidates: Vec<String> = if app.modal.is_open() {
        vec![
            " Tab:Next Space:Org Enter:Save Esc:Cancel".to_string(),
            " Esc:Cancel".to_string(),
        ]
    } else {
        let edit = if app.variant.has_ids() { " e:Edit" } else { "" };
        let full = match app.view_mode {
            ViewMode::Month => format!(" hl:Day [/]:Mon jk:Sel o:Org n:New{} ?:Help q:Quit", edit),
            ViewMode::Timeline => format!(" jk:Sel o:Org n:New{} ?:Help q:Quit", edit),
        };
        vec![full, " ?:Help q:Quit".to_string()]
    };
    candidates
        .into_iter()
        .find(|hint| hint.len() <= room)
        .unwrap_or_default()
}
