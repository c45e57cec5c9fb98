use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::calendar::ListedEvent;
use crate::theme;

pub struct DayView;

impl DayView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        events: &[ListedEvent],
        cursor: usize,
        filter: Option<&str>,
    ) {
        let theme = theme::current();
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else if w >= 18 {
            format!(" {} ", date.format("%b %d, %Y"))
        } else {
            format!(" {} ", date.format("%m/%d"))
        };

        let n = events.len();
        let mut count_str = format!(" {} event{}", n, if n == 1 { "" } else { "s" });
        if let Some(org) = filter {
            count_str.push_str(&format!(" for {}", org));
        }
        count_str.push(' ');

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count_str, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if events.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new("No events").style(theme.dim), inner);
            return;
        }

        let items: Vec<ListItem> = events.iter().map(format_event).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(theme.highlight);
        let mut state = ListState::default().with_selected(Some(cursor.min(n - 1)));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// One row: color swatch, time, then `[<organization>] <event name>`.
pub fn format_event(listed: &ListedEvent) -> ListItem<'static> {
    let ev = &listed.event;
    ListItem::new(Line::from(vec![
        Span::styled("  ", Style::default().bg(listed.color)),
        Span::styled(
            format!(" {} ", ev.time_display()),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled(format!("[{}] ", listed.org_name), Style::default().fg(listed.color)),
        Span::raw(ev.name.clone()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{date_key, list_events, EventIndex, OrgEvent, OrgId, Organization, Organizations};
    use chrono::{Local, TimeZone};
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use ratatui::Terminal;

    fn render(events: &[ListedEvent], filter: Option<&str>) -> String {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(70, 8)).unwrap();
        terminal
            .draw(|frame| DayView::render(frame, frame.area(), date, events, 0, filter))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn rows_show_configured_org_name() {
        let orgs = Organizations::new([Organization::new(
            "alicebob",
            "Alice and Bob Inc.",
            Color::Blue,
        )]);
        let event = OrgEvent {
            id: None,
            org: OrgId::new("alicebob"),
            name: "Weekly Sync".to_string(),
            time: Local.with_ymd_and_hms(2024, 5, 3, 9, 30, 0).earliest().unwrap(),
        };
        let mut index = EventIndex::new();
        index.push(date_key(event.time.date_naive()), event);

        let listed = list_events(&index, &orgs, NaiveDate::from_ymd_opt(2024, 5, 3), None);
        let screen = render(&listed, Some(orgs.name(&OrgId::new("alicebob"))));

        assert!(screen.contains("[Alice and Bob Inc.] Weekly Sync"));
        assert!(screen.contains("1 event for Alice and Bob Inc."));
        assert!(!screen.contains("alicebob"));
    }

    #[test]
    fn empty_day_says_so() {
        assert!(render(&[], None).contains("No events"));
    }
}
