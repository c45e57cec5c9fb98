use std::cmp::Ordering;

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::calendar::ListedEvent;
use crate::components::day_view::format_event;
use crate::theme::{self, Theme};

/// Where a date falls relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRelation {
    Past,
    Today,
    Future,
}

impl DayRelation {
    pub fn of(date: NaiveDate, today: NaiveDate) -> Self {
        match date.cmp(&today) {
            Ordering::Less => DayRelation::Past,
            Ordering::Equal => DayRelation::Today,
            Ordering::Greater => DayRelation::Future,
        }
    }

    fn heading_style(self, theme: &Theme) -> Style {
        let color = match self {
            DayRelation::Past => theme.past,
            DayRelation::Today => theme.present,
            DayRelation::Future => theme.future,
        };
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }
}

/// Every event in time order, under a heading per date.
pub struct TimelineView;

impl TimelineView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        events: &[ListedEvent],
        cursor: usize,
        today: NaiveDate,
        filter: Option<&str>,
    ) {
        let theme = theme::current();
        let title = match filter {
            Some(org) => format!(" Timeline: {} ", org),
            None => " Timeline ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(
                format!(" {} events ", events.len()),
                theme.dim,
            )))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if events.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new("No events").style(theme.dim), inner);
            return;
        }

        let (rows, selected) = timeline_rows(events, cursor, today);
        let items: Vec<ListItem> = rows
            .into_iter()
            .map(|row| match row {
                TimelineRow::Heading(date, relation) => {
                    let mut label = date.format("%a %b %d, %Y").to_string();
                    if relation == DayRelation::Today {
                        label.push_str(" (today)");
                    }
                    ListItem::new(Line::from(Span::styled(label, relation.heading_style(theme))))
                }
                TimelineRow::Event(listed) => format_event(listed),
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.highlight);
        let mut state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

#[derive(Debug, PartialEq)]
pub enum TimelineRow<'a> {
    Heading(NaiveDate, DayRelation),
    Event(&'a ListedEvent),
}

/// Interleaves date headings into the event list and maps the event cursor
/// to its row.
pub fn timeline_rows(
    events: &[ListedEvent],
    cursor: usize,
    today: NaiveDate,
) -> (Vec<TimelineRow<'_>>, Option<usize>) {
    let mut rows = Vec::with_capacity(events.len());
    let mut selected = None;
    let mut last_date = None;

    for (i, listed) in events.iter().enumerate() {
        let date = listed.event.time.date_naive();
        if last_date != Some(date) {
            rows.push(TimelineRow::Heading(date, DayRelation::of(date, today)));
            last_date = Some(date);
        }
        if i == cursor {
            selected = Some(rows.len());
        }
        rows.push(TimelineRow::Event(listed));
    }

    (rows, selected)
}
