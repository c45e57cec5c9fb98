use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct MonthView;

impl MonthView {
    /// `days_with_events` maps day of month to the marker color drawn next
    /// to it.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        selected_date: NaiveDate,
        today: NaiveDate,
        days_with_events: &HashMap<u32, Color>,
    ) {
        let theme = theme::current();
        let year = selected_date.year();
        let month = selected_date.month();

        let block = Block::default()
            .title(format!(" {} {} ", month_name(month), year))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Line::from(
            DAY_NAMES
                .iter()
                .map(|d| Span::styled(format!("{:^5}", d), theme.header))
                .collect::<Vec<Span>>(),
        );

        let weeks = month_grid(year, month);
        let lines: Vec<Line> = weeks
            .iter()
            .map(|week| {
                let mut cells: Vec<Span> = Vec::new();
                for day in week {
                    let Some(date) = day.and_then(|d| NaiveDate::from_ymd_opt(year, month, d)) else {
                        cells.push(Span::raw("     "));
                        continue;
                    };
                    let style = if date == today && date == selected_date {
                        theme.today_selected()
                    } else if date == selected_date {
                        theme.selected
                    } else if date == today {
                        theme.today
                    } else {
                        Style::default()
                    };

                    cells.push(Span::styled(format!(" {:>2}", date.day()), style));
                    match days_with_events.get(&date.day()) {
                        Some(color) => cells.push(Span::styled("\u{25cf} ", Style::default().fg(*color))),
                        None => cells.push(Span::raw("  ")),
                    }
                }
                Line::from(cells)
            })
            .collect();

        let mut constraints = vec![Constraint::Length(1)]; // header
        constraints.extend(lines.iter().map(|_| Constraint::Length(1)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in lines.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}

/// Weeks of the month, Sunday first; `None` pads days outside the month.
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<u32>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_sunday();
    let days = days_in_month(year, month);

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    for day in 1..=days {
        let slot = ((offset + day - 1) % 7) as usize;
        week[slot] = Some(day);
        if slot == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| {
            let next = first.checked_add_months(Months::new(1))?;
            Some(next.signed_duration_since(first).num_days() as u32)
        })
        .unwrap_or(0)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
