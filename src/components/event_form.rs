use chrono::{Local, NaiveDate, NaiveTime};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use thiserror::Error;

use crate::calendar::{OrgEvent, Organizations};
use crate::theme;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    Date,
    Time,
    Organization,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Name => FormField::Date,
            FormField::Date => FormField::Time,
            FormField::Time => FormField::Organization,
            FormField::Organization => FormField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Name => FormField::Organization,
            FormField::Date => FormField::Name,
            FormField::Time => FormField::Date,
            FormField::Organization => FormField::Time,
        }
    }
}

/// Why the form's fields could not become an event.
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("invalid date \"{0}\", expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid time \"{0}\", expected HH:MM")]
    InvalidTime(String),
    #[error("{date} {time} does not exist in the local timezone")]
    NonexistentTime { date: NaiveDate, time: NaiveTime },
    #[error("no organizations configured")]
    NoOrganization,
}

#[derive(Debug, Clone)]
pub struct EventFormState {
    /// Carried through unchanged; `None` in the basic variant.
    pub id: Option<String>,
    pub name: String,
    pub date: String,
    pub time: String,
    pub org_index: usize,
    pub active_field: FormField,
}

impl EventFormState {
    pub fn new(date: NaiveDate, org_index: usize, id: Option<String>) -> Self {
        Self {
            id,
            name: String::new(),
            date: date.format(DATE_FORMAT).to_string(),
            time: "09:00".to_string(),
            org_index,
            active_field: FormField::Name,
        }
    }

    pub fn from_event(event: &OrgEvent, org_index: usize) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            date: event.time.format(DATE_FORMAT).to_string(),
            time: event.time.format(TIME_FORMAT).to_string(),
            org_index,
            active_field: FormField::Name,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Name => self.name.push(c),
            FormField::Date => self.date.push(c),
            FormField::Time => self.time.push(c),
            FormField::Organization => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Name => { self.name.pop(); }
            FormField::Date => { self.date.pop(); }
            FormField::Time => { self.time.pop(); }
            FormField::Organization => {}
        }
    }

    /// Space cycles the organization, or is typed into text fields.
    pub fn space(&mut self, org_total: usize) {
        match self.active_field {
            FormField::Organization => {
                if org_total > 0 {
                    self.org_index = (self.org_index + 1) % org_total;
                }
            }
            _ => self.input_char(' '),
        }
    }

    /// Builds the submitted event. The name is taken as typed, even empty.
    pub fn to_event(&self, orgs: &Organizations) -> Result<OrgEvent, FormError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| FormError::InvalidDate(self.date.clone()))?;
        let time = NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT)
            .map_err(|_| FormError::InvalidTime(self.time.clone()))?;
        let org = orgs
            .ids()
            .get(self.org_index)
            .or_else(|| orgs.ids().first())
            .cloned()
            .ok_or(FormError::NoOrganization)?;
        let time = date
            .and_time(time)
            .and_local_timezone(Local)
            .earliest()
            .ok_or(FormError::NonexistentTime { date, time })?;

        Ok(OrgEvent {
            id: self.id.clone(),
            org,
            name: self.name.clone(),
            time,
        })
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        state: &EventFormState,
        orgs: &Organizations,
        is_update: bool,
    ) {
        let theme = theme::current();

        // Center the form popup
        let form_w = area.width.clamp(30, 50);
        let form_h = area.height.clamp(9, 11);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h).intersection(area);

        frame.render_widget(Clear, form_area);

        let title = if is_update { " Edit Event " } else { " New Event " };
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // name
            Constraint::Length(1), // date
            Constraint::Length(1), // time
            Constraint::Length(1), // organization
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(frame, rows[0], "Name:", &state.name, state.active_field == FormField::Name);
        render_field(frame, rows[1], "Date:", &state.date, state.active_field == FormField::Date);
        render_field(frame, rows[2], "Time:", &state.time, state.active_field == FormField::Time);

        let org = orgs.ids().get(state.org_index);
        let org_name = org.map(|o| orgs.name(o)).unwrap_or("-");
        let org_active = state.active_field == FormField::Organization;
        let mut org_spans = vec![Span::styled(format!("{:<7}", "Org:"), theme.dim)];
        if let Some(color) = org.and_then(|o| orgs.color(o)) {
            org_spans.push(Span::styled("  ", Style::default().bg(color)));
            org_spans.push(Span::raw(" "));
        }
        org_spans.push(Span::styled(
            if org_active { format!("< {} >", org_name) } else { org_name.to_string() },
            active_style(org_active),
        ));
        frame.render_widget(Paragraph::new(Line::from(org_spans)), rows[3]);

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme.dim),
            Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Org ", theme.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[5]);
    }
}

fn active_style(active: bool) -> Style {
    if active {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };
    let spans = vec![
        Span::styled(format!("{:<7}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), active_style(active)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::OrgId;
    use chrono::TimeZone;

    fn form() -> EventFormState {
        EventFormState::new(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(), 1, Some("x".into()))
    }

    #[test]
    fn fields_cycle_both_ways() {
        let mut field = FormField::Name;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Organization);
    }

    #[test]
    fn builds_event_from_fields() {
        let mut state = form();
        state.name = "Joint Audit".into();
        state.time = "14:30".into();
        let orgs = Organizations::default();

        let event = state.to_event(&orgs).unwrap();
        assert_eq!(event.id.as_deref(), Some("x"));
        assert_eq!(event.org, orgs.ids()[1]);
        assert_eq!(event.name, "Joint Audit");
        assert_eq!(
            event.time,
            Local.with_ymd_and_hms(2024, 5, 3, 14, 30, 0).earliest().unwrap()
        );
    }

    #[test]
    fn empty_name_is_accepted() {
        assert!(form().to_event(&Organizations::default()).is_ok());
    }

    #[test]
    fn rejects_unparsable_date_and_time() {
        let orgs = Organizations::default();
        let mut state = form();
        state.date = "2024-13-01".into();
        assert_eq!(
            state.to_event(&orgs),
            Err(FormError::InvalidDate("2024-13-01".into()))
        );

        let mut state = form();
        state.time = "9am".into();
        assert_eq!(state.to_event(&orgs), Err(FormError::InvalidTime("9am".into())));
    }

    #[test]
    fn no_organizations_is_an_error() {
        let orgs = Organizations::new([]);
        assert_eq!(form().to_event(&orgs), Err(FormError::NoOrganization));
    }

    #[test]
    fn out_of_range_org_falls_back_to_first() {
        let orgs = Organizations::default();
        let mut state = form();
        state.org_index = 99;
        assert_eq!(state.to_event(&orgs).unwrap().org, OrgId::new("acme"));
    }

    #[test]
    fn prefill_round_trips_event() {
        let orgs = Organizations::default();
        let mut state = form();
        state.name = "Quiet Retro".into();
        let event = state.to_event(&orgs).unwrap();

        let refilled = EventFormState::from_event(&event, 1);
        assert_eq!(refilled.date, "2024-05-03");
        assert_eq!(refilled.time, "09:00");
        assert_eq!(refilled.to_event(&orgs).unwrap(), event);
    }

    #[test]
    fn typing_goes_to_active_field() {
        let mut state = form();
        state.input_char('A');
        state.space(5);
        state.active_field = FormField::Organization;
        state.input_char('z');
        state.space(5);
        assert_eq!(state.name, "A ");
        assert_eq!(state.org_index, 2);
        state.active_field = FormField::Date;
        state.backspace();
        assert_eq!(state.date, "2024-05-0");
    }
}
