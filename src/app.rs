use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use ratatui::style::Color;
use uuid::Uuid;

use crate::calendar::{
    list_events, submit_event, EventIndex, ListedEvent, OrgId, Organizations, SubmitOutcome,
};
use crate::cli::Variant;
use crate::components::event_form::EventFormState;
use crate::components::month_view::days_in_month;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMode {
    Month,
    Timeline,
}

/// The event modal: closed, creating a new event, or editing an existing one.
#[derive(Debug, Clone)]
pub enum Modal {
    Closed,
    Create(EventFormState),
    Update(EventFormState),
}

impl Modal {
    pub fn form(&self) -> Option<&EventFormState> {
        match self {
            Modal::Closed => None,
            Modal::Create(form) | Modal::Update(form) => Some(form),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut EventFormState> {
        match self {
            Modal::Closed => None,
            Modal::Create(form) | Modal::Update(form) => Some(form),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }
}

pub struct App {
    pub running: bool,
    pub variant: Variant,
    pub view_mode: ViewMode,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub orgs: Organizations,
    pub org_filter: Option<OrgId>,
    pub index: EventIndex,
    pub day_events: Vec<ListedEvent>,
    pub timeline_events: Vec<ListedEvent>,
    /// Day of month → marker color, for the selected month.
    pub days_with_events: HashMap<u32, Color>,
    pub day_cursor: usize,
    pub timeline_cursor: usize,
    pub modal: Modal,
    pub status_message: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(variant: Variant, today: NaiveDate, orgs: Organizations, index: EventIndex) -> Self {
        let mut app = Self {
            running: true,
            variant,
            view_mode: ViewMode::Month,
            selected_date: today,
            today,
            orgs,
            org_filter: None,
            index,
            day_events: Vec::new(),
            timeline_events: Vec::new(),
            days_with_events: HashMap::new(),
            day_cursor: 0,
            timeline_cursor: 0,
            modal: Modal::Closed,
            status_message: None,
            show_help: false,
        };
        app.refresh_events();
        app
    }

    /// Re-derives every view list from the current index and filter.
    pub fn refresh_events(&mut self) {
        let filter = self.org_filter.as_ref();
        self.day_events = list_events(&self.index, &self.orgs, Some(self.selected_date), filter);

        self.timeline_events = if self.variant == Variant::Timeline {
            list_events(&self.index, &self.orgs, None, filter)
        } else {
            Vec::new()
        };

        self.days_with_events.clear();
        let year = self.selected_date.year();
        let month = self.selected_date.month();
        for day in 1..=days_in_month(year, month) {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            if let Some(first) = list_events(&self.index, &self.orgs, Some(date), filter).first() {
                self.days_with_events.insert(day, first.color);
            }
        }

        self.day_cursor = self.day_cursor.min(self.day_events.len().saturating_sub(1));
        self.timeline_cursor = self
            .timeline_cursor
            .min(self.timeline_events.len().saturating_sub(1));
    }

    // ── Navigation ──

    pub fn next_day(&mut self) {
        self.select_date(self.selected_date.succ_opt().unwrap_or(self.selected_date));
    }

    pub fn prev_day(&mut self) {
        self.select_date(self.selected_date.pred_opt().unwrap_or(self.selected_date));
    }

    pub fn next_month(&mut self) {
        let date = self
            .selected_date
            .checked_add_months(Months::new(1))
            .unwrap_or(self.selected_date);
        self.select_date(date);
    }

    pub fn prev_month(&mut self) {
        let date = self
            .selected_date
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.selected_date);
        self.select_date(date);
    }

    pub fn go_to_today(&mut self) {
        self.select_date(self.today);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.day_cursor = 0;
        self.refresh_events();
    }

    pub fn cursor_down(&mut self) {
        match self.view_mode {
            ViewMode::Month => {
                if self.day_cursor + 1 < self.day_events.len() {
                    self.day_cursor += 1;
                }
            }
            ViewMode::Timeline => {
                if self.timeline_cursor + 1 < self.timeline_events.len() {
                    self.timeline_cursor += 1;
                }
            }
        }
    }

    pub fn cursor_up(&mut self) {
        match self.view_mode {
            ViewMode::Month => self.day_cursor = self.day_cursor.saturating_sub(1),
            ViewMode::Timeline => self.timeline_cursor = self.timeline_cursor.saturating_sub(1),
        }
    }

    pub fn set_view(&mut self, mode: ViewMode) {
        if mode == ViewMode::Timeline && self.variant != Variant::Timeline {
            self.status_message = Some("Timeline needs --variant timeline".to_string());
            return;
        }
        self.view_mode = mode;
    }

    // ── Filtering ──

    pub fn next_org_filter(&mut self) {
        let next = self.orgs.next_filter(self.org_filter.as_ref());
        self.set_org_filter(next);
    }

    pub fn prev_org_filter(&mut self) {
        let prev = self.orgs.prev_filter(self.org_filter.as_ref());
        self.set_org_filter(prev);
    }

    pub fn set_org_filter(&mut self, filter: Option<OrgId>) {
        tracing::debug!(filter = ?filter, "organization filter changed");
        self.org_filter = filter;
        self.day_cursor = 0;
        self.timeline_cursor = 0;
        self.refresh_events();
    }

    /// Display name of the active organization filter.
    pub fn filter_name(&self) -> Option<&str> {
        self.org_filter.as_ref().map(|org| self.orgs.name(org))
    }

    /// The event under the cursor of the active view.
    pub fn selected_event(&self) -> Option<&ListedEvent> {
        match self.view_mode {
            ViewMode::Month => self.day_events.get(self.day_cursor),
            ViewMode::Timeline => self.timeline_events.get(self.timeline_cursor),
        }
    }

    // ── Event form ──

    pub fn open_create_form(&mut self) {
        let org = self
            .org_filter
            .as_ref()
            .and_then(|o| self.orgs.position(o))
            .unwrap_or(0);
        let id = self.variant.has_ids().then(|| Uuid::new_v4().to_string());
        self.modal = Modal::Create(EventFormState::new(self.selected_date, org, id));
    }

    pub fn open_update_form(&mut self) {
        if !self.variant.has_ids() {
            self.status_message = Some("Editing needs --variant timeline".to_string());
            return;
        }
        let Some(selected) = self.selected_event() else {
            self.status_message = Some("No event selected".to_string());
            return;
        };
        let org = self.orgs.position(&selected.event.org).unwrap_or(0);
        let form = EventFormState::from_event(&selected.event, org);
        self.modal = Modal::Update(form);
    }

    pub fn close_event_form(&mut self) {
        self.modal = Modal::Closed;
    }

    pub fn submit_event_form(&mut self) {
        let Some(form) = self.modal.form() else {
            return;
        };
        let event = match form.to_event(&self.orgs) {
            Ok(event) => event,
            Err(err) => {
                tracing::debug!(%err, "form rejected");
                self.status_message = Some(err.to_string());
                return;
            }
        };

        let date = event.time.date_naive();
        let (index, outcome) = submit_event(&self.index, event);
        self.index = index;
        self.modal = Modal::Closed;
        self.status_message = Some(
            match outcome {
                SubmitOutcome::Replaced => "Event updated",
                SubmitOutcome::Appended => "Event created",
            }
            .to_string(),
        );
        tracing::info!(?outcome, %date, total = self.index.len(), "event saved");
        self.select_date(date);
    }

    pub fn form_tab(&mut self) {
        if let Some(form) = self.modal.form_mut() {
            form.active_field = form.active_field.next();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(form) = self.modal.form_mut() {
            form.active_field = form.active_field.prev();
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(form) = self.modal.form_mut() {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = self.modal.form_mut() {
            form.backspace();
        }
    }

    pub fn form_space(&mut self) {
        let total = self.orgs.ids().len();
        if let Some(form) = self.modal.form_mut() {
            form.space(total);
        }
    }
}
