use chrono::{DateTime, Local, SecondsFormat, Utc};
use ratatui::style::Color;

use super::organization::OrgId;

#[derive(Debug, Clone, PartialEq)]
pub struct OrgEvent {
    /// Only present in the timeline variant.
    pub id: Option<String>,
    pub org: OrgId,
    pub name: String,
    pub time: DateTime<Local>,
}

impl OrgEvent {
    /// UTC RFC 3339 with millisecond precision; string order is time order.
    pub fn iso_timestamp(&self) -> String {
        self.time
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn time_display(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// An event as handed to the views, with its organization's display name
/// and color attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedEvent {
    pub event: OrgEvent,
    pub org_name: String,
    pub color: Color,
}
