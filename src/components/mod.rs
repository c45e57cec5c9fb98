pub mod day_view;
pub mod event_form;
pub mod help;
pub mod month_view;
pub mod status_bar;
pub mod timeline_view;

pub use day_view::DayView;
pub use event_form::EventForm;
pub use help::Help;
pub use month_view::MonthView;
pub use status_bar::StatusBar;
pub use timeline_view::TimelineView;
