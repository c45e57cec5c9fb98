pub mod derive;
pub mod event;
pub mod generator;
pub mod index;
pub mod organization;
pub mod submit;

pub use derive::list_events;
pub use event::{ListedEvent, OrgEvent};
pub use generator::generate;
pub use index::{date_key, EventIndex};
pub use organization::{OrgId, Organization, Organizations};
pub use submit::{submit_event, SubmitOutcome};
