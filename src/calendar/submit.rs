use super::event::OrgEvent;
use super::index::{date_key, EventIndex};

/// What a submission did to its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Replaced,
    Appended,
}

/// Writes `event` into the bucket of its own date.
///
/// An event whose id matches one already in that bucket replaces it in
/// place; anything else, including an event without id, is appended. Only
/// the affected bucket is copied; all others stay shared with `index`.
pub fn submit_event(index: &EventIndex, event: OrgEvent) -> (EventIndex, SubmitOutcome) {
    let key = date_key(event.time.date_naive());
    let mut bucket: Vec<OrgEvent> = index
        .bucket(&key)
        .map(|b| b.to_vec())
        .unwrap_or_default();

    let existing = event
        .id
        .as_ref()
        .and_then(|id| bucket.iter().position(|e| e.id.as_ref() == Some(id)));

    let outcome = match existing {
        Some(pos) => {
            bucket[pos] = event;
            SubmitOutcome::Replaced
        }
        None => {
            bucket.push(event);
            SubmitOutcome::Appended
        }
    };

    tracing::debug!(%key, ?outcome, size = bucket.len(), "submitted event");
    (index.with_bucket(key, bucket), outcome)
}
