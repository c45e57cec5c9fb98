use std::collections::HashMap;
use std::rc::Rc;

use chrono::{Datelike, NaiveDate};

use super::event::OrgEvent;

/// Bucket key for a date: `"YYYY-M-D"`, month and day not zero-padded.
///
/// Every lookup into an [`EventIndex`] must build its key here.
pub fn date_key(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

/// Date-keyed event buckets.
///
/// Cloning copies the top-level map only; buckets are shared until one is
/// written through [`EventIndex::with_bucket`].
#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    buckets: HashMap<String, Rc<Vec<OrgEvent>>>,
}

impl EventIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, key: &str) -> Option<&Rc<Vec<OrgEvent>>> {
        self.buckets.get(key)
    }

    pub fn events_on(&self, date: NaiveDate) -> &[OrgEvent] {
        self.buckets
            .get(&date_key(date))
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&String, &Rc<Vec<OrgEvent>>)> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(|b| b.is_empty())
    }

    /// A new index equal to this one with `key` pointing at `events`.
    pub fn with_bucket(&self, key: String, events: Vec<OrgEvent>) -> Self {
        let mut buckets = self.buckets.clone();
        buckets.insert(key, Rc::new(events));
        Self { buckets }
    }

    /// Appends during initial construction, before the index is shared.
    pub(crate) fn push(&mut self, key: String, event: OrgEvent) {
        Rc::make_mut(self.buckets.entry(key).or_default()).push(event);
    }
}
