use chrono::NaiveDate;
use ratatui::style::Color;

use super::event::{ListedEvent, OrgEvent};
use super::index::{date_key, EventIndex};
use super::organization::{OrgId, Organizations};

/// Events matching the optional date and organization filters, oldest first.
///
/// With no date, all buckets are flattened. A date with no bucket yields an
/// empty list.
pub fn list_events(
    index: &EventIndex,
    orgs: &Organizations,
    date: Option<NaiveDate>,
    org: Option<&OrgId>,
) -> Vec<ListedEvent> {
    let selected: Vec<&OrgEvent> = match date {
        Some(date) => index
            .bucket(&date_key(date))
            .map(|bucket| bucket.iter().collect())
            .unwrap_or_default(),
        None => index.buckets().flat_map(|(_, bucket)| bucket.iter()).collect(),
    };

    let mut listed: Vec<(String, ListedEvent)> = selected
        .into_iter()
        .filter(|ev| org.map_or(true, |o| &ev.org == o))
        .map(|ev| {
            let color = orgs.color(&ev.org).unwrap_or(Color::Reset);
            (
                ev.iso_timestamp(),
                ListedEvent {
                    event: ev.clone(),
                    org_name: orgs.name(&ev.org).to_string(),
                    color,
                },
            )
        })
        .collect();

    listed.sort_by(|a, b| a.0.cmp(&b.0));
    listed.into_iter().map(|(_, ev)| ev).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::generator::generate;
    use chrono::{Local, TimeZone};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(day: u32, hour: u32, minute: u32) -> chrono::DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 5, day, hour, minute, 0)
            .earliest()
            .unwrap()
    }

    fn event(org: &str, name: &str, day: u32, hour: u32) -> OrgEvent {
        OrgEvent {
            id: None,
            org: OrgId::new(org),
            name: name.to_string(),
            time: at(day, hour, 0),
        }
    }

    fn sample_index() -> EventIndex {
        let mut index = EventIndex::new();
        for ev in [
            event("acme", "Late Sync", 3, 17),
            event("globex", "Early Standup", 3, 8),
            event("acme", "Quiet Lunch", 3, 12),
            event("hooli", "Joint Review", 5, 9),
        ] {
            let key = date_key(ev.time.date_naive());
            index.push(key, ev);
        }
        index
    }

    #[test]
    fn date_bucket_is_sorted_by_time() {
        let index = sample_index();
        let orgs = Organizations::default();
        let date = NaiveDate::from_ymd_opt(2024, 5, 3);

        let names: Vec<String> = list_events(&index, &orgs, date, None)
            .into_iter()
            .map(|l| l.event.name)
            .collect();
        assert_eq!(names, ["Early Standup", "Quiet Lunch", "Late Sync"]);
    }

    #[test]
    fn missing_date_is_empty() {
        let index = sample_index();
        let orgs = Organizations::default();
        let date = NaiveDate::from_ymd_opt(2024, 5, 4);
        assert!(list_events(&index, &orgs, date, None).is_empty());
    }

    #[test]
    fn no_date_flattens_every_bucket() {
        let index = sample_index();
        let orgs = Organizations::default();
        let listed = list_events(&index, &orgs, None, None);
        assert_eq!(listed.len(), 4);
        assert_eq!(listed.last().unwrap().event.name, "Joint Review");
    }

    #[test]
    fn org_filter_and_color() {
        let index = sample_index();
        let orgs = Organizations::default();
        let acme = OrgId::new("acme");

        let listed = list_events(&index, &orgs, None, Some(&acme));
        assert_eq!(listed.len(), 2);
        for l in &listed {
            assert_eq!(l.event.org, acme);
            assert_eq!(l.org_name, "Acme Corporation");
            assert_eq!(Some(l.color), orgs.color(&acme));
        }
    }

    #[test]
    fn unknown_org_gets_reset_color() {
        let mut index = EventIndex::new();
        let ev = event("nobody", "Open Demo", 3, 10);
        index.push(date_key(ev.time.date_naive()), ev);
        let listed = list_events(&index, &Organizations::default(), None, None);
        assert_eq!(listed[0].color, Color::Reset);
        assert_eq!(listed[0].org_name, "nobody");
    }

    proptest! {
        #[test]
        fn generated_lists_hold_filter_and_order(seed in any::<u64>(), pick in 0usize..6, day in 1u32..=31) {
            let orgs = Organizations::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let reference = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
            let index = generate(reference, &orgs, true, &mut rng);

            let filter = orgs.ids().get(pick).cloned();
            let date = NaiveDate::from_ymd_opt(2024, 5, day);

            for date in [None, date] {
                let listed = list_events(&index, &orgs, date, filter.as_ref());
                for pair in listed.windows(2) {
                    prop_assert!(pair[0].event.iso_timestamp() <= pair[1].event.iso_timestamp());
                }
                if let Some(ref org) = filter {
                    prop_assert!(listed.iter().all(|l| &l.event.org == org));
                }
                if let Some(date) = date {
                    if index.bucket(&date_key(date)).is_none() {
                        prop_assert!(listed.is_empty());
                    }
                }
            }
        }
    }
}
