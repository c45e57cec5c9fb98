use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use super::event::OrgEvent;
use super::index::{date_key, EventIndex};
use super::organization::Organizations;

pub const SAMPLED_DAYS: RangeInclusive<u32> = 13..=15;
pub const EVENTS_PER_DAY: RangeInclusive<usize> = 1..=6;
pub const DAY_STRIDE: i64 = 2;

const ADJECTIVES: [&str; 16] = [
    "Quarterly", "Weekly", "Urgent", "Quiet", "Strategic", "Annual", "Remote", "Open",
    "Closed", "Joint", "Internal", "Public", "Early", "Late", "Focused", "Informal",
];

const NOUNS: [&str; 16] = [
    "Review", "Sync", "Standup", "Planning", "Retro", "Offsite", "Demo", "Workshop",
    "Briefing", "Audit", "Kickoff", "Lunch", "Interview", "Launch", "Townhall", "Training",
];

/// Synthesizes the seed calendar for the month containing `reference`.
///
/// Days are sampled every other day from the first of the month, so the
/// last few may land in the following month.
pub fn generate<R: Rng + ?Sized>(
    reference: NaiveDate,
    orgs: &Organizations,
    with_ids: bool,
    rng: &mut R,
) -> EventIndex {
    let mut index = EventIndex::new();
    if orgs.is_empty() {
        tracing::warn!("no organizations configured, generating an empty calendar");
        return index;
    }

    let first = reference.with_day(1).unwrap_or(reference);
    let days = rng.gen_range(SAMPLED_DAYS);

    for i in 0..days {
        let date = first + Duration::days(i64::from(i) * DAY_STRIDE);
        let key = date_key(date);
        let count = rng.gen_range(EVENTS_PER_DAY);

        for _ in 0..count {
            let Some(org) = orgs.ids().choose(rng).cloned() else {
                continue;
            };
            let minutes = rng.gen_range(0..24 * 60);
            let Some(time) = local_time(date, minutes) else {
                continue;
            };
            let id = with_ids.then(|| Uuid::new_v4().to_string());

            index.push(
                key.clone(),
                OrgEvent {
                    id,
                    org,
                    name: random_name(rng),
                    time,
                },
            );
        }
    }

    tracing::info!(days, events = index.len(), "generated seed calendar");
    index
}

fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Untitled");
    let noun = NOUNS.choose(rng).copied().unwrap_or("Event");
    format!("{} {}", adjective, noun)
}

/// Local timestamp `minutes` after midnight; skips forward over a DST gap.
fn local_time(date: NaiveDate, minutes: u32) -> Option<DateTime<Local>> {
    resolve_on(date, minutes, |naive| naive.and_local_timezone(Local).earliest())
}

/// Resolves `minutes` after midnight on `date` through `resolve`, retrying an
/// hour later when it falls in a gap. `None` if the result leaves `date`.
fn resolve_on<Tz: TimeZone>(
    date: NaiveDate,
    minutes: u32,
    resolve: impl Fn(NaiveDateTime) -> Option<DateTime<Tz>>,
) -> Option<DateTime<Tz>> {
    let naive = date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(minutes));
    resolve(naive)
        .or_else(|| resolve(naive + Duration::hours(1)))
        .filter(|time| time.date_naive() == date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn buckets_follow_stride_from_first_of_month() {
        let orgs = Organizations::default();
        let mut rng = StdRng::seed_from_u64(7);
        let index = generate(reference(), &orgs, true, &mut rng);

        let first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let keys: Vec<&String> = index.buckets().map(|(k, _)| k).collect();
        assert!(SAMPLED_DAYS.contains(&(keys.len() as u32)));

        for i in 0..keys.len() as i64 {
            let date = first + Duration::days(i * DAY_STRIDE);
            let bucket = index.bucket(&date_key(date)).expect("sampled day present");
            assert!(EVENTS_PER_DAY.contains(&bucket.len()));
            for ev in bucket.iter() {
                assert_eq!(ev.time.date_naive(), date);
            }
        }
    }

    #[test]
    fn every_org_has_a_color() {
        let orgs = Organizations::default();
        let mut rng = StdRng::seed_from_u64(99);
        let index = generate(reference(), &orgs, false, &mut rng);
        for (_, bucket) in index.buckets() {
            for ev in bucket.iter() {
                assert!(orgs.contains(&ev.org));
                assert!(orgs.color(&ev.org).is_some());
            }
        }
    }

    #[test]
    fn ids_only_in_timeline_variant() {
        let orgs = Organizations::default();
        let mut rng = StdRng::seed_from_u64(1);
        let with = generate(reference(), &orgs, true, &mut rng);
        let without = generate(reference(), &orgs, false, &mut rng);

        assert!(with.buckets().all(|(_, b)| b.iter().all(|e| e.id.is_some())));
        assert!(without.buckets().all(|(_, b)| b.iter().all(|e| e.id.is_none())));
    }

    #[test]
    fn ids_unique_within_bucket() {
        let orgs = Organizations::default();
        let mut rng = StdRng::seed_from_u64(3);
        let index = generate(reference(), &orgs, true, &mut rng);
        for (_, bucket) in index.buckets() {
            let mut ids: Vec<&String> = bucket.iter().filter_map(|e| e.id.as_ref()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), bucket.len());
        }
    }

    #[test]
    fn names_are_two_words() {
        let orgs = Organizations::default();
        let mut rng = StdRng::seed_from_u64(5);
        let index = generate(reference(), &orgs, false, &mut rng);
        for (_, bucket) in index.buckets() {
            for ev in bucket.iter() {
                assert_eq!(ev.name.split(' ').count(), 2, "{}", ev.name);
            }
        }
    }

    #[test]
    fn no_organizations_means_no_events() {
        let orgs = Organizations::new([]);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(generate(reference(), &orgs, true, &mut rng).is_empty());
    }

    /// UTC with every time in `gap_hour` treated as nonexistent.
    fn with_gap(gap_hour: u32) -> impl Fn(NaiveDateTime) -> Option<DateTime<Utc>> {
        move |naive| (naive.hour() != gap_hour).then(|| Utc.from_utc_datetime(&naive))
    }

    #[test]
    fn gap_skips_forward_within_the_day() {
        let time = resolve_on(reference(), 2 * 60 + 30, with_gap(2)).unwrap();
        assert_eq!(time.date_naive(), reference());
        assert_eq!((time.hour(), time.minute()), (3, 30));
    }

    #[test]
    fn gap_before_midnight_is_dropped() {
        assert_eq!(resolve_on(reference(), 23 * 60 + 30, with_gap(23)), None);
    }

    #[test]
    fn generated_times_stay_on_their_bucket_date() {
        let orgs = Organizations::default();
        let mut rng = StdRng::seed_from_u64(9);
        let index = generate(reference(), &orgs, false, &mut rng);
        for (key, bucket) in index.buckets() {
            for event in bucket.iter() {
                assert_eq!(&date_key(event.time.date_naive()), key);
            }
        }
    }
}
