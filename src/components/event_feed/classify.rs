use super::models::CalendarEvent;
use crate::utils::time::{parse_event_stamp, start_of_today, start_of_tomorrow};
use chrono::{DateTime, TimeZone};

/// Display bucket an event is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Today,
    Upcoming,
    Waste,
}

/// Result of classifying one fetch cycle, order preserved from the source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub today: Vec<CalendarEvent>,
    pub upcoming: Vec<CalendarEvent>,
    pub waste: Vec<CalendarEvent>,
}

/// Partition events into the three display buckets.
///
/// Deterministic given `now`. The waste calendar check comes first and is
/// exclusive of the date checks, so waste events land in the waste bucket
/// regardless of their start time. Non-waste events starting strictly
/// before today are dropped, as are events whose start does not parse.
pub fn classify<Tz: TimeZone>(
    events: &[CalendarEvent],
    now: &DateTime<Tz>,
    waste_calendar_id: &str,
) -> Buckets {
    let today = start_of_today(now);
    let tomorrow = start_of_tomorrow(now);

    let mut buckets = Buckets::default();
    for event in events {
        if event.calendar_id == waste_calendar_id {
            buckets.waste.push(event.clone());
            continue;
        }
        let Some(start) = parse_event_stamp(&event.start) else {
            continue;
        };
        if start >= today && start < tomorrow {
            buckets.today.push(event.clone());
        } else if start >= tomorrow {
            buckets.upcoming.push(event.clone());
        }
        // start before today: stale event, rendered nowhere
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_WASTE_CALENDAR_ID;
    use chrono::{TimeZone, Utc};

    fn event(summary: &str, start: &str, calendar_id: &str) -> CalendarEvent {
        CalendarEvent {
            summary: summary.to_string(),
            start: start.to_string(),
            end: start.to_string(),
            calendar_id: calendar_id.to_string(),
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        // Sunday evening, 2024-06-09
        Utc.with_ymd_and_hms(2024, 6, 9, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_waste_takes_precedence_over_dates() {
        let events = vec![
            event("Trash", "2024-06-10T00:00:00", DEFAULT_WASTE_CALENDAR_ID),
            event("Old bins", "2020-01-01T00:00:00", DEFAULT_WASTE_CALENDAR_ID),
            event("Future bins", "2030-01-01T00:00:00", DEFAULT_WASTE_CALENDAR_ID),
        ];
        let buckets = classify(&events, &now(), DEFAULT_WASTE_CALENDAR_ID);

        assert_eq!(buckets.waste.len(), 3);
        assert!(buckets.today.is_empty());
        assert!(buckets.upcoming.is_empty());
    }

    #[test]
    fn test_today_window_is_half_open() {
        let events = vec![
            event("Midnight", "2024-06-09T00:00:00", "calendar.family"),
            event("Late", "2024-06-09T23:59:59", "calendar.family"),
            event("Next midnight", "2024-06-10T00:00:00", "calendar.family"),
        ];
        let buckets = classify(&events, &now(), DEFAULT_WASTE_CALENDAR_ID);

        assert_eq!(buckets.today.len(), 2);
        assert_eq!(buckets.upcoming.len(), 1);
        assert_eq!(buckets.upcoming[0].summary, "Next midnight");
    }

    #[test]
    fn test_past_events_are_dropped() {
        let events = vec![
            event("Yesterday", "2024-06-08T10:00:00", "calendar.family"),
            event("Last year", "2023-06-09T10:00:00", "calendar.family"),
        ];
        let buckets = classify(&events, &now(), DEFAULT_WASTE_CALENDAR_ID);

        assert!(buckets.today.is_empty());
        assert!(buckets.upcoming.is_empty());
        assert!(buckets.waste.is_empty());
    }

    #[test]
    fn test_unparseable_start_is_dropped() {
        let events = vec![event("Broken", "not-a-date", "calendar.family")];
        let buckets = classify(&events, &now(), DEFAULT_WASTE_CALENDAR_ID);
        assert_eq!(buckets, Buckets::default());
    }

    #[test]
    fn test_source_order_preserved_and_idempotent() {
        let events = vec![
            event("B", "2024-06-11T09:00:00", "calendar.family"),
            event("A", "2024-06-10T09:00:00", "calendar.family"),
            event("C", "2024-06-12T09:00:00", "calendar.family"),
        ];
        let first = classify(&events, &now(), DEFAULT_WASTE_CALENDAR_ID);
        let second = classify(&events, &now(), DEFAULT_WASTE_CALENDAR_ID);

        let order: Vec<&str> = first.upcoming.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bin_cycles_scenario() {
        // Trash pickup tomorrow, viewed the evening before
        let events = vec![event(
            "Trash",
            "2024-06-10T00:00:00",
            DEFAULT_WASTE_CALENDAR_ID,
        )];
        let buckets = classify(&events, &now(), DEFAULT_WASTE_CALENDAR_ID);

        assert_eq!(buckets.waste.len(), 1);
        assert_eq!(buckets.waste[0].summary, "Trash");
        assert!(buckets.today.is_empty());
        assert!(buckets.upcoming.is_empty());
    }
}
