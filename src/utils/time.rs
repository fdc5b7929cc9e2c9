use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};

/// Parse an event timestamp as delivered by the events API.
///
/// The API sends either a full datetime (with or without a UTC offset) or a
/// bare calendar date for date-granular entries. Offset-carrying stamps are
/// converted to their local wall-clock reading; comparisons downstream are
/// all against local day boundaries.
pub fn parse_event_stamp(stamp: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(stamp) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(stamp, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

/// Start of the current day in the given timezone, as naive local time
pub fn start_of_today<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDateTime {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| now.naive_local())
}

/// Start of the next day in the given timezone, as naive local time
pub fn start_of_tomorrow<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDateTime {
    start_of_today(now) + Duration::days(1)
}

/// Query window for a fetch cycle: [today, today + lookahead] as
/// calendar-date strings (no time component).
pub fn query_window<Tz: TimeZone>(now: &DateTime<Tz>, lookahead_days: i64) -> (String, String) {
    let today = now.date_naive();
    let end = today
        .checked_add_signed(Duration::days(lookahead_days))
        .unwrap_or(today);

    // Format dates as YYYY-MM-DD
    let start_date = today.format("%Y-%m-%d").to_string();
    let end_date = end.format("%Y-%m-%d").to_string();

    (start_date, end_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::Tz;

    #[test]
    fn test_parse_event_stamp() {
        // Plain local datetime
        let dt = parse_event_stamp("2024-06-10T14:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-06-10 14:30");

        // Offset-carrying datetime keeps its local reading
        let dt = parse_event_stamp("2024-06-10T14:30:00+02:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-06-10 14:30");

        // Bare date becomes midnight
        let dt = parse_event_stamp("2024-06-10").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-06-10 00:00");

        // Garbage
        assert_eq!(parse_event_stamp("not a date"), None);
        assert_eq!(parse_event_stamp(""), None);
    }

    #[test]
    fn test_day_boundaries() {
        let now = Utc.with_ymd_and_hms(2024, 6, 9, 16, 45, 12).unwrap();
        assert_eq!(
            start_of_today(&now).format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-06-09 00:00:00"
        );
        assert_eq!(
            start_of_tomorrow(&now)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            "2024-06-10 00:00:00"
        );
    }

    #[test]
    fn test_query_window() {
        let tz: Tz = "Europe/London".parse().unwrap();
        let now = tz.with_ymd_and_hms(2024, 6, 9, 23, 59, 0).unwrap();
        let (start, end) = query_window(&now, 7);
        assert_eq!(start, "2024-06-09");
        assert_eq!(end, "2024-06-16");
    }

    #[test]
    fn test_query_window_crosses_month_end() {
        let now = Utc.with_ymd_and_hms(2024, 1, 29, 8, 0, 0).unwrap();
        let (start, end) = query_window(&now, 7);
        assert_eq!(start, "2024-01-29");
        assert_eq!(end, "2024-02-05");
    }
}
