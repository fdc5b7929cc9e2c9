//! Pure formatting of event buckets into markup fragments. No network, no
//! timers; the controller decides what to render where.

use super::classify::Bucket;
use super::models::CalendarEvent;
use crate::utils::time::parse_event_stamp;

/// Per-surface error texts, plain strings for `Surface::set_error`
pub const ERROR_UPCOMING: &str = "Unable to load upcoming events";
pub const ERROR_WASTE: &str = "Unable to load bin days";

pub fn error_today(detail: &str) -> String {
    format!("Unable to load calendar events: {}", detail)
}

/// Placeholder for a bucket with no events
pub fn render_empty(kind: Bucket) -> String {
    let text = match kind {
        Bucket::Today => "No events today",
        Bucket::Upcoming => "No upcoming events",
        Bucket::Waste => "No collections scheduled",
    };
    format!("<p>{}</p>", text)
}

/// Render a bucket's events as an ordered list fragment.
///
/// Today events show a clock-time range only, upcoming events add the
/// calendar date, waste events are date-granular and show the date alone.
/// A start equal to its end renders as "All Day".
pub fn render_list(events: &[CalendarEvent], kind: Bucket) -> String {
    if events.is_empty() {
        return render_empty(kind);
    }

    let mut html = String::from("<ul class=\"calendar-events\">");
    for event in events {
        let start_time = format_event_time(&event.start);
        let end_time = format_event_time(&event.end);
        let event_date = format_event_date(&event.start);

        let time_line = if kind == Bucket::Waste {
            event_date.clone()
        } else if start_time == end_time {
            String::from("All Day")
        } else {
            format!("{} - {}", start_time, end_time)
        };

        html.push_str("<li class=\"calendar-event\">");
        html.push_str("<div class=\"event-pre\"></div>");
        html.push_str("<div class=\"event-content\">");
        html.push_str(&format!(
            "<div class=\"event-summary\">{}</div>",
            event.summary
        ));
        html.push_str(&format!("<div class=\"event-time\">{}</div>", time_line));
        if kind == Bucket::Upcoming {
            html.push_str(&format!("<div class=\"event-date\">{}</div>", event_date));
        }
        html.push_str("</div></li>");
    }
    html.push_str("</ul>");

    html
}

/// Locale-style clock time, falling back to the raw stamp when it does
/// not parse
fn format_event_time(stamp: &str) -> String {
    match parse_event_stamp(stamp) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => stamp.to_string(),
    }
}

/// Short weekday, short month and day, e.g. "Mon Jun 10"
fn format_event_date(stamp: &str) -> String {
    match parse_event_stamp(stamp) {
        Some(dt) => dt.format("%a %b %-d").to_string(),
        None => stamp.to_string(),
    }
}
