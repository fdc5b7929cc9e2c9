use serde::{Deserialize, Serialize};

/// One calendar event as delivered by the events API. Timestamps stay as
/// strings on the wire and are parsed on use; no identity beyond the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub calendar_id: String,
}

/// Response body of the events query. A populated `error` field in an
/// otherwise successful response is treated as a failed fetch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
