use super::models::{CalendarEvent, EventsResponse};
use crate::error::{BoardResult, Error};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Path of the events query on the API host
const EVENTS_PATH: &str = "/api/calendar/events";

/// Client for the calendar events API
#[derive(Debug, Clone)]
pub struct EventsClient {
    client: Client,
    base_url: String,
}

impl EventsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch events for a calendar-date window, capped at `limit` results.
    ///
    /// Failure covers transport errors, non-success statuses and an `error`
    /// field embedded in a successful response body.
    pub async fn fetch_window(
        &self,
        start_date: &str,
        end_date: &str,
        limit: u32,
    ) -> BoardResult<Vec<CalendarEvent>> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, EVENTS_PATH))
            .map_err(|e| Error::Transport(format!("Failed to parse URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("start_date", start_date)
            .append_pair("end_date", end_date)
            .append_pair("limit", &limit.to_string());

        debug!("Fetching calendar events: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to fetch events: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body: EventsResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Failed to parse events response: {}", e)))?;

        if let Some(error) = body.error {
            if !error.is_empty() {
                return Err(Error::Payload(error));
            }
        }

        Ok(body.events)
    }
}
