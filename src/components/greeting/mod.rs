use crate::config::Config;
use crate::error::BoardResult;
use crate::surface::{self, SurfaceRegistry};
use async_trait::async_trait;
use chrono::{Timelike, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Pick the greeting text for a local hour of day
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if (5..12).contains(&hour) {
        "Good Morning"
    } else if (12..18).contains(&hour) {
        "Good Afternoon"
    } else if (18..22).contains(&hour) {
        "Good Evening"
    } else {
        "Good Night"
    }
}

/// Topbar greeting widget: prepends a time-of-day heading into the topbar
/// surface on page load. Purely presentational, no network, no timers.
#[derive(Default)]
pub struct Greeting;

impl Greeting {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl super::Component for Greeting {
    fn name(&self) -> &'static str {
        "greeting"
    }

    async fn init(
        &self,
        registry: &SurfaceRegistry,
        config: Arc<RwLock<Config>>,
    ) -> BoardResult<()> {
        let tz = {
            let config_read = config.read().await;
            config_read.tz()?
        };

        let Some(topbar) = registry.get(surface::TOPBAR).await else {
            error!("Topbar surface not found, skipping greeting");
            return Ok(());
        };

        let hour = Utc::now().with_timezone(&tz).hour();
        let greeting = greeting_for_hour(hour);
        info!("Greeting set to \"{}\"", greeting);

        topbar
            .prepend(&format!(
                "<h1 class=\"topbar-greeting\">{}</h1>",
                greeting
            ))
            .await;

        Ok(())
    }

    async fn shutdown(&self) -> BoardResult<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(4), "Good Night");
        assert_eq!(greeting_for_hour(5), "Good Morning");
        assert_eq!(greeting_for_hour(11), "Good Morning");
        assert_eq!(greeting_for_hour(12), "Good Afternoon");
        assert_eq!(greeting_for_hour(17), "Good Afternoon");
        assert_eq!(greeting_for_hour(18), "Good Evening");
        assert_eq!(greeting_for_hour(21), "Good Evening");
        assert_eq!(greeting_for_hour(22), "Good Night");
        assert_eq!(greeting_for_hour(0), "Good Night");
    }
}
