use super::classify::{classify, Bucket};
use super::client::EventsClient;
use super::render;
use crate::config::Config;
use crate::error::{component_error, BoardResult};
use crate::surface::{self, Surface, SurfaceRegistry};
use crate::utils::time::query_window;
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{interval, sleep};
use tracing::{error, info, warn};

/// Render targets of the feed. The waste surface is optional; pages
/// without one simply never show bin days.
#[derive(Debug, Clone)]
pub struct FeedSurfaces {
    pub today: Surface,
    pub upcoming: Surface,
    pub waste: Option<Surface>,
}

/// Drives the polling loop and owns bucket classification.
///
/// One instance is constructed per page load and lives until shutdown.
/// Every fetch cycle's failure is contained here and surfaced only as
/// rendered text; nothing propagates to the timer.
#[derive(Debug, Clone)]
pub struct EventFeedController {
    config: Arc<RwLock<Config>>,
    client: EventsClient,
    surfaces: FeedSurfaces,
    tz: Tz,
    // Generation of the newest started cycle. A cycle that is no longer
    // the newest must not write to the surfaces (stale renders are
    // discarded instead of last-write-wins).
    generation: Arc<AtomicU64>,
}

impl EventFeedController {
    /// Resolve the feed's surfaces and build a controller.
    ///
    /// Waits for the required `today` and `upcoming` surfaces with
    /// unbounded retries; the page may still be building when the widget
    /// starts. The waste surface is taken if present.
    pub async fn start(
        registry: SurfaceRegistry,
        config: Arc<RwLock<Config>>,
    ) -> BoardResult<Self> {
        let (api_url, retry_millis, tz) = {
            let config_read = config.read().await;
            (
                config_read.events_api_url.clone(),
                config_read.surface_retry_millis,
                config_read.tz()?,
            )
        };

        let resolved = surface::resolve(
            &registry,
            &[surface::TODAY, surface::UPCOMING],
            Duration::from_millis(retry_millis),
        )
        .await;
        let mut resolved = resolved.into_iter();
        let today = resolved
            .next()
            .ok_or_else(|| component_error("Surface resolution returned too few surfaces"))?;
        let upcoming = resolved
            .next()
            .ok_or_else(|| component_error("Surface resolution returned too few surfaces"))?;
        let waste = registry.get(surface::WASTE).await;
        if waste.is_none() {
            info!("Waste surface absent, bin days will not be rendered");
        }

        Ok(Self {
            config,
            client: EventsClient::new(&api_url),
            surfaces: FeedSurfaces {
                today,
                upcoming,
                waste,
            },
            tz,
            generation: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run the polling loop: one immediate fetch, then an unconditional
    /// re-fetch every poll interval. Never returns.
    pub async fn run(self) {
        let period = {
            let config_read = self.config.read().await;
            Duration::from_secs(config_read.poll_interval_secs)
        };
        info!("Event feed polling every {:?}", period);

        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// One fetch cycle. On a not-found response, schedules exactly one
    /// retry after a short delay; the retry itself does not chain.
    pub async fn run_cycle(&self) {
        match self.fetch_and_render().await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                let delay = {
                    let config_read = self.config.read().await;
                    Duration::from_secs(config_read.not_found_retry_secs)
                };
                info!("Events endpoint not ready, retrying in {:?}", delay);
                let controller = self.clone();
                tokio::spawn(async move {
                    sleep(delay).await;
                    if let Err(e) = controller.fetch_and_render().await {
                        warn!("Retry after not-found failed: {}", e);
                    }
                });
            }
            Err(_) => {
                // Other failures wait for the next regular cycle
            }
        }
    }

    /// Fetch the current window and render all three buckets.
    ///
    /// Failures are rendered as per-surface error text before being
    /// returned for taxonomy inspection by the caller.
    async fn fetch_and_render(&self) -> BoardResult<()> {
        let cycle = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (limit, lookahead, waste_calendar_id) = {
            let config_read = self.config.read().await;
            (
                config_read.event_limit,
                config_read.lookahead_days,
                config_read.waste_calendar_id.clone(),
            )
        };

        self.surfaces.today.set_loading().await;
        self.surfaces.upcoming.set_loading().await;
        if let Some(waste) = &self.surfaces.waste {
            waste.set_loading().await;
        }

        let now = Utc::now().with_timezone(&self.tz);
        let (start_date, end_date) = query_window(&now, lookahead);

        match self.client.fetch_window(&start_date, &end_date, limit).await {
            Ok(events) => {
                if !self.is_latest(cycle) {
                    return Ok(());
                }

                let buckets = classify(&events, &now, &waste_calendar_id);
                info!(
                    today = buckets.today.len(),
                    upcoming = buckets.upcoming.len(),
                    waste = buckets.waste.len(),
                    "Rendered calendar events"
                );

                self.surfaces
                    .today
                    .set_content(render::render_list(&buckets.today, Bucket::Today))
                    .await;
                self.surfaces
                    .upcoming
                    .set_content(render::render_list(&buckets.upcoming, Bucket::Upcoming))
                    .await;
                if let Some(waste) = &self.surfaces.waste {
                    waste
                        .set_content(render::render_list(&buckets.waste, Bucket::Waste))
                        .await;
                }
                Ok(())
            }
            Err(e) => {
                error!("Failed to load calendar events: {}", e);
                if self.is_latest(cycle) {
                    self.surfaces
                        .today
                        .set_error(render::error_today(&e.to_string()))
                        .await;
                    self.surfaces
                        .upcoming
                        .set_error(render::ERROR_UPCOMING.to_string())
                        .await;
                    if let Some(waste) = &self.surfaces.waste {
                        waste.set_error(render::ERROR_WASTE.to_string()).await;
                    }
                }
                Err(e)
            }
        }
    }

    fn is_latest(&self, cycle: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == cycle
    }
}
