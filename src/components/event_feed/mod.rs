pub mod classify;
pub mod client;
pub mod controller;
pub mod models;
pub mod render;

pub use controller::EventFeedController;
pub use models::CalendarEvent;

use crate::config::Config;
use crate::error::BoardResult;
use crate::surface::SurfaceRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::error;

/// Calendar event feed component: polls the events API and renders the
/// today/upcoming/waste surfaces
#[derive(Default)]
pub struct EventFeed {
    task: RwLock<Option<JoinHandle<()>>>,
}

impl EventFeed {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl super::Component for EventFeed {
    fn name(&self) -> &'static str {
        "event_feed"
    }

    async fn init(
        &self,
        registry: &SurfaceRegistry,
        config: Arc<RwLock<Config>>,
    ) -> BoardResult<()> {
        let registry = registry.clone();
        let task = tokio::spawn(async move {
            match EventFeedController::start(registry, config).await {
                Ok(controller) => controller.run().await,
                Err(e) => error!("Event feed failed to start: {:?}", e),
            }
        });
        *self.task.write().await = Some(task);
        Ok(())
    }

    async fn shutdown(&self) -> BoardResult<()> {
        if let Some(task) = self.task.write().await.take() {
            task.abort();
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
