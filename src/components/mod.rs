use crate::config::Config;
use crate::error::BoardResult;
use crate::surface::SurfaceRegistry;
use async_trait::async_trait;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

// Export components
pub mod event_feed;
pub mod greeting;

// Re-export the feed controller
pub use event_feed::EventFeedController;

/// Component trait that all dashboard widgets implement
#[async_trait]
pub trait Component: Send + Sync + Any {
    /// Get the name of the component
    fn name(&self) -> &'static str;

    /// Initialize the component against the page's surfaces
    async fn init(
        &self,
        registry: &SurfaceRegistry,
        config: Arc<RwLock<Config>>,
    ) -> BoardResult<()>;

    /// Shutdown the component
    async fn shutdown(&self) -> BoardResult<()>;

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Manager for all components
pub struct ComponentManager {
    components: Vec<Box<dyn Component>>,
    config: Arc<RwLock<Config>>,
}

impl fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentManager")
            .field("component_count", &self.components.len())
            .finish()
    }
}

impl ComponentManager {
    /// Create a new component manager
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            components: Vec::new(),
            config,
        }
    }

    /// Register a component
    pub fn register<T: Component + 'static>(&mut self, component: T) {
        info!("Registering component: {}", component.name());
        self.components.push(Box::new(component));
    }

    /// Initialize all registered and enabled components
    pub async fn init_all(&self, registry: &SurfaceRegistry) -> BoardResult<()> {
        let enabled: Vec<bool> = {
            let config_read = self.config.read().await;
            self.components
                .iter()
                .map(|c| config_read.is_component_enabled(c.name()))
                .collect()
        };

        for (component, enabled) in self.components.iter().zip(enabled) {
            if !enabled {
                info!("Component {} disabled, skipping", component.name());
                continue;
            }
            info!("Initializing component: {}", component.name());

            if let Err(e) = component.init(registry, Arc::clone(&self.config)).await {
                // Log error but continue with other components
                tracing::error!("Error initializing component {}: {:?}", component.name(), e);
            }
        }

        Ok(())
    }

    /// Shutdown all components
    pub async fn shutdown_all(&self) -> BoardResult<()> {
        info!("Shutting down all components");

        for component in &self.components {
            info!("Shutting down component: {}", component.name());

            if let Err(e) = component.shutdown().await {
                // Log error but continue with other components
                tracing::error!(
                    "Error shutting down component {}: {:?}",
                    component.name(),
                    e
                );
            }
        }

        Ok(())
    }

    /// Get a component by name
    #[allow(dead_code)]
    pub fn get_component_by_name(&self, name: &str) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }
}
