use crate::components::{event_feed::EventFeed, greeting::Greeting, ComponentManager};
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use crate::surface::{self, SurfaceRegistry};
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire up surfaces and widgets, then run until a termination signal
pub async fn run(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let registry = SurfaceRegistry::new();

    // Register widgets
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    component_manager.register(Greeting::new());
    component_manager.register(EventFeed::new());
    let component_manager = Arc::new(component_manager);

    // Start widgets first; they tolerate surfaces appearing later, the
    // same race a page has between script start and layout build
    component_manager.init_all(&registry).await?;

    // Build the page layout: the mount points widgets render into
    registry.register(surface::TOPBAR).await;
    registry.register(surface::TODAY).await;
    registry.register(surface::UPCOMING).await;
    registry.register(surface::WASTE).await;
    info!("Surfaces registered");

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_components = Arc::clone(&component_manager);
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components).await;
    });

    // Run until the signal handler reports completion
    let _ = shutdown_recv.await;
    info!("Shutdown complete");

    Ok(())
}
