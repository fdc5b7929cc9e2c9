mod components;
mod config;
mod error;
mod shutdown;
mod startup;
mod surface;
mod utils;

use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting homeboard");

    // Load configuration
    let config = startup::load_config().await?;

    // Run the dashboard widgets
    startup::run(config).await
}
