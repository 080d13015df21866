use item_recommender_api::{app::Application, config::Config, error::Result};
use log::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "item_recommender_api=info,actix_web=info";

/// Installs the global subscriber; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::load()?;
    info!(
        "Configured for {}:{} with model '{}', returning top {}",
        config.host, config.port, config.model, config.top_n
    );

    // A model that fails to load ends the process here, before the port is bound
    Application::new(&config).run().await
}
