use std::env;
use std::error::Error;

use playrent_pricing::api::{AppState, create_router};
use playrent_pricing::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;

const DEFAULT_CONFIG_DIR: &str = "./config/playrent";
const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("PLAYRENT_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind = env::var("PLAYRENT_BIND").unwrap_or_else(|_| DEFAULT_BIND.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        path = %config_dir,
        fields = config.fields().len(),
        currency = %config.pricing().currency,
        "loaded pricing config"
    );

    let router = create_router(AppState::new(config));
    let listener = TcpListener::bind(&bind).await?;
    info!(addr = %bind, "playrent-pricing listening");

    axum::serve(listener, router).await?;
    Ok(())
}
