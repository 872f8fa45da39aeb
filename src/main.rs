use std::sync::Arc;

mod app;
mod auth;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod services;
mod wellness;

use auth::rate_limit::RateLimitState;
use config::Config;
use db::Stores;
use services::suggester::SuggestionSource;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stores: Stores,
    pub suggester: Arc<dyn SuggestionSource>,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(config: Arc<Config>, stores: Stores) -> Self {
        Self {
            suggester: services::suggester::from_mode(config.suggestion_mode),
            rate_limiter: RateLimitState::new(
                config.auth_rate_limit_max,
                config.auth_rate_limit_window_secs,
            ),
            config,
            stores,
        }
    }

    #[cfg(test)]
    pub fn for_tests(stores: Stores) -> Self {
        Self::new(Arc::new(Config::for_tests()), stores)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "health_whisperer_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());
    tracing::info!(
        storage = config.storage_backend.as_str(),
        suggestion_mode = ?config.suggestion_mode,
        "Configuration loaded"
    );

    let stores = Stores::open(&config).await?;
    let state = AppState::new(config.clone(), stores);

    // Prune idle rate limiter entries once per window
    auth::rate_limit::spawn_cleanup_worker(state.rate_limiter.clone());

    let app = app::build_app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    // Client IP is needed for rate limiting
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
