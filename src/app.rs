use axum::{
    http::{header, HeaderValue, Method, Request, Response},
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::Config;
use crate::{auth, handlers, AppState};

pub fn build_app(state: AppState) -> Router {
    // Auth routes with rate limiting
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .route("/api/auth/guest", post(handlers::auth::guest))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/api/analyze/mood", post(handlers::analyze::analyze_mood))
        .route("/api/analyze/food", post(handlers::analyze::analyze_food))
        .merge(auth_routes);

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        // Check-ins
        .route(
            "/api/check-ins",
            post(handlers::check_ins::create_check_in).get(handlers::check_ins::list_check_ins),
        )
        .route(
            "/api/check-ins/latest",
            get(handlers::check_ins::latest_check_in),
        )
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        // Food logs
        .route(
            "/api/food-logs",
            post(handlers::food_logs::upsert_food_log).get(handlers::food_logs::list_food_logs),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri(),
                        user_id = tracing::field::Empty
                    )
                })
                .on_response(|res: &Response<_>, latency: Duration, _span: &Span| {
                    let status = res.status();
                    if status.is_server_error() {
                        tracing::error!(%status, latency_ms = latency.as_millis() as u64, "response");
                    } else {
                        tracing::info!(%status, latency_ms = latency.as_millis() as u64, "response");
                    }
                }),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
