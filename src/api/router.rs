use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_auth;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes, no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Protected API routes, Bearer token required when API_TOKEN is set
    let protected = Router::new()
        // Calendar
        .route("/api/calendar/month", get(handlers::calendar::month))
        .route("/api/calendar/week", get(handlers::calendar::week))
        .route("/api/calendar/day/:date", get(handlers::calendar::day))
        .route("/api/calendar/holidays", get(handlers::calendar::holidays))
        // Screener
        .route("/api/screener", post(handlers::screener::search))
        // Stock detail
        .route("/api/stocks/:symbol", get(handlers::stocks::detail))
        .route("/api/stocks/:symbol/similar", get(handlers::stocks::similar))
        .route("/api/stocks/:symbol/history", get(handlers::stocks::history))
        // Rankings and comparison
        .route("/api/rankings", get(handlers::rankings::list))
        .route("/api/compare", get(handlers::compare::compare))
        // Portfolio
        .route(
            "/api/portfolio/:user_id",
            get(handlers::portfolio::list).post(handlers::portfolio::create),
        )
        .route(
            "/api/portfolio/:user_id/:id",
            put(handlers::portfolio::update).delete(handlers::portfolio::remove),
        )
        .route("/api/portfolio/:user_id/:id/favorite", post(handlers::portfolio::favorite))
        // Cross-view events
        .route("/api/events/open-detail", post(handlers::events::open_detail))
        // WebSocket
        .route("/ws", get(handlers::ws::handler))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
