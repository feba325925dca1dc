//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. CORS is permissive: the server binds
//! to loopback and serves the local web client.

use axum::routing::{delete, get, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the application router.
pub fn app_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/dashboard", get(endpoints::home::dashboard))
        .route(
            "/reminders",
            get(endpoints::reminders::list).post(endpoints::reminders::create),
        )
        .route("/reminders/:id", delete(endpoints::reminders::remove))
        .route(
            "/reminders/:id/completion",
            axum::routing::post(endpoints::reminders::set_completion),
        )
        .route("/streaks", get(endpoints::streaks::list))
        .route("/streaks/:category/goal", put(endpoints::streaks::update_goal))
        .route(
            "/prescriptions",
            get(endpoints::prescriptions::list).post(endpoints::prescriptions::create),
        )
        .route(
            "/prescriptions/:id",
            delete(endpoints::prescriptions::remove),
        )
        .route(
            "/health-logs",
            get(endpoints::progress::list).post(endpoints::progress::create),
        )
        .route("/health-logs/trend", get(endpoints::progress::trend))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
