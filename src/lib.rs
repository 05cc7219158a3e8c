//! Side-by-side replay of recorded GPS activities on a shared race clock.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod strava;
pub mod types;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Every API route, with the shared layers applied.
pub fn app(state: state::AppState) -> Router {
    let max_file_size = state.config().max_file_size;

    Router::new()
        .merge(routes::health::router())
        .merge(routes::upload::router())
        .merge(routes::strava::router())
        .merge(routes::activities::router())
        .merge(routes::races::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
