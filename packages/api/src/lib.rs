use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

pub fn app(state: AppState) -> Router {
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::auth::routes())
        .merge(routes::user::routes())
        .merge(routes::games::routes())
        .merge(routes::highscores::routes())
        .layer(cors)
        .with_state(state)
}
