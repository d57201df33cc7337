pub mod celebrations;
pub mod error;
pub mod health;
pub mod state;
pub mod wishes;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::{AppState, AppStateInner};

/// Path prefix the REST surface is mounted under.
pub const API_PREFIX: &str = "/api";

/// Full application router: the REST routes nested under [`API_PREFIX`],
/// with permissive CORS (browsers call it cross-origin) and request tracing.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/celebrations", post(celebrations::create_celebration))
        .route("/celebrations/{id}", get(celebrations::get_celebration))
        .route("/wishes", post(wishes::add_wish))
        .route("/wishes/{celebration_id}", get(wishes::list_wishes))
        .route("/health", get(health::health))
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
