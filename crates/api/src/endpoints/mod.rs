//! API endpoints.

mod admin;
mod auth;
mod donations;
mod donors;
mod health;
mod ngos;
mod recommend;
mod volunteers;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(recommend::router())
        .nest("/api/auth", auth::router())
        .nest("/api/donors", donors::router())
        .nest("/api/ngos", ngos::router())
        .nest("/api/volunteers", volunteers::router())
        .nest("/donations", donations::router())
        .nest("/admin", admin::router())
}
