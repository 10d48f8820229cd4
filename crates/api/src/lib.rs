//! HTTP API layer for AaharSetu.
//!
//! This crate provides the REST surface of the platform:
//!
//! - **Endpoints**: role-scoped routers for donors, NGOs, volunteers and admins
//! - **Extractors**: session user and JSON body extraction
//! - **Middleware**: session resolution and the role guard
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

use axum::Router;

pub use endpoints::router;
pub use middleware::{AppState, SessionCookie};

/// Router with session resolution applied, ready to serve.
pub fn app(state: AppState) -> Router {
    router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ))
        .with_state(state)
}
