//! Authentication endpoints.

use aaharsetu_common::AppResult;
use aaharsetu_core::{LoginInput, RegisterInput};
use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::info;

use crate::{
    extractors::{AppJson, AuthUser},
    middleware::{AppState, SessionCookie, session_token},
    response::ApiResponse,
};

/// Create a new account.
async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterInput>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let user = state.user_service.register(input).await?;

    Ok(ApiResponse::created(json!({
        "message": "User registered successfully",
        "user": user,
    })))
}

/// Log in and start a session.
async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginInput>,
) -> AppResult<Response> {
    let user = state.user_service.authenticate(&input).await?;
    let token = state.session_service.create(&user).await?;

    let mut response = ApiResponse::ok(json!({
        "message": "Login successful",
        "user": user,
    }))
    .into_response();
    SessionCookie::attach(&mut response, &state.session_cookie.issue(&token));

    Ok(response)
}

/// End the current session. Succeeds without a session too.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    if let Some(token) = session_token(&headers, &state.session_cookie.name) {
        state.session_service.destroy(&token).await?;
        info!("User logged out");
    }

    let mut response = ApiResponse::ok(json!({ "message": "Logged out successfully" })).into_response();
    SessionCookie::attach(&mut response, &state.session_cookie.clear());

    Ok(response)
}

/// Current session user.
async fn me(AuthUser(user): AuthUser) -> ApiResponse<serde_json::Value> {
    ApiResponse::ok(json!({ "user": user }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
