//! Volunteer endpoints.

use aaharsetu_common::AppResult;
use aaharsetu_core::{
    DonationView, LeaderboardEntry, RegisterVolunteerInput, VolunteerBoard, VolunteerSummary,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, header},
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    extractors::{AppJson, AuthUser},
    middleware::{AppState, VOLUNTEER, require_roles},
    response::ApiResponse,
};

/// Public volunteer directory.
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<VolunteerSummary>>> {
    let volunteers = state.registration_service.list_volunteer_summaries().await?;
    Ok(Json(volunteers))
}

async fn leaderboard(State(state): State<AppState>) -> AppResult<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.donation_service.leaderboard().await?))
}

async fn register(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterVolunteerInput>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let profile = state
        .registration_service
        .register_volunteer(&user, input)
        .await?;

    Ok(ApiResponse::created(json!({
        "message": "Volunteer registered successfully!",
        "volunteer": profile,
    })))
}

/// Claimable donations plus the caller's deliveries in progress.
async fn approved_donations(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<VolunteerBoard>> {
    Ok(Json(state.donation_service.volunteer_board(&user.id).await?))
}

async fn claim(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(donation_id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let donation = state.donation_service.claim(&donation_id, &user.id).await?;

    Ok(ApiResponse::ok(json!({
        "message": "Donation claimed successfully",
        "donation": DonationView::from(donation),
    })))
}

async fn active_deliveries(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DonationView>>> {
    let donations = state.donation_service.active_deliveries(&user.id).await?;
    Ok(Json(donations.into_iter().map(DonationView::from).collect()))
}

async fn complete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(donation_id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let donation = state
        .donation_service
        .complete(&donation_id, &user.id)
        .await?;

    Ok(ApiResponse::ok(json!({
        "message": "Delivery completed successfully",
        "donation": DonationView::from(donation),
    })))
}

/// Certificate PDF in the volunteer's registered name.
async fn certificate(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let name = state
        .registration_service
        .volunteer_profile_of(&user.id)
        .await?
        .map_or_else(|| user.name.clone(), |profile| profile.full_name);

    let pdf = state.certificate_service.issue(&user.id, &name).await?;

    let mut response = pdf.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"certificate.pdf\""),
    );

    Ok(response)
}

pub fn router() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list))
        .route("/leaderboard", get(leaderboard));

    let volunteer = Router::new()
        .route("/register", post(register))
        .route("/approved-donations", get(approved_donations))
        .route("/claim/{donation_id}", post(claim))
        .route("/active-deliveries", get(active_deliveries))
        .route("/complete/{donation_id}", post(complete))
        .route("/certificate", post(certificate))
        .route_layer(from_fn_with_state(VOLUNTEER, require_roles));

    public.merge(volunteer)
}
