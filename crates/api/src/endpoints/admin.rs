//! Admin endpoints.

use aaharsetu_common::AppResult;
use aaharsetu_core::{DonationView, ReviewDecision};
use aaharsetu_db::entities::{ngo_profile, volunteer_profile};
use axum::{
    Json, Router,
    extract::{Path, State},
    middleware::from_fn_with_state,
    routing::{get, put},
};
use serde_json::json;

use crate::{
    extractors::AuthUser,
    middleware::{ADMIN, AppState, require_roles},
    response::ApiResponse,
};

async fn list_ngos(State(state): State<AppState>) -> AppResult<Json<Vec<ngo_profile::Model>>> {
    Ok(Json(state.registration_service.list_ngos().await?))
}

async fn get_ngo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ngo_profile::Model>> {
    Ok(Json(state.registration_service.get_ngo(&id).await?))
}

async fn list_volunteers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<volunteer_profile::Model>>> {
    Ok(Json(state.registration_service.list_volunteers().await?))
}

async fn list_donations(State(state): State<AppState>) -> AppResult<Json<Vec<DonationView>>> {
    let donations = state.donation_service.list_all().await?;
    Ok(Json(donations.into_iter().map(DonationView::from).collect()))
}

async fn approve_donation(
    AuthUser(admin): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let donation = state.donation_service.approve_by_admin(&id, &admin.id).await?;

    Ok(ApiResponse::ok(json!({
        "message": "Donation approved",
        "donation": DonationView::from(donation),
    })))
}

async fn reject_donation(
    AuthUser(admin): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let donation = state.donation_service.reject(&id, &admin.id).await?;

    Ok(ApiResponse::ok(json!({
        "message": "Donation rejected",
        "donation": DonationView::from(donation),
    })))
}

async fn review_ngo(
    admin: &AuthUser,
    state: &AppState,
    id: &str,
    decision: ReviewDecision,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let profile = state
        .registration_service
        .review_ngo(id, decision, &admin.0)
        .await?;

    Ok(ApiResponse::ok(json!({
        "message": format!("NGO {}", profile.status.as_str()),
        "ngo": profile,
    })))
}

async fn approve_ngo(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    review_ngo(&admin, &state, &id, ReviewDecision::Approve).await
}

async fn reject_ngo(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    review_ngo(&admin, &state, &id, ReviewDecision::Reject).await
}

async fn review_volunteer(
    admin: &AuthUser,
    state: &AppState,
    id: &str,
    decision: ReviewDecision,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let profile = state
        .registration_service
        .review_volunteer(id, decision, &admin.0)
        .await?;

    Ok(ApiResponse::ok(json!({
        "message": format!("Volunteer {}", profile.status.as_str()),
        "volunteer": profile,
    })))
}

async fn approve_volunteer(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    review_volunteer(&admin, &state, &id, ReviewDecision::Approve).await
}

async fn reject_volunteer(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    review_volunteer(&admin, &state, &id, ReviewDecision::Reject).await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ngo", get(list_ngos))
        .route("/ngo/{id}", get(get_ngo))
        .route("/ngo/{id}/approve", put(approve_ngo))
        .route("/ngo/{id}/reject", put(reject_ngo))
        .route("/volunteer", get(list_volunteers))
        .route("/volunteer/{id}/approve", put(approve_volunteer))
        .route("/volunteer/{id}/reject", put(reject_volunteer))
        .route("/donation", get(list_donations))
        .route("/donation/{id}/approve", put(approve_donation))
        .route("/donation/{id}/reject", put(reject_donation))
        .route_layer(from_fn_with_state(ADMIN, require_roles))
}
