//! NGO endpoints.

use aaharsetu_common::AppResult;
use aaharsetu_core::{CreateRequestInput, DonationView, RegisterNgoInput};
use aaharsetu_db::entities::{donation_request, ngo_profile};
use axum::{
    Json, Router,
    extract::{Path, State},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    extractors::{AppJson, AuthUser},
    middleware::{AppState, NGO, require_roles},
    response::ApiResponse,
};

/// Submit the organisation profile for review.
async fn register(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterNgoInput>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let profile: ngo_profile::Model = state.registration_service.register_ngo(&user, input).await?;

    Ok(ApiResponse::created(json!({
        "message": "NGO registered successfully!",
        "ngo": profile,
    })))
}

/// Donations awaiting NGO approval.
async fn pending(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DonationView>>> {
    let donations = state.donation_service.list_pending().await?;
    Ok(Json(donations.into_iter().map(DonationView::from).collect()))
}

/// Donations the caller approved.
async fn approved(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DonationView>>> {
    let donations = state.donation_service.list_approved_by(&user.id).await?;
    Ok(Json(donations.into_iter().map(DonationView::from).collect()))
}

async fn accept(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let donation = state.donation_service.approve_by_ngo(&id, &user.id).await?;

    Ok(ApiResponse::ok(json!({
        "message": "Donation approved",
        "donation": DonationView::from(donation),
    })))
}

async fn reject(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let donation = state.donation_service.reject(&id, &user.id).await?;

    Ok(ApiResponse::ok(json!({
        "message": "Donation rejected",
        "donation": DonationView::from(donation),
    })))
}

/// Issue a standing request for food.
async fn request_donation(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRequestInput>,
) -> AppResult<ApiResponse<donation_request::Model>> {
    let request = state.request_service.create(&user, input).await?;
    Ok(ApiResponse::created(request))
}

/// Requests issued by the caller.
async fn my_requests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<donation_request::Model>>> {
    let requests = state.request_service.list_by_requester(&user.id).await?;
    Ok(Json(requests))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/requests", get(pending))
        .route("/approved", get(approved))
        .route("/requests/{id}/accept", post(accept))
        .route("/requests/{id}/reject", post(reject))
        .route("/request-donation", post(request_donation))
        .route("/my-requests", get(my_requests))
        .route_layer(from_fn_with_state(NGO, require_roles))
}
