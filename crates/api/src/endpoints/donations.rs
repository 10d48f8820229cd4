//! Donor endpoints.

use aaharsetu_common::AppResult;
use aaharsetu_core::{CreateDonationInput, CreateRequestInput, DonationView};
use aaharsetu_db::entities::donation_request;
use axum::{
    Json, Router,
    extract::{Path, State},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    extractors::{AppJson, AuthUser},
    middleware::{AppState, DONOR, require_roles},
    response::ApiResponse,
};

/// List surplus food.
async fn add(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateDonationInput>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let donation = state.donation_service.create(&user, input).await?;

    Ok(ApiResponse::created(json!({
        "message": "Donation saved successfully!",
        "donation": DonationView::from(donation),
    })))
}

/// The caller's own donations.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DonationView>>> {
    let donations = state.donation_service.list_for_donor(&user.id).await?;
    Ok(Json(donations.into_iter().map(DonationView::from).collect()))
}

/// Issue a standing request on the donor's behalf.
async fn request_donation(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRequestInput>,
) -> AppResult<ApiResponse<donation_request::Model>> {
    let request = state.request_service.create(&user, input).await?;
    Ok(ApiResponse::created(request))
}

/// Open requests the caller may accept.
async fn open_requests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<donation_request::Model>>> {
    let requests = state
        .request_service
        .list_open()
        .await?
        .into_iter()
        .filter(|r| r.ngo_id != user.id)
        .collect();

    Ok(Json(requests))
}

/// Turn a request into a donation owned by the caller.
async fn accept_request(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let donation = state.request_service.accept(&request_id, &user).await?;

    Ok(ApiResponse::ok(json!({
        "message": "Request accepted and converted into a donation",
        "donation": DonationView::from(donation),
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/add", post(add))
        .route("/request-donation", post(request_donation))
        .route("/my-requests", get(open_requests))
        .route("/requests/{id}/accept", post(accept_request))
        .route_layer(from_fn_with_state(DONOR, require_roles))
}
