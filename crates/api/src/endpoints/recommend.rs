//! Donation recommendations for NGOs.

use aaharsetu_common::AppResult;
use aaharsetu_core::{RecommendQuery, ScoredDonation};
use axum::{
    Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::post,
};

use crate::{
    extractors::{AppJson, AuthUser},
    middleware::{AppState, NGO_OR_ADMIN, require_roles},
};

/// Rank donations near the caller, nearest first.
async fn recommend(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(query): AppJson<RecommendQuery>,
) -> AppResult<Json<Vec<ScoredDonation>>> {
    tracing::debug!(user_id = %user.id, "Recommendation requested");
    let ranked = state.recommendation_service.recommend(query).await?;
    Ok(Json(ranked))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recommend", post(recommend))
        .route_layer(from_fn_with_state(NGO_OR_ADMIN, require_roles))
}
