//! Public donor directory.

use aaharsetu_common::AppResult;
use aaharsetu_core::DonorSummary;
use axum::{Json, Router, extract::State, routing::get};

use crate::middleware::AppState;

/// Every donor account, without contact details.
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<DonorSummary>>> {
    let donors = state.user_service.list_donors().await?;
    Ok(Json(donors))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list))
}
