use axum::{extract::State, Json};
use common::types::ApiResponse;
use models::Reward;

use crate::state::AppState;

#[utoipa::path(get, path = "/api/rewards", tag = "rewards", responses((status = 200, description = "Reward catalog ordered by threshold")))]
pub async fn list(State(state): State<AppState>) -> Json<ApiResponse<Vec<Reward>>> {
    Json(ApiResponse::ok(state.interns.rewards().to_vec()))
}
