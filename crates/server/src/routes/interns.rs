use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use common::types::ApiResponse;
use models::{InternProfile, LeaderboardEntry};

use crate::errors::ApiError;
use crate::state::AppState;

/// All interns, highest total donations first.
#[utoipa::path(get, path = "/api/interns", tag = "interns", responses((status = 200, description = "Interns sorted by total donations")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<InternProfile>>>, ApiError> {
    let interns = state
        .interns
        .ranked()
        .await
        .map_err(|e| ApiError::from_service(e, "Error fetching interns data"))?;
    Ok(Json(ApiResponse::ok(interns)))
}

#[utoipa::path(get, path = "/api/interns/{id}", tag = "interns", params(("id" = u32, Path, description = "Intern id")), responses((status = 200, description = "Intern profile"), (status = 400, description = "Invalid id"), (status = 404, description = "Intern not found")))]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<ApiResponse<InternProfile>>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::BadRequest("Invalid intern id".into()))?;
    let intern = state
        .interns
        .profile(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Error fetching intern data"))?;
    Ok(Json(ApiResponse::ok(intern)))
}

#[utoipa::path(get, path = "/api/leaderboard", tag = "interns", responses((status = 200, description = "Ranked leaderboard rows")))]
pub async fn leaderboard(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<LeaderboardEntry>>>, ApiError> {
    let board = state
        .interns
        .leaderboard()
        .await
        .map_err(|e| ApiError::from_service(e, "Error fetching leaderboard"))?;
    Ok(Json(ApiResponse::ok(board)))
}
