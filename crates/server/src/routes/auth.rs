use axum::{extract::rejection::JsonRejection, extract::State, Json};
use common::types::ApiResponse;
use models::InternProfile;
use service::auth::domain::{LoginInput, SignupInput};

use crate::errors::ApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/api/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in"), (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<ApiResponse<InternProfile>>, ApiError> {
    let Json(input) = payload?;
    let intern = state.auth.login(input).await?;
    Ok(Json(ApiResponse::ok(state.interns.to_profile(&intern)).with_message("Login successful")))
}

#[utoipa::path(post, path = "/api/signup", tag = "auth", request_body = crate::openapi::SignupRequest, responses((status = 200, description = "Account created"), (status = 400, description = "Missing fields, invalid input or email already registered")))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupInput>, JsonRejection>,
) -> Result<Json<ApiResponse<InternProfile>>, ApiError> {
    let Json(input) = payload?;
    let intern = state.auth.signup(input).await?;
    Ok(Json(
        ApiResponse::ok(state.interns.to_profile(&intern))
            .with_message("Account created successfully! You can now login with your email."),
    ))
}
