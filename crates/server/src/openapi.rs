use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub success: bool, pub message: String, pub timestamp: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct SignupRequest { pub name: String, pub email: String, pub password: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::signup,
        crate::routes::interns::list,
        crate::routes::interns::get,
        crate::routes::interns::leaderboard,
        crate::routes::rewards::list,
    ),
    components(schemas(HealthResponse, LoginRequest, SignupRequest)),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "interns"),
        (name = "rewards")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
