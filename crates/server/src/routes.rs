use std::path::Path;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors::ApiError;
use crate::openapi;
use crate::state::AppState;

pub mod auth;
pub mod interns;
pub mod rewards;

#[utoipa::path(get, path = "/api/health", tag = "health", responses((status = 200, description = "Server is running", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::running())
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".into())
}

/// Router-generated 404/405 responses carry no body; give `/api` callers
/// the usual JSON error instead.
async fn api_json_errors(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    let is_api = path == "/api" || path.starts_with("/api/");
    let resp = next.run(req).await;
    if !is_api || resp.headers().contains_key(header::CONTENT_TYPE) {
        return resp;
    }
    match resp.status() {
        StatusCode::NOT_FOUND => ApiError::NotFound("Endpoint not found".into()).into_response(),
        StatusCode::METHOD_NOT_ALLOWED => {
            let allow = resp.headers().get(header::ALLOW).cloned();
            let mut out = ApiError::MethodNotAllowed("Method not allowed".into()).into_response();
            if let Some(allow) = allow {
                out.headers_mut().insert(header::ALLOW, allow);
            }
            out
        }
        _ => resp,
    }
}

/// JSON endpoints, mounted under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/register", post(auth::signup))
        .route("/interns", get(interns::list))
        .route("/interns/:id", get(interns::get))
        .route("/intern/:id", get(interns::get))
        .route("/user/:id", get(interns::get))
        .route("/leaderboard", get(interns::leaderboard))
        .route("/rewards", get(rewards::list))
        .fallback(api_not_found)
}

/// Build the full application router: API, OpenAPI document and static pages.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: impl AsRef<Path>) -> Router {
    let dir = frontend_dir.as_ref();

    let pages = Router::new()
        .route_service("/", ServeFile::new(dir.join("index.html")))
        .route_service("/dashboard", ServeFile::new(dir.join("dashboard.html")))
        .route_service("/leaderboard", ServeFile::new(dir.join("leaderboard.html")));

    let api = Router::new()
        .nest("/api", api_routes())
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state);

    pages
        .merge(api)
        .fallback_service(ServeDir::new(dir))
        .layer(middleware::from_fn(api_json_errors))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
