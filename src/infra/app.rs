use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{self, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::docs::{docs_ui, openapi_json};
use crate::adapter::http::routes::profile::{
    add_experience, add_friend, add_skill, create_profile, delete_experience, delete_friend, delete_profile,
    delete_skill, get_friends, get_profile, list_profiles, update_information, update_profile,
};
use crate::infra::config::AppConfig;
use crate::infra::state::AppState;

const ALLOWED_METHODS: [http::Method; 4] = [
    http::Method::POST,
    http::Method::GET,
    http::Method::PUT,
    http::Method::DELETE,
];

fn build_cors(config: &AppConfig) -> CorsLayer {
    let has_wildcard = config.application.allow_origins.iter().any(|s| s == "*");

    if has_wildcard {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(ALLOWED_METHODS)
            .allow_headers([CONTENT_TYPE]);
    }
    let origins: Vec<http::HeaderValue> = config
        .application
        .allow_origins
        .iter()
        .filter_map(|s| {
            s.parse::<http::HeaderValue>()
                .map_err(|e| {
                    tracing::warn!("Failed to parse origin '{}': {}", s, e);
                })
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Route not found".to_string(),
        }),
    )
}

pub fn profile_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_profiles).post(create_profile))
        .route("/{id}", get(get_profile).put(update_profile).delete(delete_profile))
        .route("/{id}/experience", post(add_experience))
        .route("/{id}/experience/{experience_id}", delete(delete_experience))
        .route("/{id}/skills", post(add_skill))
        .route("/{id}/skills/{skill}", delete(delete_skill))
        .route("/{id}/information", put(update_information))
        .route("/{id}/friends", get(get_friends).post(add_friend))
        .route("/{id}/friends/{friend_id}", delete(delete_friend))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/profiles", profile_router())
        .route("/api/profiles/", get(list_profiles).post(create_profile))
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(docs_ui))
        .fallback(route_not_found)
}

pub fn create_app(config: &AppConfig, state: AppState) -> Router {
    let cors = build_cors(config);
    Router::new()
        .merge(router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.application.body_limit))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &http::Request<_>| {
                    let request_id = Uuid::now_v7();
                    tracing::info_span!(
                        "http-request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request_id
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
