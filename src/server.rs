use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    routing::{delete, get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::{ApiConfig, SecurityConfig};
use crate::database::DatabaseManager;
use crate::handlers::{protected, public};
use crate::state::AppState;

/// Full application router with default layer settings
pub fn app(state: AppState) -> Router {
    let config = crate::config::config();
    app_with(state, &config.api, &config.security)
}

pub fn app_with(state: AppState, api: &ApiConfig, security: &SecurityConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected API
        .merge(user_routes())
        .merge(catalog_routes())
        .merge(report_routes())
        .merge(rating_routes())
        .route("/api/dashboard", get(protected::dashboard::dashboard))
        .layer(RequestBodyLimitLayer::new(api.max_request_size_bytes));

    if let Some(cors) = cors_layer(security) {
        router = router.layer(cors);
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(public::login))
        .route("/api/auth/register", post(public::register))
        .route("/api/session", get(public::session))
}

fn user_routes() -> Router<AppState> {
    use protected::users;

    Router::new()
        .route("/api/auth/me", get(protected::session_me))
        .route("/api/users", get(users::list))
        .route("/api/users/:id", get(users::get))
        .route("/api/users/:id/active", patch(users::set_active))
}

fn catalog_routes() -> Router<AppState> {
    use protected::{courses, streams};

    Router::new()
        .route("/api/streams", get(streams::list).post(streams::create))
        // GET is session-optional, POST requires leadership
        .route("/api/courses", get(public::courses_list).post(courses::create))
        .route("/api/courses/:id/lecturers", post(courses::assign_lecturer))
        .route(
            "/api/courses/:id/lecturers/:lecturer_id",
            delete(courses::unassign_lecturer),
        )
}

fn report_routes() -> Router<AppState> {
    use protected::reports;

    Router::new()
        .route("/api/reports", get(reports::list).post(reports::create))
        .route("/api/reports/:id", get(reports::get))
        .route("/api/reports/:id/status", patch(reports::update_status))
}

fn rating_routes() -> Router<AppState> {
    use protected::ratings;

    Router::new()
        .route("/api/ratings", post(ratings::create))
        .route("/api/ratings/lecturers/:id", get(ratings::lecturer_summary))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Faculty Reporting API",
            "version": version,
            "description": "Faculty reporting, course management and lecturer ratings",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/auth/login, /api/auth/register (public), /api/auth/me (protected)",
                "session": "/api/session (optional session)",
                "users": "/api/users[/:id] (protected)",
                "catalog": "/api/streams, /api/courses[/:id/lecturers] (protected, GET /api/courses optional)",
                "reports": "/api/reports[/:id[/status]] (protected)",
                "ratings": "/api/ratings, /api/ratings/lecturers/:id (protected)",
                "dashboard": "/api/dashboard (protected)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
