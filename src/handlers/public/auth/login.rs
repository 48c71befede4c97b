// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::password::{verify_password, verify_unknown_user};
use crate::auth::{generate_jwt, Claims};
use crate::database::models::User;
use crate::database::users;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

/// POST /api/auth/login - Authenticate with email/password and receive a JWT
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Unknown email, wrong password and deactivated accounts all answer 401
/// with the same message.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let invalid = || ApiError::unauthorized("Invalid email or password");

    let user = match users::find_by_email(&state.db, payload.email.trim()).await? {
        Some(user) => user,
        None => {
            verify_unknown_user(&payload.password);
            return Err(invalid());
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(invalid());
    }

    if !user.active {
        tracing::warn!("Login attempt for inactive user {}", user.id);
        return Err(invalid());
    }

    let claims = Claims::new(user.id, user.email.clone(), user.role, state.jwt.expiry_hours);
    let token = generate_jwt(&claims, &state.jwt)?;

    tracing::info!("User {} ({}) logged in", user.id, user.role);

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: state.jwt.expires_in_secs(),
        user,
    }))
}
