use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use serde::Serialize;

use crate::auth::{decode_bearer, AuthError, Role};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the bearer token and the users table.
///
/// Taking `AuthUser` as a handler argument makes the route require a valid
/// session; the value is passed explicitly rather than stored on the request.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn new(id: i64, name: String, email: String, role: Role) -> Self {
        Self { id, name, email, role }
    }
}

/// Session that may be absent. Never rejects the request.
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<AuthUser>);

/// Validate the bearer credential and load the active user it names
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let claims = decode_bearer(headers, &state.jwt).map_err(|e| {
        tracing::debug!("Bearer credential rejected: {}", e);
        ApiError::from(e)
    })?;

    let user = state.access.find_active_user(claims.user_id).await?;

    match user {
        Some(user) => {
            tracing::debug!("Authenticated user {} ({})", user.id, user.role);
            Ok(user)
        }
        None => {
            tracing::warn!("Token for user {} does not match an active user", claims.user_id);
            Err(ApiError::unauthorized("User not found or inactive"))
        }
    }
}

/// Same decoding as [`authenticate`], but every failure degrades to `None`
pub async fn authenticate_optional(state: &AppState, headers: &HeaderMap) -> Option<AuthUser> {
    let claims = match decode_bearer(headers, &state.jwt) {
        Ok(claims) => claims,
        Err(AuthError::MissingHeader) => return None,
        Err(e) => {
            tracing::debug!("Ignoring invalid optional credential: {}", e);
            return None;
        }
    };

    match state.access.find_active_user(claims.user_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("User lookup failed during optional authentication: {}", e);
            None
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers).await
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(authenticate_optional(state, &parts.headers).await))
    }
}
