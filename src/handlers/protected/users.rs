use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::auth::access::{authorize, check_owner_or_higher, LEADERSHIP};
use crate::auth::Role;
use crate::database::models::User;
use crate::database::users;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct ActiveRequest {
    pub active: bool,
}

/// GET /api/users - Directory for program leaders and above
pub async fn list(
    State(state): State<AppState>,
    actor: AuthUser,
    Query(query): Query<UserQuery>,
) -> ApiResult<Vec<User>> {
    authorize(&actor, &LEADERSHIP)?;
    let users = users::list(&state.db, query.role).await?;
    Ok(ApiResponse::success(users))
}

/// GET /api/users/:id - Own profile, or anyone of lower rank
pub async fn get(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<User> {
    check_owner_or_higher(state.access.as_ref(), &actor, id).await?;

    let user = users::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;
    Ok(ApiResponse::success(user))
}

/// PATCH /api/users/:id/active - Activate or deactivate an account
pub async fn set_active(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ActiveRequest>,
) -> ApiResult<User> {
    authorize(&actor, &[Role::FacultyManager])?;
    check_owner_or_higher(state.access.as_ref(), &actor, id).await?;

    let user = users::set_active(&state.db, id, payload.active)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    tracing::info!("User {} set active={} on user {}", actor.id, user.active, user.id);
    Ok(ApiResponse::success(user))
}
