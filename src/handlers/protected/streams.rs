use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::access::authorize;
use crate::auth::Role;
use crate::database::courses;
use crate::database::models::Stream;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateStreamRequest {
    pub name: String,
    pub code: String,
    pub leader_id: Option<i64>,
}

/// GET /api/streams
pub async fn list(State(state): State<AppState>, _actor: AuthUser) -> ApiResult<Vec<Stream>> {
    let streams = courses::list_streams(&state.db).await?;
    Ok(ApiResponse::success(streams))
}

/// POST /api/streams - Faculty managers only
pub async fn create(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<CreateStreamRequest>,
) -> ApiResult<Stream> {
    authorize(&actor, &[Role::FacultyManager])?;

    if payload.name.trim().is_empty() || payload.code.trim().is_empty() {
        return Err(ApiError::bad_request("Stream name and code are required"));
    }

    if let Some(leader_id) = payload.leader_id {
        let role = state
            .access
            .user_role(leader_id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("User {} not found", leader_id)))?;
        if !matches!(role, Role::ProgramLeader | Role::PrincipalLecturer) {
            return Err(ApiError::bad_request(format!(
                "User {} is a {} and cannot lead a stream",
                leader_id, role
            )));
        }
    }

    let stream = courses::create_stream(
        &state.db,
        payload.name.trim(),
        payload.code.trim(),
        payload.leader_id,
    )
    .await?;

    tracing::info!("User {} created stream {} ({})", actor.id, stream.id, stream.code);
    Ok(ApiResponse::created(stream))
}
