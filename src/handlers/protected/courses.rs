use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::access::{authorize, LEADERSHIP};
use crate::auth::Role;
use crate::database::courses;
use crate::database::models::Course;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub stream_id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignLecturerRequest {
    pub lecturer_id: i64,
}

#[derive(Debug, Serialize)]
pub struct Assignment {
    pub course_id: i64,
    pub lecturer_id: i64,
    pub created: bool,
}

/// POST /api/courses
pub async fn create(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<CreateCourseRequest>,
) -> ApiResult<Course> {
    authorize(&actor, &LEADERSHIP)?;

    if payload.name.trim().is_empty() || payload.code.trim().is_empty() {
        return Err(ApiError::bad_request("Course name and code are required"));
    }
    if !courses::stream_exists(&state.db, payload.stream_id).await? {
        return Err(ApiError::not_found(format!("Stream {} not found", payload.stream_id)));
    }

    let course = courses::create_course(
        &state.db,
        payload.stream_id,
        payload.name.trim(),
        payload.code.trim(),
    )
    .await?;

    tracing::info!("User {} created course {} in stream {}", actor.id, course.id, course.stream_id);
    Ok(ApiResponse::created(course))
}

/// POST /api/courses/:id/lecturers - Record a teaching relationship
pub async fn assign_lecturer(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(course_id): Path<i64>,
    Json(payload): Json<AssignLecturerRequest>,
) -> ApiResult<Assignment> {
    authorize(&actor, &LEADERSHIP)?;

    ensure_course(&state, course_id).await?;
    let role = state
        .access
        .user_role(payload.lecturer_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", payload.lecturer_id)))?;
    if role != Role::Lecturer {
        return Err(ApiError::bad_request(format!(
            "User {} is a {}, not a lecturer",
            payload.lecturer_id, role
        )));
    }

    let created = courses::assign_lecturer(&state.db, course_id, payload.lecturer_id).await?;
    tracing::info!(
        "User {} assigned lecturer {} to course {} (new: {})",
        actor.id,
        payload.lecturer_id,
        course_id,
        created
    );

    let assignment = Assignment {
        course_id,
        lecturer_id: payload.lecturer_id,
        created,
    };
    Ok(if created {
        ApiResponse::created(assignment)
    } else {
        ApiResponse::success(assignment)
    })
}

/// DELETE /api/courses/:id/lecturers/:lecturer_id
pub async fn unassign_lecturer(
    State(state): State<AppState>,
    actor: AuthUser,
    Path((course_id, lecturer_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    authorize(&actor, &LEADERSHIP)?;

    if !courses::unassign_lecturer(&state.db, course_id, lecturer_id).await? {
        return Err(ApiError::not_found(format!(
            "Lecturer {} is not assigned to course {}",
            lecturer_id, course_id
        )));
    }

    tracing::info!("User {} removed lecturer {} from course {}", actor.id, lecturer_id, course_id);
    Ok(ApiResponse::<()>::no_content())
}

pub(super) async fn ensure_course(state: &AppState, course_id: i64) -> Result<Course, ApiError> {
    courses::find_course(&state.db, course_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Course {} not found", course_id)))
}
