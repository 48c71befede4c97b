use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::courses::ensure_course;
use crate::auth::access::{authorize, check_owner_or_higher};
use crate::auth::Role;
use crate::database::courses;
use crate::database::models::{CourseRatingSummary, Rating};
use crate::database::ratings::{self, NewRating};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRatingRequest {
    pub course_id: i64,
    pub lecturer_id: i64,
    pub academic_year: String,
    pub semester: i16,
    pub score: i16,
    pub comment: Option<String>,
}

impl CreateRatingRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = HashMap::new();
        if !(1..=5).contains(&self.score) {
            errors.insert("score".to_string(), "must be between 1 and 5".to_string());
        }
        if !(1..=2).contains(&self.semester) {
            errors.insert("semester".to_string(), "must be 1 or 2".to_string());
        }
        if self.academic_year.trim().is_empty() {
            errors.insert("academic_year".to_string(), "must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid rating", Some(errors)))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub academic_year: Option<String>,
    pub semester: Option<i16>,
}

#[derive(Debug, Serialize)]
pub struct LecturerRatings {
    pub lecturer_id: i64,
    pub count: i64,
    /// Mean score over all courses; `None` without ratings
    pub average: Option<f64>,
    pub by_course: Vec<CourseRatingSummary>,
}

impl LecturerRatings {
    pub fn from_courses(lecturer_id: i64, by_course: Vec<CourseRatingSummary>) -> Self {
        let count: i64 = by_course.iter().map(|c| c.count).sum();
        let average = (count > 0).then(|| {
            let total: f64 = by_course.iter().map(|c| c.average * c.count as f64).sum();
            total / count as f64
        });
        Self {
            lecturer_id,
            count,
            average,
            by_course,
        }
    }
}

/// POST /api/ratings - Students rate a lecturer on a course they attend
pub async fn create(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<CreateRatingRequest>,
) -> ApiResult<Rating> {
    authorize(&actor, &[Role::Student])?;
    payload.validate()?;

    ensure_course(&state, payload.course_id).await?;
    if !courses::teaches(&state.db, payload.lecturer_id, payload.course_id).await? {
        return Err(ApiError::bad_request(format!(
            "Lecturer {} does not teach course {}",
            payload.lecturer_id, payload.course_id
        )));
    }

    let rating = NewRating {
        student_id: actor.id,
        course_id: payload.course_id,
        lecturer_id: payload.lecturer_id,
        academic_year: payload.academic_year.trim(),
        semester: payload.semester,
        score: payload.score,
        comment: payload.comment.as_deref().filter(|c| !c.trim().is_empty()),
    };
    if ratings::exists_for_period(&state.db, &rating).await? {
        return Err(ApiError::conflict("You already rated this lecturer for this period"));
    }

    let created = ratings::create(&state.db, rating).await?;
    tracing::info!(
        "Student {} rated lecturer {} on course {}",
        actor.id,
        created.lecturer_id,
        created.course_id
    );
    Ok(ApiResponse::created(created))
}

/// GET /api/ratings/lecturers/:id - Aggregated scores for one lecturer
pub async fn lecturer_summary(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(lecturer_id): Path<i64>,
    Query(period): Query<PeriodQuery>,
) -> ApiResult<LecturerRatings> {
    check_owner_or_higher(state.access.as_ref(), &actor, lecturer_id).await?;

    let by_course = ratings::lecturer_summary(
        &state.db,
        lecturer_id,
        period.academic_year.as_deref(),
        period.semester,
    )
    .await?;
    Ok(ApiResponse::success(LecturerRatings::from_courses(lecturer_id, by_course)))
}
