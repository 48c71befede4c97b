// handlers/public/catalog.rs - GET /api/courses (session optional)

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::auth::Role;
use crate::database::courses;
use crate::database::models::Course;
use crate::middleware::{ApiResponse, ApiResult, MaybeUser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub stream_id: Option<i64>,
    /// Restrict to the caller's taught courses; honoured only for lecturers
    #[serde(default)]
    pub mine: bool,
}

impl CourseQuery {
    /// Lecturer whose assignments narrow the listing, if any
    fn taught_by(&self, user: Option<&crate::middleware::AuthUser>) -> Option<i64> {
        match user {
            Some(user) if self.mine && user.role == Role::Lecturer => Some(user.id),
            _ => None,
        }
    }
}

/// GET /api/courses - Course catalogue
pub async fn courses_list(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<CourseQuery>,
) -> ApiResult<Vec<Course>> {
    let taught_by = query.taught_by(user.as_ref());
    let courses = courses::list_courses(&state.db, query.stream_id, taught_by).await?;
    Ok(ApiResponse::success(courses))
}
