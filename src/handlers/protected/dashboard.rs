// handlers/protected/dashboard.rs - GET /api/dashboard
//
// One summary whose sections depend on the caller's role. Report counts
// reuse the visibility rules of GET /api/reports.

use std::collections::BTreeMap;

use axum::extract::State;
use serde::Serialize;

use super::ratings::LecturerRatings;
use crate::auth::Role;
use crate::database::models::{Course, ReportStatus};
use crate::database::{courses, ratings, reports};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub user: AuthUser,
    /// Visible reports per status; every status is present
    pub reports: BTreeMap<&'static str, i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<LecturerRatings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings_submitted: Option<i64>,
}

fn status_counts(rows: Vec<(String, i64)>) -> BTreeMap<&'static str, i64> {
    let mut counts: BTreeMap<&'static str, i64> =
        ReportStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
    for (status, count) in rows {
        match ReportStatus::try_from(status) {
            Ok(status) => {
                counts.insert(status.as_str(), count);
            }
            Err(e) => tracing::warn!("Skipping report count: {}", e),
        }
    }
    counts
}

pub async fn dashboard(State(state): State<AppState>, actor: AuthUser) -> ApiResult<Dashboard> {
    let counts = reports::count_visible_by_status(&state.db, &actor).await?;

    let mut dashboard = Dashboard {
        reports: status_counts(counts),
        ratings: None,
        courses: None,
        ratings_submitted: None,
        user: actor,
    };

    match dashboard.user.role {
        Role::Lecturer => {
            let id = dashboard.user.id;
            let by_course = ratings::lecturer_summary(&state.db, id, None, None).await?;
            dashboard.ratings = Some(LecturerRatings::from_courses(id, by_course));
            dashboard.courses = Some(courses::list_courses(&state.db, None, Some(id)).await?);
        }
        Role::Student => {
            let submitted = ratings::count_by_student(&state.db, dashboard.user.id).await?;
            dashboard.ratings_submitted = Some(submitted);
        }
        _ => {}
    }

    Ok(ApiResponse::success(dashboard))
}
