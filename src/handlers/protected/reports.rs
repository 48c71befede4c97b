use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::courses::ensure_course;
use crate::auth::access::{validate_report_access, ReportGrant};
use crate::database::models::{Report, ReportStatus, StatusTransition};
use crate::database::reports::{self, NewReport};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub course_id: i64,
    pub title: String,
    pub content: String,
    /// Submit immediately instead of saving a draft
    #[serde(default)]
    pub submit: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub status: Option<ReportStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: ReportStatus,
}

/// Whether the way access was granted lets the actor perform the transition.
///
/// Reviewer grants (rank or teaching) always imply a rank above the reporter.
fn permits(transition: StatusTransition, grant: ReportGrant) -> bool {
    match transition {
        StatusTransition::Reporter => grant == ReportGrant::Reporter,
        StatusTransition::Reviewer => grant != ReportGrant::Reporter,
    }
}

/// POST /api/reports
pub async fn create(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<CreateReportRequest>,
) -> ApiResult<Report> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::validation_error(
            "Report title is required",
            Some(HashMap::from([("title".to_string(), "must not be empty".to_string())])),
        ));
    }
    ensure_course(&state, payload.course_id).await?;

    let status = if payload.submit {
        ReportStatus::Submitted
    } else {
        ReportStatus::Draft
    };
    let report = reports::create(
        &state.db,
        NewReport {
            reporter_id: actor.id,
            course_id: payload.course_id,
            title,
            content: &payload.content,
            status,
        },
    )
    .await?;

    tracing::info!(
        "User {} filed report {} on course {} as {}",
        actor.id,
        report.id,
        report.course_id,
        report.status
    );
    Ok(ApiResponse::created(report))
}

/// GET /api/reports - Reports the caller may read, newest first
pub async fn list(
    State(state): State<AppState>,
    actor: AuthUser,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Vec<Report>> {
    let reports = reports::list_visible(&state.db, &actor, query.status).await?;
    Ok(ApiResponse::success(reports))
}

/// GET /api/reports/:id
pub async fn get(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Report> {
    let (_, grant) = validate_report_access(state.access.as_ref(), &actor, id).await?;
    tracing::debug!("User {} reads report {} via {:?}", actor.id, id, grant);

    let report = reports::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Report {} not found", id)))?;
    Ok(ApiResponse::success(report))
}

/// PATCH /api/reports/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<StatusRequest>,
) -> ApiResult<Report> {
    let (_, grant) = validate_report_access(state.access.as_ref(), &actor, id).await?;

    let current = reports::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Report {} not found", id)))?;

    let transition = current.status.transition_to(payload.status).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Cannot move report from '{}' to '{}'",
            current.status, payload.status
        ))
    })?;

    if !permits(transition, grant) {
        tracing::warn!(
            "User {} may not move report {} from {} to {}",
            actor.id,
            id,
            current.status,
            payload.status
        );
        return Err(ApiError::forbidden(match transition {
            StatusTransition::Reporter => "Only the reporter can submit this report",
            StatusTransition::Reviewer => "Only a reviewer above the reporter can change this status",
        }));
    }

    let report = reports::update_status(&state.db, id, payload.status)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Report {} not found", id)))?;

    tracing::info!("User {} moved report {} to {}", actor.id, id, report.status);
    Ok(ApiResponse::success(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporter_submits_and_reviewers_decide() {
        assert!(permits(StatusTransition::Reporter, ReportGrant::Reporter));
        assert!(!permits(StatusTransition::Reporter, ReportGrant::Outranks));
        assert!(!permits(StatusTransition::Reporter, ReportGrant::TeachesCourse));

        assert!(!permits(StatusTransition::Reviewer, ReportGrant::Reporter));
        assert!(permits(StatusTransition::Reviewer, ReportGrant::Outranks));
        assert!(permits(StatusTransition::Reviewer, ReportGrant::TeachesCourse));
    }

    #[test]
    fn status_body_uses_snake_case() {
        let request: StatusRequest = serde_json::from_str(r#"{"status":"approved"}"#).unwrap();
        assert_eq!(request.status, ReportStatus::Approved);
        assert!(serde_json::from_str::<StatusRequest>(r#"{"status":"archived"}"#).is_err());
    }
}
