use sqlx::PgPool;

use crate::auth::Role;
use crate::database::manager::DatabaseError;
use crate::database::models::{Report, ReportStatus};
use crate::middleware::auth::AuthUser;

const REPORT_COLUMNS: &str =
    "r.id, r.reporter_id, r.course_id, r.title, r.content, r.status, r.created_at, r.updated_at";

/// WHERE fragment selecting reports visible to an actor, mirroring
/// `validate_report_access`. Binds: `$1` actor id, `$2` actor rank,
/// `$3` actor role. Expects `reports r JOIN users u ON u.id = r.reporter_id`.
fn visible_to_clause() -> String {
    format!(
        "(r.reporter_id = $1 \
          OR (NOT ($3 = 'lecturer' AND u.role = 'student') AND {rank} < $2) \
          OR ($3 = 'lecturer' AND u.role = 'student' AND EXISTS ( \
                SELECT 1 FROM lecturer_courses lc \
                WHERE lc.lecturer_id = $1 AND lc.course_id = r.course_id)))",
        rank = Role::rank_sql("u.role")
    )
}

pub struct NewReport<'a> {
    pub reporter_id: i64,
    pub course_id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub status: ReportStatus,
}

pub async fn create(pool: &PgPool, report: NewReport<'_>) -> Result<Report, DatabaseError> {
    let created = sqlx::query_as::<_, Report>(
        "INSERT INTO reports (reporter_id, course_id, title, content, status) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, reporter_id, course_id, title, content, status, created_at, updated_at",
    )
    .bind(report.reporter_id)
    .bind(report.course_id)
    .bind(report.title)
    .bind(report.content)
    .bind(report.status.as_str())
    .fetch_one(pool)
    .await?;
    Ok(created)
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Report>, DatabaseError> {
    let sql = format!("SELECT {} FROM reports r WHERE r.id = $1", REPORT_COLUMNS);
    let report = sqlx::query_as::<_, Report>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(report)
}

pub async fn list_visible(
    pool: &PgPool,
    actor: &AuthUser,
    status: Option<ReportStatus>,
) -> Result<Vec<Report>, DatabaseError> {
    let sql = format!(
        "SELECT {} FROM reports r JOIN users u ON u.id = r.reporter_id \
         WHERE {} AND ($4::text IS NULL OR r.status = $4) \
         ORDER BY r.created_at DESC",
        REPORT_COLUMNS,
        visible_to_clause()
    );
    let reports = sqlx::query_as::<_, Report>(&sql)
        .bind(actor.id)
        .bind(actor.role.rank() as i32)
        .bind(actor.role.as_str())
        .bind(status.map(ReportStatus::as_str))
        .fetch_all(pool)
        .await?;
    Ok(reports)
}

pub async fn count_visible_by_status(
    pool: &PgPool,
    actor: &AuthUser,
) -> Result<Vec<(String, i64)>, DatabaseError> {
    let sql = format!(
        "SELECT r.status, COUNT(*) FROM reports r JOIN users u ON u.id = r.reporter_id \
         WHERE {} GROUP BY r.status ORDER BY r.status",
        visible_to_clause()
    );
    let rows = sqlx::query_as::<_, (String, i64)>(&sql)
        .bind(actor.id)
        .bind(actor.role.rank() as i32)
        .bind(actor.role.as_str())
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn update_status(
    pool: &PgPool,
    id: i64,
    status: ReportStatus,
) -> Result<Option<Report>, DatabaseError> {
    let report = sqlx::query_as::<_, Report>(
        "UPDATE reports SET status = $2, updated_at = NOW() WHERE id = $1 \
         RETURNING id, reporter_id, course_id, title, content, status, created_at, updated_at",
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;
    Ok(report)
}
