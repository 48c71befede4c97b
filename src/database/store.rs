use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::auth::access::{AccessStore, ReportOwner};
use crate::auth::Role;
use crate::database::courses;
use crate::database::manager::DatabaseError;
use crate::middleware::auth::AuthUser;

/// [`AccessStore`] over the shared Postgres pool
#[derive(Clone)]
pub struct PgAccessStore {
    pool: PgPool,
}

impl PgAccessStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessStore for PgAccessStore {
    async fn find_active_user(&self, user_id: i64) -> Result<Option<AuthUser>, DatabaseError> {
        let row = sqlx::query("SELECT id, name, email, role FROM users WHERE id = $1 AND active = true")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| {
            let role: String = row.get("role");
            AuthUser::new(row.get("id"), row.get("name"), row.get("email"), Role::parse(&role))
        }))
    }

    async fn user_role(&self, user_id: i64) -> Result<Option<Role>, DatabaseError> {
        let role: Option<(String,)> = sqlx::query_as("SELECT role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role.map(|(role,)| Role::parse(&role)))
    }

    async fn report_owner(&self, report_id: i64) -> Result<Option<ReportOwner>, DatabaseError> {
        let row = sqlx::query(
            "SELECT r.id, r.reporter_id, r.course_id, u.role AS reporter_role \
             FROM reports r JOIN users u ON u.id = r.reporter_id \
             WHERE r.id = $1",
        )
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let role: String = row.get("reporter_role");
            ReportOwner {
                report_id: row.get("id"),
                reporter_id: row.get("reporter_id"),
                reporter_role: Role::parse(&role),
                course_id: row.get("course_id"),
            }
        }))
    }

    async fn teaches_course(&self, lecturer_id: i64, course_id: i64) -> Result<bool, DatabaseError> {
        courses::teaches(&self.pool, lecturer_id, course_id).await
    }
}
