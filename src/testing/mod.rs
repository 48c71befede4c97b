//! In-memory fixtures for exercising authentication and access checks
//! without a database.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::auth::access::{AccessStore, ReportOwner};
use crate::auth::{generate_jwt, Claims, JwtSettings, Role};
use crate::database::manager::DatabaseError;
use crate::middleware::auth::AuthUser;

#[derive(Debug, Clone)]
struct MemoryUser {
    user: AuthUser,
    active: bool,
}

#[derive(Debug, Clone, Copy)]
struct MemoryReport {
    reporter_id: i64,
    course_id: i64,
}

/// [`AccessStore`] backed by plain maps. Built with chained `with_*` calls.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccessStore {
    users: HashMap<i64, MemoryUser>,
    reports: HashMap<i64, MemoryReport>,
    assignments: HashSet<(i64, i64)>,
    fail_lookups: bool,
}

impl MemoryAccessStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, id: i64, role: Role) -> Self {
        self.insert_user(id, role, true);
        self
    }

    pub fn with_inactive_user(mut self, id: i64, role: Role) -> Self {
        self.insert_user(id, role, false);
        self
    }

    pub fn with_report(mut self, report_id: i64, reporter_id: i64, course_id: i64) -> Self {
        self.reports.insert(report_id, MemoryReport { reporter_id, course_id });
        self
    }

    pub fn with_assignment(mut self, lecturer_id: i64, course_id: i64) -> Self {
        self.assignments.insert((lecturer_id, course_id));
        self
    }

    /// Every lookup returns a database error.
    pub fn failing() -> Self {
        Self {
            fail_lookups: true,
            ..Self::default()
        }
    }

    fn insert_user(&mut self, id: i64, role: Role, active: bool) {
        let user = AuthUser::new(id, format!("User {}", id), format!("user{}@example.edu", id), role);
        self.users.insert(id, MemoryUser { user, active });
    }

    fn check_failure(&self) -> Result<(), DatabaseError> {
        if self.fail_lookups {
            return Err(DatabaseError::QueryError("memory store configured to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AccessStore for MemoryAccessStore {
    async fn find_active_user(&self, user_id: i64) -> Result<Option<AuthUser>, DatabaseError> {
        self.check_failure()?;
        Ok(self
            .users
            .get(&user_id)
            .filter(|u| u.active)
            .map(|u| u.user.clone()))
    }

    async fn user_role(&self, user_id: i64) -> Result<Option<Role>, DatabaseError> {
        self.check_failure()?;
        Ok(self.users.get(&user_id).map(|u| u.user.role))
    }

    async fn report_owner(&self, report_id: i64) -> Result<Option<ReportOwner>, DatabaseError> {
        self.check_failure()?;
        Ok(self.reports.get(&report_id).map(|r| ReportOwner {
            report_id,
            reporter_id: r.reporter_id,
            reporter_role: self
                .users
                .get(&r.reporter_id)
                .map(|u| u.user.role)
                .unwrap_or(Role::Unknown),
            course_id: r.course_id,
        }))
    }

    async fn teaches_course(&self, lecturer_id: i64, course_id: i64) -> Result<bool, DatabaseError> {
        self.check_failure()?;
        Ok(self.assignments.contains(&(lecturer_id, course_id)))
    }
}

/// Mint a bearer token for a fixture user.
pub fn token_for(user_id: i64, role: Role, jwt: &JwtSettings) -> String {
    let claims = Claims::new(user_id, format!("user{}@example.edu", user_id), role, jwt.expiry_hours);
    generate_jwt(&claims, jwt).unwrap_or_else(|e| panic!("fixture token generation failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn inactive_users_are_hidden_from_authentication_only() {
        let store = MemoryAccessStore::new().with_inactive_user(3, Role::Lecturer);
        assert!(store.find_active_user(3).await.unwrap().is_none());
        assert_eq!(store.user_role(3).await.unwrap(), Some(Role::Lecturer));
    }

    #[tokio::test]
    async fn failing_store_errors_everywhere() {
        let store = MemoryAccessStore::failing();
        assert!(store.find_active_user(1).await.is_err());
        assert!(store.teaches_course(1, 1).await.is_err());
    }
}
