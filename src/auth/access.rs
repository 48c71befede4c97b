//! Authorization decisions: role allow-lists, owner-or-higher and report
//! visibility.
//!
//! The checks read through [`AccessStore`] so they stay independent of the
//! SQL behind them. Each check performs at most two reads.

use async_trait::async_trait;
use thiserror::Error;

use super::roles::Role;
use crate::database::manager::DatabaseError;
use crate::middleware::auth::AuthUser;

/// Roles that manage streams, courses and lecturer assignments.
pub const LEADERSHIP: [Role; 3] = [Role::ProgramLeader, Role::PrincipalLecturer, Role::FacultyManager];

/// Owning reporter and course of a report, as needed for access decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOwner {
    pub report_id: i64,
    pub reporter_id: i64,
    pub reporter_role: Role,
    pub course_id: i64,
}

/// Reads required by authentication and authorization.
#[async_trait]
pub trait AccessStore: Send + Sync {
    /// Active user by id; `None` when missing or deactivated.
    async fn find_active_user(&self, user_id: i64) -> Result<Option<AuthUser>, DatabaseError>;

    /// Role of any user, active or not.
    async fn user_role(&self, user_id: i64) -> Result<Option<Role>, DatabaseError>;

    /// Report joined with its reporter's role.
    async fn report_owner(&self, report_id: i64) -> Result<Option<ReportOwner>, DatabaseError>;

    /// Whether a `lecturer_courses` row links the lecturer to the course.
    async fn teaches_course(&self, lecturer_id: i64, course_id: i64) -> Result<bool, DatabaseError>;
}

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Why a report read was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportGrant {
    Reporter,
    Outranks,
    TeachesCourse,
}

/// Exact membership of the actor's role in `allowed`. No hierarchy reasoning.
pub fn authorize(actor: &AuthUser, allowed: &[Role]) -> Result<(), AccessError> {
    if allowed.contains(&actor.role) {
        return Ok(());
    }

    tracing::warn!(
        "Role check failed: user {} has role '{}', allowed {:?}",
        actor.id,
        actor.role,
        allowed
    );
    Err(AccessError::Forbidden(format!(
        "Role '{}' is not permitted to perform this action",
        actor.role
    )))
}

/// Allows the owner, or any actor whose rank is strictly above the owner's.
pub async fn check_owner_or_higher(
    store: &dyn AccessStore,
    actor: &AuthUser,
    target_user_id: i64,
) -> Result<(), AccessError> {
    if actor.id == target_user_id {
        return Ok(());
    }

    let target_role = store
        .user_role(target_user_id)
        .await?
        .ok_or_else(|| AccessError::NotFound(format!("User {} not found", target_user_id)))?;

    if actor.role.outranks(target_role) {
        return Ok(());
    }

    tracing::warn!(
        "Owner-or-higher check failed: user {} ({}) on user {} ({})",
        actor.id,
        actor.role,
        target_user_id,
        target_role
    );
    Err(AccessError::Forbidden("Insufficient privileges for this user".to_string()))
}

/// Whether the actor/reporter pair is decided only by the teaching relationship.
///
/// A lecturer outranks every student, so without this rule the teaching
/// check could never deny anything.
pub fn is_teaching_scoped(actor_role: Role, reporter_role: Role) -> bool {
    actor_role == Role::Lecturer && reporter_role == Role::Student
}

/// Report visibility. First match wins:
/// reporter, strictly higher rank, then a lecturer teaching a student's course.
/// Lecturer on student is never granted by rank alone.
pub async fn validate_report_access(
    store: &dyn AccessStore,
    actor: &AuthUser,
    report_id: i64,
) -> Result<(ReportOwner, ReportGrant), AccessError> {
    let owner = store
        .report_owner(report_id)
        .await?
        .ok_or_else(|| AccessError::NotFound(format!("Report {} not found", report_id)))?;

    if actor.id == owner.reporter_id {
        return Ok((owner, ReportGrant::Reporter));
    }

    let teaching_scoped = is_teaching_scoped(actor.role, owner.reporter_role);

    if !teaching_scoped && actor.role.outranks(owner.reporter_role) {
        return Ok((owner, ReportGrant::Outranks));
    }

    if teaching_scoped && store.teaches_course(actor.id, owner.course_id).await? {
        return Ok((owner, ReportGrant::TeachesCourse));
    }

    tracing::warn!(
        "Report access denied: user {} ({}) on report {} owned by {} ({})",
        actor.id,
        actor.role,
        report_id,
        owner.reporter_id,
        owner.reporter_role
    );
    Err(AccessError::Forbidden("You do not have access to this report".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryAccessStore;

    fn actor(id: i64, role: Role) -> AuthUser {
        AuthUser::new(id, format!("user{}", id), format!("user{}@example.edu", id), role)
    }

    #[test]
    fn authorize_is_exact_membership() {
        let manager = actor(1, Role::FacultyManager);
        assert!(authorize(&manager, &[Role::FacultyManager]).is_ok());
        // Outranking an allowed role is not enough.
        assert!(matches!(
            authorize(&manager, &[Role::Student, Role::Lecturer]),
            Err(AccessError::Forbidden(_))
        ));
        assert!(authorize(&actor(2, Role::Unknown), &Role::ALL).is_err());
        assert!(authorize(&actor(3, Role::Student), &[]).is_err());
    }

    #[tokio::test]
    async fn owner_or_higher_for_every_role_pair() {
        for (i, a) in Role::ALL.into_iter().enumerate() {
            for (j, b) in Role::ALL.into_iter().enumerate() {
                let actor_id = 100 + i as i64;
                let target_id = 200 + j as i64;
                let store = MemoryAccessStore::new()
                    .with_user(actor_id, a)
                    .with_user(target_id, b);

                let result = check_owner_or_higher(&store, &actor(actor_id, a), target_id).await;
                assert_eq!(result.is_ok(), a.rank() > b.rank(), "{} on {}", a, b);
            }
        }
    }

    #[tokio::test]
    async fn owner_is_allowed_without_lookup() {
        // Empty store: any lookup would produce NotFound.
        let store = MemoryAccessStore::new();
        let me = actor(7, Role::Student);
        assert!(check_owner_or_higher(&store, &me, 7).await.is_ok());
    }

    #[tokio::test]
    async fn owner_or_higher_reports_missing_target() {
        let store = MemoryAccessStore::new().with_user(1, Role::FacultyManager);
        let result = check_owner_or_higher(&store, &actor(1, Role::FacultyManager), 99).await;
        assert!(matches!(result, Err(AccessError::NotFound(_))));
    }

    #[tokio::test]
    async fn inactive_target_still_participates_in_comparison() {
        let store = MemoryAccessStore::new()
            .with_user(1, Role::Lecturer)
            .with_inactive_user(2, Role::ProgramLeader)
            .with_inactive_user(3, Role::Student);
        assert!(check_owner_or_higher(&store, &actor(1, Role::Lecturer), 2).await.is_err());
        assert!(check_owner_or_higher(&store, &actor(1, Role::Lecturer), 3).await.is_ok());
    }

    #[tokio::test]
    async fn lecturer_needs_teaching_assignment_for_student_report() {
        let store = MemoryAccessStore::new()
            .with_user(5, Role::Student)
            .with_user(9, Role::Lecturer)
            .with_report(1, 5, 42);
        let lecturer = actor(9, Role::Lecturer);

        let denied = validate_report_access(&store, &lecturer, 1).await;
        assert!(matches!(denied, Err(AccessError::Forbidden(_))));

        let store = store.with_assignment(9, 42);
        let (owner, grant) = validate_report_access(&store, &lecturer, 1).await.unwrap();
        assert_eq!(owner.reporter_id, 5);
        assert_eq!(grant, ReportGrant::TeachesCourse);
    }

    #[tokio::test]
    async fn teaching_other_course_does_not_help() {
        let store = MemoryAccessStore::new()
            .with_user(5, Role::Student)
            .with_user(9, Role::Lecturer)
            .with_report(1, 5, 42)
            .with_assignment(9, 43);
        assert!(validate_report_access(&store, &actor(9, Role::Lecturer), 1).await.is_err());
    }

    #[tokio::test]
    async fn principal_lecturer_reads_lecturer_report_without_assignment() {
        let store = MemoryAccessStore::new()
            .with_user(9, Role::Lecturer)
            .with_user(20, Role::PrincipalLecturer)
            .with_report(3, 9, 42);
        let (_, grant) = validate_report_access(&store, &actor(20, Role::PrincipalLecturer), 3)
            .await
            .unwrap();
        assert_eq!(grant, ReportGrant::Outranks);
    }

    #[tokio::test]
    async fn reporter_always_allowed() {
        for role in Role::ALL.into_iter().chain([Role::Unknown]) {
            let store = MemoryAccessStore::new().with_user(1, role).with_report(10, 1, 42);
            let (_, grant) = validate_report_access(&store, &actor(1, role), 10).await.unwrap();
            assert_eq!(grant, ReportGrant::Reporter);
        }
    }

    #[tokio::test]
    async fn report_access_matrix_for_non_reporters() {
        for reporter_role in Role::ALL {
            for actor_role in Role::ALL {
                for teaches in [false, true] {
                    let mut store = MemoryAccessStore::new()
                        .with_user(1, reporter_role)
                        .with_user(2, actor_role)
                        .with_report(10, 1, 42);
                    if teaches {
                        store = store.with_assignment(2, 42);
                    }

                    let allowed = validate_report_access(&store, &actor(2, actor_role), 10)
                        .await
                        .is_ok();
                    let expected = if actor_role == Role::Lecturer && reporter_role == Role::Student {
                        teaches
                    } else {
                        actor_role.rank() > reporter_role.rank()
                    };
                    assert_eq!(
                        allowed, expected,
                        "actor {} reporter {} teaches {}",
                        actor_role, reporter_role, teaches
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn lecturer_cannot_read_peer_lecturer_report_even_when_teaching() {
        let store = MemoryAccessStore::new()
            .with_user(8, Role::Lecturer)
            .with_user(9, Role::Lecturer)
            .with_report(4, 8, 42)
            .with_assignment(9, 42);
        assert!(validate_report_access(&store, &actor(9, Role::Lecturer), 4).await.is_err());
    }

    #[tokio::test]
    async fn missing_report_is_not_found() {
        let store = MemoryAccessStore::new();
        let result = validate_report_access(&store, &actor(1, Role::FacultyManager), 404).await;
        assert!(matches!(result, Err(AccessError::NotFound(_))));
    }
}
