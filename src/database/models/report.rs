use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub id: i64,
    pub reporter_id: i64,
    pub course_id: i64,
    pub title: String,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    Submitted,
    Reviewed,
    Approved,
    Rejected,
}

#[derive(Debug, Error)]
#[error("Unknown report status '{0}'")]
pub struct UnknownStatus(pub String);

/// Who may perform a status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    /// Only the reporter (draft -> submitted)
    Reporter,
    /// Only an actor who strictly outranks the reporter
    Reviewer,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 5] = [
        ReportStatus::Draft,
        ReportStatus::Submitted,
        ReportStatus::Reviewed,
        ReportStatus::Approved,
        ReportStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Submitted => "submitted",
            ReportStatus::Reviewed => "reviewed",
            ReportStatus::Approved => "approved",
            ReportStatus::Rejected => "rejected",
        }
    }

    pub fn transition_to(self, next: ReportStatus) -> Option<StatusTransition> {
        use ReportStatus::*;
        match (self, next) {
            (Draft, Submitted) => Some(StatusTransition::Reporter),
            (Submitted, Reviewed) | (Submitted, Approved) | (Submitted, Rejected) => {
                Some(StatusTransition::Reviewer)
            }
            (Reviewed, Approved) | (Reviewed, Rejected) => Some(StatusTransition::Reviewer),
            _ => None,
        }
    }
}

impl TryFrom<String> for ReportStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ReportStatus::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or(UnknownStatus(value))
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporter_only_submits_drafts() {
        assert_eq!(
            ReportStatus::Draft.transition_to(ReportStatus::Submitted),
            Some(StatusTransition::Reporter)
        );
        assert_eq!(ReportStatus::Draft.transition_to(ReportStatus::Approved), None);
    }

    #[test]
    fn reviewers_close_submitted_and_reviewed_reports() {
        for next in [ReportStatus::Reviewed, ReportStatus::Approved, ReportStatus::Rejected] {
            assert_eq!(
                ReportStatus::Submitted.transition_to(next),
                Some(StatusTransition::Reviewer)
            );
        }
        assert_eq!(
            ReportStatus::Reviewed.transition_to(ReportStatus::Approved),
            Some(StatusTransition::Reviewer)
        );
        assert_eq!(ReportStatus::Reviewed.transition_to(ReportStatus::Submitted), None);
    }

    #[test]
    fn final_states_are_terminal() {
        for from in [ReportStatus::Approved, ReportStatus::Rejected] {
            for next in ReportStatus::ALL {
                assert_eq!(from.transition_to(next), None, "{} -> {}", from, next);
            }
        }
    }

    #[test]
    fn parses_stored_status() {
        assert_eq!(
            ReportStatus::try_from("reviewed".to_string()).unwrap(),
            ReportStatus::Reviewed
        );
        assert!(ReportStatus::try_from("archived".to_string()).is_err());
    }
}
