//! Faculty role hierarchy.
//!
//! Every "outranks" comparison in the service goes through [`Role::rank`]:
//!
//! | role                 | rank |
//! |----------------------|------|
//! | `student`            | 1    |
//! | `lecturer`           | 2    |
//! | `program_leader`     | 3    |
//! | `principal_lecturer` | 4    |
//! | `faculty_manager`    | 5    |
//! | anything else        | 0    |

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Lecturer,
    ProgramLeader,
    PrincipalLecturer,
    FacultyManager,
    /// A role string stored in the database that this service does not know.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Known roles in ascending rank order.
    pub const ALL: [Role; 5] = [
        Role::Student,
        Role::Lecturer,
        Role::ProgramLeader,
        Role::PrincipalLecturer,
        Role::FacultyManager,
    ];

    pub fn rank(self) -> u8 {
        match self {
            Role::Student => 1,
            Role::Lecturer => 2,
            Role::ProgramLeader => 3,
            Role::PrincipalLecturer => 4,
            Role::FacultyManager => 5,
            Role::Unknown => 0,
        }
    }

    /// Strictly higher rank. Equal ranks never outrank each other.
    pub fn outranks(self, other: Role) -> bool {
        self.rank() > other.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Lecturer => "lecturer",
            Role::ProgramLeader => "program_leader",
            Role::PrincipalLecturer => "principal_lecturer",
            Role::FacultyManager => "faculty_manager",
            Role::Unknown => "unknown",
        }
    }

    /// Parse a stored role string; unrecognised values become [`Role::Unknown`].
    pub fn parse(value: &str) -> Role {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .unwrap_or(Role::Unknown)
    }

    /// SQL `CASE` expression computing the rank of a role column.
    ///
    /// Keeps list queries in step with [`Role::rank`] without a lookup table
    /// in the database.
    pub fn rank_sql(column: &str) -> String {
        let arms: String = Role::ALL
            .iter()
            .map(|role| format!(" WHEN '{}' THEN {}", role.as_str(), role.rank()))
            .collect();
        format!("(CASE {}{} ELSE 0 END)", column, arms)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::parse(value)
    }
}

// Lets `#[sqlx(try_from = "String")]` decode TEXT role columns.
impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}
