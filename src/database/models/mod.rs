pub mod course;
pub mod rating;
pub mod report;
pub mod user;

pub use course::{Course, Stream};
pub use rating::{CourseRatingSummary, Rating};
pub use report::{Report, ReportStatus, StatusTransition};
pub use user::User;
