// handlers/protected/mod.rs - Protected handlers (valid session required)
//
// Every handler here takes `AuthUser`, so a missing, invalid or expired
// bearer credential is rejected with 401 before the handler body runs.
// Route-level role allow-lists and ownership checks come from
// `crate::auth::access`.

pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod ratings;
pub mod reports;
pub mod streams;
pub mod users;

pub use auth::*;
