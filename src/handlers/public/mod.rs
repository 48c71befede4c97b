// handlers/public/mod.rs - Public handlers (no session required)
//
// Token acquisition plus the endpoints that degrade gracefully without a
// session. Optional-session handlers take `MaybeUser` and never reject on a
// missing or invalid credential.

pub mod auth;
pub mod catalog;

pub use auth::*;
pub use catalog::courses_list;
