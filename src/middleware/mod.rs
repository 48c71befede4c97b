pub mod auth;
pub mod response;

pub use auth::{authenticate, authenticate_optional, AuthUser, MaybeUser};
pub use response::{ApiResponse, ApiResult};
