use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/me - The authenticated user as resolved from the users table
pub async fn me(user: AuthUser) -> ApiResult<AuthUser> {
    Ok(ApiResponse::success(user))
}
