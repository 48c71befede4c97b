// handlers/public/auth/session.rs - GET /api/session handler

use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult, AuthUser, MaybeUser};

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

/// GET /api/session - Report whether the caller carries a usable session.
/// Invalid or expired credentials answer `authenticated: false`, not 401.
pub async fn session(MaybeUser(user): MaybeUser) -> ApiResult<SessionInfo> {
    Ok(ApiResponse::success(SessionInfo {
        authenticated: user.is_some(),
        user,
    }))
}
