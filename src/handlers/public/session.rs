// handlers/public/session.rs - GET /api/auth/session

use serde::Serialize;

use crate::auth::Identity;
use crate::middleware::{ApiResponse, OptionalUser};

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub user_id: Option<Identity>,
}

/// Never fails; anonymous callers get `authenticated: false`
pub async fn session_get(OptionalUser(user): OptionalUser) -> ApiResponse<SessionInfo> {
    ApiResponse::success(SessionInfo {
        authenticated: user.is_some(),
        user_id: user,
    })
}
