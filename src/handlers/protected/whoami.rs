// handlers/protected/whoami.rs - GET /api/auth/whoami

use axum::extract::State;
use serde::Serialize;

use crate::auth::Identity;
use crate::middleware::{ApiResponse, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub user_id: Identity,
    pub mock_auth: bool,
    pub is_admin: bool,
}

pub async fn whoami_get(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResponse<WhoAmI> {
    let auth = state.auth.config();
    ApiResponse::success(WhoAmI {
        is_admin: auth.mock_auth_enabled && user_id == auth.admin_identity,
        mock_auth: auth.mock_auth_enabled,
        user_id,
    })
}
