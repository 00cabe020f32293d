// handlers/elevated/site_settings.rs - /admin/site-settings

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::info;

use crate::database::models::{SiteSetting, SiteSettingCreate, SiteSettingUpdate};
use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /admin/site-settings
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<SiteSettingCreate>, JsonRejection>,
) -> ApiResult<SiteSetting> {
    let Json(input) = payload?;
    input.validate()?;

    let setting = state.site_settings().create(input).await?;
    info!(admin = %admin, key = %setting.key, "Site setting created");
    Ok(ApiResponse::created(setting))
}

/// GET /admin/site-settings
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<SiteSetting>> {
    let settings = state.site_settings().list().await?;
    Ok(ApiResponse::success(settings))
}

/// GET /admin/site-settings/:key
pub async fn show(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<SiteSetting> {
    let setting = state.site_settings().get(&key).await?;
    Ok(ApiResponse::success(setting))
}

/// PUT /admin/site-settings/:key
pub async fn update(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(key): Path<String>,
    payload: Result<Json<SiteSettingUpdate>, JsonRejection>,
) -> ApiResult<SiteSetting> {
    let Json(input) = payload?;

    let setting = state.site_settings().update(&key, input).await?;
    info!(admin = %admin, key = %key, "Site setting updated");
    Ok(ApiResponse::success(setting))
}

/// DELETE /admin/site-settings/:key
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(key): Path<String>,
) -> ApiResult<()> {
    state.site_settings().delete(&key).await?;
    info!(admin = %admin, key = %key, "Site setting deleted");
    Ok(ApiResponse::no_content())
}
