// handlers/elevated/page_seo.rs - /admin/page-seo

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::info;

use crate::database::models::{PageSeo, PageSeoCreate, PageSeoUpdate};
use crate::error::ApiError;
use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /admin/page-seo
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<PageSeoCreate>, JsonRejection>,
) -> ApiResult<PageSeo> {
    let Json(input) = payload?;
    input.validate()?;

    let seo = state.page_seo().create(input).await?;
    info!(admin = %admin, page_slug = %seo.page_slug, "Page SEO created");
    Ok(ApiResponse::created(seo))
}

/// GET /admin/page-seo
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<PageSeo>> {
    let entries = state.page_seo().list().await?;
    Ok(ApiResponse::success(entries))
}

/// GET /admin/page-seo/:page_slug
pub async fn show(
    State(state): State<AppState>,
    Path(page_slug): Path<String>,
) -> ApiResult<PageSeo> {
    let seo = state.page_seo().get(&page_slug).await?;
    Ok(ApiResponse::success(seo))
}

/// PUT /admin/page-seo/:page_slug
pub async fn update(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(page_slug): Path<String>,
    payload: Result<Json<PageSeoUpdate>, JsonRejection>,
) -> ApiResult<PageSeo> {
    let Json(input) = payload?;
    if input.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let seo = state.page_seo().update(&page_slug, input).await?;
    info!(admin = %admin, page_slug = %page_slug, "Page SEO updated");
    Ok(ApiResponse::success(seo))
}

/// DELETE /admin/page-seo/:page_slug
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(page_slug): Path<String>,
) -> ApiResult<()> {
    state.page_seo().delete(&page_slug).await?;
    info!(admin = %admin, page_slug = %page_slug, "Page SEO deleted");
    Ok(ApiResponse::no_content())
}
