// handlers/public/content.rs - published SEO and content blocks
//
// GET /admin/page-seo/public/:page_slug
// GET /admin/editable-content/public/key/:page_slug/:block_key
// GET /admin/editable-content/public/page/:page_slug

use axum::extract::{Path, State};

use crate::database::models::{EditableContent, PageSeo};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::BlockRef;
use crate::state::AppState;

pub async fn seo_for_page(
    State(state): State<AppState>,
    Path(page_slug): Path<String>,
) -> ApiResult<PageSeo> {
    let seo = state.page_seo().get(&page_slug).await?;
    Ok(ApiResponse::success(seo))
}

pub async fn content_by_key(
    State(state): State<AppState>,
    Path((page_slug, block_key)): Path<(String, String)>,
) -> ApiResult<EditableContent> {
    let block = BlockRef::Key {
        page_slug: &page_slug,
        block_key: &block_key,
    };
    let content = state.editable_content().get(block).await?;
    Ok(ApiResponse::success(content))
}

pub async fn content_for_page(
    State(state): State<AppState>,
    Path(page_slug): Path<String>,
) -> ApiResult<Vec<EditableContent>> {
    let blocks = state.editable_content().list(Some(&page_slug)).await?;
    Ok(ApiResponse::success(blocks))
}
