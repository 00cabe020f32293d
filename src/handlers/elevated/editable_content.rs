// handlers/elevated/editable_content.rs - /admin/editable-content
//
// Blocks are addressed either by id (/id/:id) or by their natural key
// (/key/:page_slug/:block_key); both forms share the handlers below.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::Identity;
use crate::database::models::{EditableContent, EditableContentCreate, EditableContentUpdate};
use crate::error::ApiError;
use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::services::BlockRef;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "pageSlug")]
    pub page_slug: Option<String>,
}

/// POST /admin/editable-content
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<EditableContentCreate>, JsonRejection>,
) -> ApiResult<EditableContent> {
    let Json(input) = payload?;
    input.validate()?;

    let block = state.editable_content().create(input).await?;
    info!(
        admin = %admin,
        page_slug = %block.page_slug,
        block_key = %block.block_key,
        "Content block created"
    );
    Ok(ApiResponse::created(block))
}

/// GET /admin/editable-content?pageSlug=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<EditableContent>> {
    let blocks = state
        .editable_content()
        .list(params.page_slug.as_deref())
        .await?;
    Ok(ApiResponse::success(blocks))
}

/// GET /admin/editable-content/id/:id
pub async fn show_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EditableContent> {
    show(&state, BlockRef::Id(&id)).await
}

/// GET /admin/editable-content/key/:page_slug/:block_key
pub async fn show_by_key(
    State(state): State<AppState>,
    Path((page_slug, block_key)): Path<(String, String)>,
) -> ApiResult<EditableContent> {
    show(&state, by_key(&page_slug, &block_key)).await
}

/// PUT /admin/editable-content/id/:id
pub async fn update_by_id(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    payload: Result<Json<EditableContentUpdate>, JsonRejection>,
) -> ApiResult<EditableContent> {
    update(&state, &admin, BlockRef::Id(&id), payload).await
}

/// PUT /admin/editable-content/key/:page_slug/:block_key
pub async fn update_by_key(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path((page_slug, block_key)): Path<(String, String)>,
    payload: Result<Json<EditableContentUpdate>, JsonRejection>,
) -> ApiResult<EditableContent> {
    update(&state, &admin, by_key(&page_slug, &block_key), payload).await
}

/// DELETE /admin/editable-content/id/:id
pub async fn delete_by_id(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    delete(&state, &admin, BlockRef::Id(&id)).await
}

/// DELETE /admin/editable-content/key/:page_slug/:block_key
pub async fn delete_by_key(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path((page_slug, block_key)): Path<(String, String)>,
) -> ApiResult<()> {
    delete(&state, &admin, by_key(&page_slug, &block_key)).await
}

fn by_key<'a>(page_slug: &'a str, block_key: &'a str) -> BlockRef<'a> {
    BlockRef::Key {
        page_slug,
        block_key,
    }
}

async fn show(state: &AppState, block: BlockRef<'_>) -> ApiResult<EditableContent> {
    let content = state.editable_content().get(block).await?;
    Ok(ApiResponse::success(content))
}

async fn update(
    state: &AppState,
    admin: &Identity,
    block: BlockRef<'_>,
    payload: Result<Json<EditableContentUpdate>, JsonRejection>,
) -> ApiResult<EditableContent> {
    let Json(input) = payload?;
    if input.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let content = state.editable_content().update(block, input).await?;
    info!(admin = %admin, id = %content.id, "Content block updated");
    Ok(ApiResponse::success(content))
}

async fn delete(
    state: &AppState,
    admin: &Identity,
    block: BlockRef<'_>,
) -> ApiResult<()> {
    state.editable_content().delete(block).await?;
    info!(admin = %admin, block = ?block, "Content block deleted");
    Ok(ApiResponse::no_content())
}
