// handlers/protected/threads.rs - thread access and event stream
//
// GET /api/threads/:thread_id/access
// GET /api/threads/:thread_id/stream?token=

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use serde_json::json;

use crate::auth::{Grant, Identity};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, StreamUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ThreadAccess {
    pub thread_id: String,
    pub user_id: Identity,
    pub grant: Grant,
    /// `None` for a public thread that belongs to no account
    pub account_id: Option<String>,
}

pub async fn thread_access_get(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(thread_id): Path<String>,
) -> ApiResult<ThreadAccess> {
    let (grant, account_id) = state
        .auth
        .threads
        .require_access_with_account(&thread_id, &user_id)
        .await?;

    Ok(ApiResponse::success(ThreadAccess {
        thread_id,
        user_id,
        grant,
        account_id,
    }))
}

/// Opens the stream with a `ready` event once access is confirmed
pub async fn thread_stream_get(
    State(state): State<AppState>,
    StreamUser(user_id): StreamUser,
    Path(thread_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    state
        .auth
        .threads
        .require_access(&thread_id, &user_id)
        .await?;

    tracing::info!(thread_id = %thread_id, user_id = %user_id, "Opening thread stream");

    let ready = Event::default()
        .event("ready")
        .json_data(json!({ "thread_id": thread_id, "user_id": user_id }));

    let events = stream::once(async move { ready }).chain(stream::pending());
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
