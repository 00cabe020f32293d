use axum::{
    extract::{FromRef, FromRequestParts, Query, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::convert::Infallible;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

/// Caller resolved from the Authorization header, or the mock user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let identity = state.auth.identity.resolve_from_request(&parts.headers)?;
        Ok(CurrentUser(identity))
    }
}

/// Optional user extractor - doesn't fail if user is not authenticated
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Identity>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        Ok(OptionalUser(state.auth.identity.resolve_optional(&parts.headers)))
    }
}

/// Caller that passed the admin gate
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by admin_gate_middleware
        if let Some(admin) = parts.extensions.get::<AdminUser>() {
            return Ok(admin.clone());
        }

        let state = AppState::from_ref(state);
        let identity = state.auth.admin.resolve_admin(&parts.headers)?;
        Ok(AdminUser(identity))
    }
}

#[derive(Debug, Default, Deserialize)]
struct StreamParams {
    token: Option<String>,
}

/// Caller of a streaming endpoint; EventSource clients pass `?token=`
#[derive(Debug, Clone)]
pub struct StreamUser(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for StreamUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let params = Query::<StreamParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();

        let identity = state
            .auth
            .stream
            .resolve_for_stream(&parts.headers, params.token.as_deref())?;
        Ok(StreamUser(identity))
    }
}

/// Rejects every request under the admin router that fails the admin gate
pub async fn admin_gate_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = state.auth.admin.resolve_admin(request.headers())?;
    request.extensions_mut().insert(AdminUser(identity));
    Ok(next.run(request).await)
}
