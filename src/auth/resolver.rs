use axum::http::{header::AUTHORIZATION, HeaderMap};
use std::sync::Arc;
use tracing::debug;

use super::identity::record_identity;
use super::token::{bearer_token, TokenDecoder};
use super::{AuthError, Identity};
use crate::config::AuthConfig;

/// Resolves the calling user from request headers.
///
/// In mock mode every call yields the configured mock user without looking at
/// the headers. Otherwise the identity is the `sub` claim of the bearer token.
#[derive(Clone)]
pub struct IdentityResolver {
    config: Arc<AuthConfig>,
    decoder: TokenDecoder,
}

impl IdentityResolver {
    pub fn new(config: Arc<AuthConfig>, decoder: TokenDecoder) -> Self {
        Self { config, decoder }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn resolve_from_request(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        if self.config.mock_auth_enabled {
            return Ok(self.mock_user());
        }

        let token = bearer_token(headers).ok_or(AuthError::MissingCredentials)?;
        let identity = self.identity_from_token(token)?;

        record_identity(&identity);
        Ok(identity)
    }

    /// Like [`resolve_from_request`](Self::resolve_from_request) but absent
    /// credentials and undecodable tokens both yield `None`.
    pub fn resolve_optional(&self, headers: &HeaderMap) -> Option<Identity> {
        if self.config.mock_auth_enabled {
            // Any Authorization header at all stands in for the mock user
            return headers.get(AUTHORIZATION).map(|_| self.mock_user());
        }

        let token = bearer_token(headers)?;
        match self.identity_from_token(token) {
            Ok(identity) => {
                record_identity(&identity);
                Some(identity)
            }
            Err(e) => {
                debug!("Ignoring unusable optional credentials: {}", e);
                None
            }
        }
    }

    /// Decode a raw token and pull out its subject
    pub(crate) fn identity_from_token(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.decoder.decode(token).map_err(|e| {
            debug!("Token rejected: {}", e);
            AuthError::from(e)
        })?;

        claims.subject().ok_or(AuthError::InvalidToken)
    }

    pub(crate) fn mock_user(&self) -> Identity {
        let identity = self.config.mock_user_id.clone();
        debug!(user_id = %identity, "Mock auth enabled, returning mock user");
        record_identity(&identity);
        identity
    }
}
