use axum::http::HeaderMap;
use tracing::debug;

use super::identity::record_identity;
use super::token::bearer_token;
use super::{AuthError, Identity, IdentityResolver};

/// Identity resolution for server-push connections.
///
/// Browser event streams cannot set headers, so the token usually arrives as
/// a parameter; the `Authorization` header is only the fallback.
#[derive(Clone)]
pub struct StreamIdentityResolver {
    resolver: IdentityResolver,
}

impl StreamIdentityResolver {
    pub fn new(resolver: IdentityResolver) -> Self {
        Self { resolver }
    }

    pub fn resolve_for_stream(
        &self,
        headers: &HeaderMap,
        token_param: Option<&str>,
    ) -> Result<Identity, AuthError> {
        if self.resolver.config().mock_auth_enabled {
            return Ok(self.resolver.mock_user());
        }

        let identity = token_param
            .filter(|token| !token.is_empty())
            .and_then(|token| self.try_token(token, "parameter"))
            .or_else(|| bearer_token(headers).and_then(|token| self.try_token(token, "header")))
            .ok_or(AuthError::MissingCredentials)?;

        record_identity(&identity);
        Ok(identity)
    }

    fn try_token(&self, token: &str, source: &str) -> Option<Identity> {
        match self.resolver.identity_from_token(token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!("Stream token from {} unusable: {}", source, e);
                None
            }
        }
    }
}
