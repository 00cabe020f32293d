use axum::http::HeaderMap;
use tracing::{info, warn};

use super::{AuthError, Identity, IdentityResolver};

/// Gate for the admin routes.
///
/// Only open in mock mode, and only to the configured admin identity. There is
/// no admin path for real tokens.
#[derive(Clone)]
pub struct AdminGate {
    resolver: IdentityResolver,
}

impl AdminGate {
    pub fn new(resolver: IdentityResolver) -> Self {
        Self { resolver }
    }

    pub fn resolve_admin(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let config = self.resolver.config();
        if !config.mock_auth_enabled {
            warn!("Admin endpoint accessed while mock auth is disabled, denying access");
            return Err(AuthError::AdminDisabled);
        }

        let identity = self.resolver.resolve_from_request(headers)?;
        if identity == config.admin_identity {
            info!(user_id = %identity, "Admin access granted");
            Ok(identity)
        } else {
            warn!(
                user_id = %identity,
                admin_id = %config.admin_identity,
                "Admin access denied"
            );
            Err(AuthError::NotAuthorized("admin access"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenDecoder;
    use crate::config::AuthConfig;
    use crate::testing::{bearer_headers, mint_token};
    use serde_json::json;
    use std::sync::Arc;

    fn gate(config: AuthConfig) -> AdminGate {
        AdminGate::new(IdentityResolver::new(Arc::new(config), TokenDecoder::unverified()))
    }

    #[test]
    fn disabled_outside_mock_mode_regardless_of_token() {
        let gate = gate(AuthConfig::default());
        let admin_token = mint_token(json!({ "sub": "mock-user-id-backend" }));

        for headers in [HeaderMap::new(), bearer_headers(&admin_token)] {
            let err = gate.resolve_admin(&headers).unwrap_err();
            assert!(matches!(err, AuthError::AdminDisabled));
        }
    }

    #[test]
    fn mock_user_is_admin_by_default() {
        let gate = gate(AuthConfig::mock());
        let identity = gate.resolve_admin(&HeaderMap::new()).unwrap();
        assert_eq!(identity, "mock-user-id-backend");
    }

    #[test]
    fn mock_user_other_than_admin_is_refused() {
        let gate = gate(AuthConfig {
            admin_identity: Identity::from("site-owner"),
            ..AuthConfig::mock()
        });

        let err = gate.resolve_admin(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AuthError::NotAuthorized(_)));
    }
}
