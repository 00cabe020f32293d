//! Identity resolution and access control.
//!
//! Everything here reads a shared, immutable [`AuthConfig`]. In mock mode the
//! configured mock user stands in for every caller; otherwise identities come
//! from bearer token claims.

pub mod admin;
pub mod error;
pub mod identity;
pub mod resolver;
pub mod stream;
pub mod thread_access;
pub mod token;

use std::sync::Arc;

use crate::config::AuthConfig;

pub use admin::AdminGate;
pub use error::AuthError;
pub use identity::Identity;
pub use resolver::IdentityResolver;
pub use stream::StreamIdentityResolver;
pub use thread_access::{AccessDecision, AccessStore, DenyReason, Grant, ThreadAccessAuthorizer};
pub use token::{Claims, TokenDecoder, TokenError};

/// All auth components wired to one config and one access store
#[derive(Clone)]
pub struct AuthService {
    pub identity: IdentityResolver,
    pub stream: StreamIdentityResolver,
    pub admin: AdminGate,
    pub threads: ThreadAccessAuthorizer,
}

impl AuthService {
    pub fn new(config: Arc<AuthConfig>, store: Arc<dyn AccessStore>) -> Self {
        let decoder = TokenDecoder::from_policy(&config.signature_policy);
        let identity = IdentityResolver::new(config.clone(), decoder);

        Self {
            stream: StreamIdentityResolver::new(identity.clone()),
            admin: AdminGate::new(identity.clone()),
            threads: ThreadAccessAuthorizer::new(config, store),
            identity,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        self.identity.config()
    }
}
