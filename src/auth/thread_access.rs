use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{AuthError, Identity};
use crate::config::AuthConfig;
use crate::database::DatabaseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRecord {
    pub thread_id: String,
    pub account_id: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub project_id: String,
    pub is_public: bool,
}

/// Exact-match lookups the authorizer needs from the thread store
#[async_trait]
pub trait AccessStore: Send + Sync {
    async fn find_thread(&self, thread_id: &str) -> Result<Option<ThreadRecord>, DatabaseError>;

    async fn find_project(&self, project_id: &str) -> Result<Option<ProjectRecord>, DatabaseError>;

    /// Role of `identity` within `account_id`, if it is a member
    async fn find_membership_role(
        &self,
        identity: &Identity,
        account_id: &str,
    ) -> Result<Option<String>, DatabaseError>;
}

/// Why access was granted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Grant {
    MockUser,
    PublicProject { project_id: String },
    AccountMember { account_id: String, role: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenyReason {
    /// Not public and no account to be a member of
    NoAccount,
    NotMember { account_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Granted(Grant),
    Denied { reason: DenyReason },
    NotFound,
}

impl AccessDecision {
    pub fn into_result(self) -> Result<Grant, AuthError> {
        match self {
            AccessDecision::Granted(grant) => Ok(grant),
            AccessDecision::Denied { .. } => Err(AuthError::NotAuthorized("this thread")),
            AccessDecision::NotFound => Err(AuthError::ThreadNotFound),
        }
    }
}

/// Decides whether an identity may act on a thread.
///
/// Rules, first match wins: the thread's project is public, then the identity
/// is a member of the thread's account. In mock mode the mock user is let
/// through without touching the store.
#[derive(Clone)]
pub struct ThreadAccessAuthorizer {
    config: Arc<AuthConfig>,
    store: Arc<dyn AccessStore>,
}

impl ThreadAccessAuthorizer {
    pub fn new(config: Arc<AuthConfig>, store: Arc<dyn AccessStore>) -> Self {
        Self { config, store }
    }

    pub async fn authorize(
        &self,
        thread_id: &str,
        identity: &Identity,
    ) -> Result<AccessDecision, DatabaseError> {
        if self.is_mock_user(identity) {
            debug!(thread_id, "Mock auth enabled, granting thread access to mock user");
            return Ok(AccessDecision::Granted(Grant::MockUser));
        }

        let Some(thread) = self.store.find_thread(thread_id).await? else {
            debug!(thread_id, "Thread not found");
            return Ok(AccessDecision::NotFound);
        };

        self.decide(thread, identity).await
    }

    /// [`require_access`](Self::require_access) that also returns the thread's
    /// account, reading the thread once
    pub async fn require_access_with_account(
        &self,
        thread_id: &str,
        identity: &Identity,
    ) -> Result<(Grant, Option<String>), AuthError> {
        if self.is_mock_user(identity) {
            debug!(thread_id, "Mock auth enabled, granting thread access to mock user");
            return Ok((Grant::MockUser, Some(self.config.mock_account_id.clone())));
        }

        let thread = self
            .store
            .find_thread(thread_id)
            .await?
            .ok_or(AuthError::ThreadNotFound)?;
        let account_id = thread.account_id.clone();

        let grant = self.decide(thread, identity).await?.into_result()?;
        Ok((grant, account_id))
    }

    fn is_mock_user(&self, identity: &Identity) -> bool {
        self.config.mock_auth_enabled && *identity == self.config.mock_user_id
    }

    async fn decide(
        &self,
        thread: ThreadRecord,
        identity: &Identity,
    ) -> Result<AccessDecision, DatabaseError> {
        let thread_id = thread.thread_id.as_str();

        if let Some(project_id) = thread.project_id.as_deref() {
            let public = self
                .store
                .find_project(project_id)
                .await?
                .map(|project| project.is_public)
                .unwrap_or(false);
            if public {
                info!(thread_id, project_id, user_id = %identity, "Thread access granted: public project");
                return Ok(AccessDecision::Granted(Grant::PublicProject {
                    project_id: project_id.to_string(),
                }));
            }
        }

        let Some(account_id) = thread.account_id else {
            warn!(thread_id, user_id = %identity, "Thread access denied: no account and not public");
            return Ok(AccessDecision::Denied {
                reason: DenyReason::NoAccount,
            });
        };

        match self.store.find_membership_role(identity, &account_id).await? {
            Some(role) => {
                info!(thread_id, account_id = %account_id, user_id = %identity, "Thread access granted: account member");
                Ok(AccessDecision::Granted(Grant::AccountMember {
                    account_id,
                    role: Some(role).filter(|r| !r.is_empty()),
                }))
            }
            None => {
                warn!(thread_id, account_id = %account_id, user_id = %identity, "Thread access denied: not a member");
                Ok(AccessDecision::Denied {
                    reason: DenyReason::NotMember { account_id },
                })
            }
        }
    }

    /// [`authorize`](Self::authorize) with denials and misses turned into errors
    pub async fn require_access(
        &self,
        thread_id: &str,
        identity: &Identity,
    ) -> Result<Grant, AuthError> {
        self.authorize(thread_id, identity).await?.into_result()
    }

    /// Account owning a thread; the mock account in mock mode
    pub async fn account_for_thread(&self, thread_id: &str) -> Result<String, AuthError> {
        if self.config.mock_auth_enabled {
            debug!(thread_id, "Mock auth enabled, returning mock account");
            return Ok(self.config.mock_account_id.clone());
        }

        let thread = self
            .store
            .find_thread(thread_id)
            .await?
            .ok_or(AuthError::ThreadNotFound)?;

        thread.account_id.ok_or(AuthError::ThreadWithoutAccount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryAccessStore;

    fn authorizer(config: AuthConfig, store: &Arc<MemoryAccessStore>) -> ThreadAccessAuthorizer {
        let store: Arc<dyn AccessStore> = store.clone();
        ThreadAccessAuthorizer::new(Arc::new(config), store)
    }

    #[tokio::test]
    async fn member_of_thread_account_is_granted() {
        let store = Arc::new(
            MemoryAccessStore::new()
                .with_thread("t1", Some("a1"), None)
                .with_member("u1", "a1", "owner"),
        );
        let auth = authorizer(AuthConfig::default(), &store);

        let decision = auth.authorize("t1", &Identity::from("u1")).await.unwrap();
        assert_eq!(
            decision,
            AccessDecision::Granted(Grant::AccountMember {
                account_id: "a1".into(),
                role: Some("owner".into()),
            })
        );
    }

    #[tokio::test]
    async fn public_project_grants_without_membership() {
        let store = Arc::new(
            MemoryAccessStore::new()
                .with_thread("t2", Some("a1"), Some("p1"))
                .with_project("p1", true),
        );
        let auth = authorizer(AuthConfig::default(), &store);

        let decision = auth.authorize("t2", &Identity::from("stranger")).await.unwrap();
        assert_eq!(
            decision,
            AccessDecision::Granted(Grant::PublicProject { project_id: "p1".into() })
        );
        // Membership never consulted after the public grant
        assert_eq!(store.lookups(), 2);
    }

    #[tokio::test]
    async fn private_project_without_membership_is_denied() {
        let store = Arc::new(
            MemoryAccessStore::new()
                .with_thread("t3", Some("a1"), Some("p2"))
                .with_project("p2", false)
                .with_member("u1", "a9", "member"),
        );
        let auth = authorizer(AuthConfig::default(), &store);

        let decision = auth.authorize("t3", &Identity::from("u1")).await.unwrap();
        assert_eq!(
            decision,
            AccessDecision::Denied {
                reason: DenyReason::NotMember { account_id: "a1".into() }
            }
        );

        let err = auth.require_access("t3", &Identity::from("u1")).await.unwrap_err();
        assert!(matches!(err, AuthError::NotAuthorized(_)));
    }

    #[tokio::test]
    async fn missing_project_record_falls_through_to_membership() {
        let store = Arc::new(
            MemoryAccessStore::new()
                .with_thread("t4", Some("a1"), Some("gone"))
                .with_member("u1", "a1", "member"),
        );
        let auth = authorizer(AuthConfig::default(), &store);

        let decision = auth.authorize("t4", &Identity::from("u1")).await.unwrap();
        assert!(matches!(decision, AccessDecision::Granted(Grant::AccountMember { .. })));
    }

    #[tokio::test]
    async fn thread_without_account_or_project_is_denied() {
        let store = Arc::new(MemoryAccessStore::new().with_thread("t5", None, None));
        let auth = authorizer(AuthConfig::default(), &store);

        let decision = auth.authorize("t5", &Identity::from("u1")).await.unwrap();
        assert_eq!(decision, AccessDecision::Denied { reason: DenyReason::NoAccount });
    }

    #[tokio::test]
    async fn unknown_thread_is_not_found() {
        let store = Arc::new(MemoryAccessStore::new());
        let auth = authorizer(AuthConfig::default(), &store);

        let decision = auth.authorize("nope", &Identity::from("u1")).await.unwrap();
        assert_eq!(decision, AccessDecision::NotFound);

        let err = auth.require_access("nope", &Identity::from("u1")).await.unwrap_err();
        assert!(matches!(err, AuthError::ThreadNotFound));
    }

    #[tokio::test]
    async fn mock_user_skips_the_store() {
        let store = Arc::new(MemoryAccessStore::new());
        let auth = authorizer(AuthConfig::mock(), &store);

        let decision = auth
            .authorize("anything", &Identity::from("mock-user-id-backend"))
            .await
            .unwrap();
        assert_eq!(decision, AccessDecision::Granted(Grant::MockUser));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn mock_mode_still_checks_other_identities() {
        let store = Arc::new(MemoryAccessStore::new().with_thread("t1", Some("a1"), None));
        let auth = authorizer(AuthConfig::mock(), &store);

        let decision = auth.authorize("t1", &Identity::from("u1")).await.unwrap();
        assert!(matches!(decision, AccessDecision::Denied { .. }));
    }

    #[tokio::test]
    async fn account_lookup_follows_mode() {
        let store = Arc::new(
            MemoryAccessStore::new()
                .with_thread("t1", Some("a1"), None)
                .with_thread("orphan", None, None),
        );

        let mock = authorizer(AuthConfig::mock(), &store);
        assert_eq!(mock.account_for_thread("t1").await.unwrap(), "mock-account-id-backend");

        let real = authorizer(AuthConfig::default(), &store);
        assert_eq!(real.account_for_thread("t1").await.unwrap(), "a1");
        assert!(matches!(
            real.account_for_thread("orphan").await.unwrap_err(),
            AuthError::ThreadWithoutAccount
        ));
        assert!(matches!(
            real.account_for_thread("missing").await.unwrap_err(),
            AuthError::ThreadNotFound
        ));
    }

    #[tokio::test]
    async fn access_with_account_reads_the_thread_once() {
        let store = Arc::new(
            MemoryAccessStore::new()
                .with_thread("t1", Some("a1"), None)
                .with_member("u1", "a1", "owner"),
        );
        let auth = authorizer(AuthConfig::default(), &store);

        let (grant, account_id) = auth
            .require_access_with_account("t1", &Identity::from("u1"))
            .await
            .unwrap();
        assert!(matches!(grant, Grant::AccountMember { .. }));
        assert_eq!(account_id.as_deref(), Some("a1"));
        // thread + membership
        assert_eq!(store.lookups(), 2);
    }

    #[tokio::test]
    async fn access_with_account_covers_public_and_mock_threads() {
        let store = Arc::new(
            MemoryAccessStore::new()
                .with_thread("pub", None, Some("p1"))
                .with_project("p1", true),
        );

        let auth = authorizer(AuthConfig::default(), &store);
        let (grant, account_id) = auth
            .require_access_with_account("pub", &Identity::from("anyone"))
            .await
            .unwrap();
        assert!(matches!(grant, Grant::PublicProject { .. }));
        assert_eq!(account_id, None);

        let err = auth
            .require_access_with_account("missing", &Identity::from("anyone"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::ThreadNotFound));

        let mock = authorizer(AuthConfig::mock(), &store);
        let (grant, account_id) = mock
            .require_access_with_account("missing", &Identity::from("mock-user-id-backend"))
            .await
            .unwrap();
        assert_eq!(grant, Grant::MockUser);
        assert_eq!(account_id.as_deref(), Some("mock-account-id-backend"));
    }
}
