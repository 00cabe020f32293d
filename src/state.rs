use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::{AccessStore, AuthService};
use crate::config::AppConfig;
use crate::database::PgAccessStore;
use crate::services::{EditableContentService, PageSeoService, SiteSettingsService};

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub pool: PgPool,
}

impl AppState {
    /// Thread access checks go to Postgres through the same pool
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let store = Arc::new(PgAccessStore::new(pool.clone()));
        Self::with_store(config, pool, store)
    }

    pub fn with_store(config: AppConfig, pool: PgPool, store: Arc<dyn AccessStore>) -> Self {
        let auth = AuthService::new(Arc::new(config.auth.clone()), store);
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            pool,
        }
    }

    pub fn site_settings(&self) -> SiteSettingsService {
        SiteSettingsService::new(self.pool.clone())
    }

    pub fn page_seo(&self) -> PageSeoService {
        PageSeoService::new(self.pool.clone())
    }

    pub fn editable_content(&self) -> EditableContentService {
        EditableContentService::new(self.pool.clone())
    }
}
