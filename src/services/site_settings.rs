use sqlx::PgPool;

use crate::database::models::{SiteSetting, SiteSettingCreate, SiteSettingUpdate};
use crate::database::{DatabaseError, Repository};

const TABLE: &str = "SiteSetting";

/// Key/value settings, addressed by their unique key
pub struct SiteSettingsService {
    repo: Repository<SiteSetting>,
}

impl SiteSettingsService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new(TABLE, pool),
        }
    }

    pub async fn create(&self, input: SiteSettingCreate) -> Result<SiteSetting, DatabaseError> {
        let key = input.key.clone();
        self.repo
            .insert(
                vec![("key", Some(input.key)), ("value", input.value)],
                || format!("Site setting '{}' already exists", key),
            )
            .await
    }

    pub async fn list(&self) -> Result<Vec<SiteSetting>, DatabaseError> {
        self.repo.select_any(&[]).await
    }

    pub async fn get(&self, key: &str) -> Result<SiteSetting, DatabaseError> {
        self.repo
            .select_404(&[("key", key)], || missing(key))
            .await
    }

    pub async fn update(
        &self,
        key: &str,
        input: SiteSettingUpdate,
    ) -> Result<SiteSetting, DatabaseError> {
        self.repo
            .update_404(vec![("value", input.value)], &[("key", key)], || missing(key))
            .await
    }

    pub async fn delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.repo.delete_404(&[("key", key)], || missing(key)).await
    }
}

fn missing(key: &str) -> String {
    format!("Site setting '{}' not found", key)
}
