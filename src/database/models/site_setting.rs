use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ValidationError, Validator};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct SiteSetting {
    pub id: String,
    pub key: String,
    pub value: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettingCreate {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl SiteSettingCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::default().required("key", &self.key).finish()
    }
}

/// The key is immutable; only the value can change, and `null` clears it
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettingUpdate {
    #[serde(default)]
    pub value: Option<String>,
}
