use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ValidationError, Validator};

pub const DEFAULT_CONTENT_TYPE: &str = "text";

/// A content block, unique per (page_slug, block_key)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct EditableContent {
    pub id: String,
    pub page_slug: String,
    pub block_key: String,
    pub content: String,
    pub content_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableContentCreate {
    pub page_slug: String,
    pub block_key: String,
    pub content: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

impl EditableContentCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::default()
            .required("pageSlug", &self.page_slug)
            .required("blockKey", &self.block_key)
            .finish()
    }
}

/// Page slug and block key never change through an update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableContentUpdate {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl EditableContentUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.content_type.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_type_defaults_to_text() {
        let create: EditableContentCreate = serde_json::from_value(json!({
            "pageSlug": "home",
            "blockKey": "hero",
            "content": "Welcome"
        }))
        .unwrap();
        assert_eq!(create.content_type, "text");
        assert!(create.validate().is_ok());
    }

    #[test]
    fn create_reports_every_missing_key() {
        let create: EditableContentCreate = serde_json::from_value(json!({
            "pageSlug": "",
            "blockKey": "",
            "content": ""
        }))
        .unwrap();
        let err = create.validate().unwrap_err();
        assert_eq!(err.field_errors.len(), 2);
    }
}
