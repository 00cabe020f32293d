use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{explicit_null, ValidationError, Validator};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct PageSeo {
    pub id: String,
    pub page_slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Comma-separated
    pub keywords: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSeoCreate {
    pub page_slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl PageSeoCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::default().required("pageSlug", &self.page_slug).finish()
    }
}

/// Partial update; absent fields are left alone, `null` clears
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageSeoUpdate {
    #[serde(default, deserialize_with = "explicit_null")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub keywords: Option<Option<String>>,
}

impl PageSeoUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.keywords.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_tells_null_from_absent() {
        let update: PageSeoUpdate =
            serde_json::from_value(json!({ "title": null, "keywords": "a,b" })).unwrap();
        assert_eq!(update.title, Some(None));
        assert_eq!(update.description, None);
        assert_eq!(update.keywords, Some(Some("a,b".to_string())));
        assert!(!update.is_empty());

        let empty: PageSeoUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn create_requires_slug() {
        let create: PageSeoCreate = serde_json::from_value(json!({ "pageSlug": " " })).unwrap();
        let err = create.validate().unwrap_err();
        assert!(err.field_errors.contains_key("pageSlug"));
    }
}
