pub mod editable_content;
pub mod page_seo;
pub mod site_setting;

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use thiserror::Error;

pub use editable_content::{EditableContent, EditableContentCreate, EditableContentUpdate};
pub use page_seo::{PageSeo, PageSeoCreate, PageSeoUpdate};
pub use site_setting::{SiteSetting, SiteSettingCreate, SiteSettingUpdate};

/// Payload rejected before it reaches the database
#[derive(Debug, Error)]
#[error("Invalid request payload")]
pub struct ValidationError {
    pub field_errors: HashMap<String, String>,
}

/// Collects per-field problems while checking a payload
#[derive(Default)]
pub(crate) struct Validator {
    field_errors: HashMap<String, String>,
}

impl Validator {
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.field_errors
                .insert(field.to_string(), "This field is required".to_string());
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.field_errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                field_errors: self.field_errors,
            })
        }
    }
}

/// Distinguishes an explicit `null` (Some(None)) from an absent field (None)
pub(crate) fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
