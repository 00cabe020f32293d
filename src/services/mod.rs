pub mod editable_content;
pub mod page_seo;
pub mod site_settings;

pub use editable_content::{BlockRef, EditableContentService};
pub use page_seo::PageSeoService;
pub use site_settings::SiteSettingsService;
