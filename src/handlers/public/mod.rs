// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Health checks, session introspection and the published page content the
// site renders for anonymous visitors.

pub mod content;
pub mod health;
pub mod session;

pub use content::{content_by_key, content_for_page, seo_for_page};
pub use health::{health, root};
pub use session::session_get;
