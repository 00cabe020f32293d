// handlers/elevated/mod.rs - Elevated handlers (AdminGate required)
//
// Every route in this tier sits behind admin_gate_middleware, so handlers
// receive the AdminUser it resolved. The gate only opens in mock mode and only
// for the configured admin identity.

pub mod editable_content;
pub mod page_seo;
pub mod site_settings;
