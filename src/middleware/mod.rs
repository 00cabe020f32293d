pub mod auth;
pub mod response;

pub use auth::{admin_gate_middleware, AdminUser, CurrentUser, OptionalUser, StreamUser};
pub use response::{ApiResponse, ApiResult};
