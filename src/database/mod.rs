pub mod access;
pub mod manager;
pub mod models;
pub mod repository;

pub use access::PgAccessStore;
pub use manager::{connect_lazy, health_check, DatabaseError};
pub use repository::Repository;
