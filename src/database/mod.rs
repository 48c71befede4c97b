pub mod courses;
pub mod manager;
pub mod models;
pub mod ratings;
pub mod reports;
pub mod store;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use store::PgAccessStore;
