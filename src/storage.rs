pub mod database;
pub mod error;
pub mod migrations;
pub mod models;
pub mod repository;

pub use database::{health_check, init_db_pool, DatabasePool};
pub use error::{StorageError, StorageResult};
pub use migrations::run_migrations;
pub use models::CHECK_IN_TABLE;
pub use repository::{replace_rows, CheckInRepository};
