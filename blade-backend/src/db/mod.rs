mod sqlite;
pub mod tables;

pub use sqlite::{Database, DbError, DbResult};
