//! Infrastructure Layer
//!
//! Database implementations of the account repository.

pub mod postgres;
mod row;
pub mod sqlite;

pub use postgres::PgAccountRepository;
pub use sqlite::SqliteAccountRepository;
