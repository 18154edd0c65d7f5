//! Error conversions - From implementations for common error types

#[cfg(feature = "sqlx")]
use super::app_error::AppError;

/// Classification is driver-independent: it goes through
/// [`sqlx::error::ErrorKind`], so Postgres and SQLite constraint failures land
/// on the same kinds.
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind as DbKind;

        let app_err = match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::unavailable("No database connection available")
                    .with_hint("Check that the database is running and DATABASE_URL is correct")
            }
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                AppError::unavailable("Could not reach the database")
                    .with_hint("Check that the database is running and DATABASE_URL is correct")
            }
            sqlx::Error::Configuration(_) => {
                AppError::invalid("Invalid database configuration").with_hint("Check DATABASE_URL")
            }
            sqlx::Error::Database(db_err) => match db_err.kind() {
                DbKind::UniqueViolation => AppError::conflict("Duplicate key value"),
                DbKind::ForeignKeyViolation => AppError::conflict("Foreign key violation"),
                DbKind::NotNullViolation | DbKind::CheckViolation => {
                    AppError::invalid("Value rejected by a database constraint")
                }
                _ => AppError::internal("Database error"),
            },
            _ => AppError::internal("Database error"),
        };

        app_err.with_source(err)
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use std::error::Error;

    #[test]
    fn test_row_not_found_conversion() {
        let app_err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);
        assert!(app_err.source().is_some());
    }

    #[test]
    fn test_pool_timeout_conversion() {
        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(app_err.kind(), ErrorKind::Unavailable);
        assert!(app_err.hint().is_some());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let app_err: AppError = sqlx::Error::Io(io).into();
        assert!(app_err.kind().is_retryable());
    }

    #[test]
    fn test_protocol_error_conversion() {
        let app_err: AppError = sqlx::Error::Protocol("unexpected message".into()).into();
        assert_eq!(app_err.kind(), ErrorKind::Internal);
    }
}
