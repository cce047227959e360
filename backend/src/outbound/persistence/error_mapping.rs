//! Shared pool and Diesel error mapping for the repositories.
//!
//! Every repository distinguishes the same three failure categories, so the
//! translation from `PoolError`/`diesel::result::Error` into the port error
//! constructors lives here once.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into the port error constructors.
///
/// Unique-index violations get their own constructor so services can report
/// them as conflicts; everything else is a query or connection failure.
pub(crate) fn map_basic_diesel_error<E, Q, C, U>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
    unique: U,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
    U: FnOnce(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            unique(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UserPersistenceError;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    fn map(error: DieselError) -> UserPersistenceError {
        map_basic_diesel_error(
            error,
            UserPersistenceError::query,
            UserPersistenceError::connection,
            UserPersistenceError::unique_violation,
        )
    }

    #[test]
    fn pool_errors_map_to_connection() {
        let err: UserPersistenceError = map_basic_pool_error(
            PoolError::checkout("connection refused"),
            UserPersistenceError::connection,
        );
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn not_found_maps_to_query() {
        let err = map(DieselError::NotFound);
        assert!(matches!(err, UserPersistenceError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[test]
    fn unique_violation_maps_to_its_own_variant() {
        let err = map(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        ));
        assert!(matches!(err, UserPersistenceError::UniqueViolation { .. }));
    }

    #[test]
    fn closed_connection_maps_to_connection() {
        let err = map(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }
}
