//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! The unique index on `users.email` is the authoritative uniqueness guard;
//! a violation surfaces as `UniqueViolation` and the service layer reports
//! it as a conflict. Review rows cascade when a user row is deleted.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
        UserPersistenceError::unique_violation,
    )
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: Some(row.id),
        name: row.name,
        email: row.email,
        phone_number: row.phone_number,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_all_ordered_by_name(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::name.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_user))
    }

    async fn create(&self, user: &User) -> Result<User, UserPersistenceError> {
        info!(name = %user.name, "inserting user");
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            name: &user.name,
            email: &user.email,
            phone_number: &user.phone_number,
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_user(row))
    }

    async fn update(&self, user: &User) -> Result<User, UserPersistenceError> {
        let id = user
            .id
            .ok_or_else(|| UserPersistenceError::query("cannot update a user without an id"))?;
        info!(id, "updating user");
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserChangeset {
            name: &user.name,
            email: &user.email,
            phone_number: &user.phone_number,
        };

        let row: UserRow = diesel::update(users::table.find(id))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_user(row))
    }

    async fn delete(&self, id: i64) -> Result<(), UserPersistenceError> {
        info!(id, "deleting user");
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
