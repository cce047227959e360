//! PostgreSQL-backed `RestaurantRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::Restaurant;
use crate::domain::ports::{RestaurantPersistenceError, RestaurantRepository};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewRestaurantRow, RestaurantChangeset, RestaurantRow};
use super::pool::{DbPool, PoolError};
use super::schema::restaurants;

/// Diesel-backed implementation of the `RestaurantRepository` port.
#[derive(Clone)]
pub struct DieselRestaurantRepository {
    pool: DbPool,
}

impl DieselRestaurantRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RestaurantPersistenceError {
    map_basic_pool_error(error, RestaurantPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RestaurantPersistenceError {
    map_basic_diesel_error(
        error,
        RestaurantPersistenceError::query,
        RestaurantPersistenceError::connection,
        RestaurantPersistenceError::unique_violation,
    )
}

fn row_to_restaurant(row: RestaurantRow) -> Restaurant {
    Restaurant {
        id: Some(row.id),
        name: row.name,
        post_code: row.post_code,
        phone_number: row.phone_number,
    }
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn find_all_ordered_by_name(
        &self,
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RestaurantRow> = restaurants::table
            .order(restaurants::name.asc())
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_restaurant).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RestaurantRow> = restaurants::table
            .find(id)
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_restaurant))
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RestaurantRow> = restaurants::table
            .filter(restaurants::phone_number.eq(phone_number))
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_restaurant))
    }

    async fn create(
        &self,
        restaurant: &Restaurant,
    ) -> Result<Restaurant, RestaurantPersistenceError> {
        info!(name = %restaurant.name, "inserting restaurant");
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewRestaurantRow {
            name: &restaurant.name,
            post_code: &restaurant.post_code,
            phone_number: &restaurant.phone_number,
        };

        let row: RestaurantRow = diesel::insert_into(restaurants::table)
            .values(&new_row)
            .returning(RestaurantRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_restaurant(row))
    }

    async fn update(
        &self,
        restaurant: &Restaurant,
    ) -> Result<Restaurant, RestaurantPersistenceError> {
        let id = restaurant.id.ok_or_else(|| {
            RestaurantPersistenceError::query("cannot update a restaurant without an id")
        })?;
        info!(id, "updating restaurant");
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = RestaurantChangeset {
            name: &restaurant.name,
            post_code: &restaurant.post_code,
            phone_number: &restaurant.phone_number,
        };

        let row: RestaurantRow = diesel::update(restaurants::table.find(id))
            .set(&changes)
            .returning(RestaurantRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_restaurant(row))
    }

    async fn delete(&self, id: i64) -> Result<(), RestaurantPersistenceError> {
        info!(id, "deleting restaurant");
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(restaurants::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn unique_violation_maps_to_its_own_variant() {
        let err = map_diesel_error(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        ));
        assert!(matches!(
            err,
            RestaurantPersistenceError::UniqueViolation { .. }
        ));
    }

    #[test]
    fn row_conversion_keeps_the_generated_id() {
        let now = Utc::now();
        let row = RestaurantRow {
            id: 3,
            name: "Lumley Castle".to_owned(),
            post_code: "NE13AF".to_owned(),
            phone_number: "01912345678".to_owned(),
            created_at: now,
            updated_at: now,
        };
        let restaurant = row_to_restaurant(row);
        assert_eq!(restaurant.id, Some(3));
        assert_eq!(restaurant.post_code, "NE13AF");
    }
}
