//! PostgreSQL-backed `ReviewRepository` implementation using Diesel.
//!
//! No update or delete: reviews are immutable once posted, and removal only
//! happens through the `ON DELETE CASCADE` from the owning user row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::Review;
use crate::domain::ports::{ReviewPersistenceError, ReviewRepository};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewReviewRow, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::reviews;

/// Diesel-backed implementation of the `ReviewRepository` port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewPersistenceError {
    map_basic_pool_error(error, ReviewPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewPersistenceError {
    map_basic_diesel_error(
        error,
        ReviewPersistenceError::query,
        ReviewPersistenceError::connection,
        ReviewPersistenceError::unique_violation,
    )
}

fn row_to_review(row: ReviewRow) -> Review {
    Review {
        id: Some(row.id),
        user_id: Some(row.user_id),
        restaurant_id: Some(row.restaurant_id),
        review: row.review,
        rating: row.rating,
    }
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn find_all_ordered(&self) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = reviews::table
            .order((reviews::user_id.asc(), reviews::restaurant_id.asc()))
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_review).collect())
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::user_id.eq(user_id))
            .order(reviews::restaurant_id.asc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_review).collect())
    }

    async fn create(&self, review: &Review) -> Result<Review, ReviewPersistenceError> {
        let user_id = review.user_id.ok_or_else(|| {
            ReviewPersistenceError::query("cannot persist a review without a user id")
        })?;
        let restaurant_id = review.restaurant_id.ok_or_else(|| {
            ReviewPersistenceError::query("cannot persist a review without a restaurant id")
        })?;
        info!(user_id, restaurant_id, "inserting review");
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewReviewRow {
            user_id,
            restaurant_id,
            review: &review.review,
            rating: &review.rating,
        };

        let row: ReviewRow = diesel::insert_into(reviews::table)
            .values(&new_row)
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_review(row))
    }
}
