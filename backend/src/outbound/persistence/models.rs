//! Diesel row models for the persistence adapters.
//!
//! Read rows carry the audit timestamps the domain does not expose; insert
//! rows borrow from the domain entity and leave ids and timestamps to the
//! database.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{restaurants, reviews, users};

/// Queryable row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for users.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
}

/// Changeset applied on user update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
}

/// Queryable row for restaurants.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RestaurantRow {
    pub id: i64,
    pub name: String,
    pub post_code: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for restaurants.
#[derive(Debug, Insertable)]
#[diesel(table_name = restaurants)]
pub(crate) struct NewRestaurantRow<'a> {
    pub name: &'a str,
    pub post_code: &'a str,
    pub phone_number: &'a str,
}

/// Changeset applied on restaurant update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = restaurants)]
pub(crate) struct RestaurantChangeset<'a> {
    pub name: &'a str,
    pub post_code: &'a str,
    pub phone_number: &'a str,
}

/// Queryable row for reviews.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub review: String,
    pub rating: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for reviews.
#[derive(Debug, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub user_id: i64,
    pub restaurant_id: i64,
    pub review: &'a str,
    pub rating: &'a str,
}
