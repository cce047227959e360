//! Diesel/PostgreSQL persistence adapters.

mod diesel_restaurant_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod error_mapping;
pub mod migrations;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_restaurant_repository::DieselRestaurantRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
