//! Port abstraction for restaurant persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::Restaurant;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by restaurant repository adapters.
    pub enum RestaurantPersistenceError {
        /// Repository connection could not be established.
        Connection => "restaurant repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "restaurant repository query failed: {message}",
        /// The storage-level unique index rejected the write.
        UniqueViolation => "restaurant unique constraint violated: {message}",
    }
}

/// Persistence port for [`Restaurant`] records.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// All restaurants ordered alphabetically by name.
    async fn find_all_ordered_by_name(&self)
    -> Result<Vec<Restaurant>, RestaurantPersistenceError>;

    /// Fetch a restaurant by generated identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, RestaurantPersistenceError>;

    /// Fetch a restaurant by phone number, the domain-unique key.
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError>;

    /// Persist a new restaurant and return it with its generated id.
    async fn create(&self, restaurant: &Restaurant)
    -> Result<Restaurant, RestaurantPersistenceError>;

    /// Merge changes into an existing restaurant record.
    async fn update(&self, restaurant: &Restaurant)
    -> Result<Restaurant, RestaurantPersistenceError>;

    /// Remove a restaurant record.
    async fn delete(&self, id: i64) -> Result<(), RestaurantPersistenceError>;
}
