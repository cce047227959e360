//! Restaurant domain service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::ports::{RestaurantPersistenceError, RestaurantRepository};
use crate::domain::validation::conflicts_with_existing;
use crate::domain::{Error, Restaurant};

const PHONE_CONFLICT_REASON: &str =
    "That phone number is already used, please use a unique phone number";

fn phone_conflict() -> Error {
    Error::conflict("Restaurant details supplied in request body conflict with an existing Restaurant")
        .with_details(json!({ "phoneNumber": PHONE_CONFLICT_REASON }))
}

/// Service orchestrating validation and persistence for restaurants.
#[derive(Clone)]
pub struct RestaurantService {
    repo: Arc<dyn RestaurantRepository>,
}

impl RestaurantService {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<dyn RestaurantRepository>) -> Self {
        Self { repo }
    }

    fn map_persistence_error(error: RestaurantPersistenceError) -> Error {
        match error {
            RestaurantPersistenceError::Connection { message } => {
                Error::service_unavailable(message)
            }
            RestaurantPersistenceError::Query { message } => Error::internal(message),
            RestaurantPersistenceError::UniqueViolation { .. } => phone_conflict(),
        }
    }

    /// All restaurants, ordered alphabetically by name.
    pub async fn find_all(&self) -> Result<Vec<Restaurant>, Error> {
        self.repo
            .find_all_ordered_by_name()
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Fetch a restaurant by generated id. Absence is `None`, not an error.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Fetch a restaurant by phone number. Absence is `None`, not an error.
    pub async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Restaurant>, Error> {
        self.repo
            .find_by_phone_number(phone_number)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Validate and persist a new restaurant. Client-supplied ids are
    /// ignored; the store generates them.
    pub async fn create(&self, restaurant: Restaurant) -> Result<Restaurant, Error> {
        let restaurant = Restaurant {
            id: None,
            ..restaurant
        };
        info!(name = %restaurant.name, "creating restaurant");
        self.validate(&restaurant).await?;
        self.repo
            .create(&restaurant)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Validate and merge changes into an existing restaurant.
    pub async fn update(&self, restaurant: Restaurant) -> Result<Restaurant, Error> {
        info!(name = %restaurant.name, "updating restaurant");
        self.validate(&restaurant).await?;
        self.repo
            .update(&restaurant)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Delete a persisted restaurant, or do nothing when it has no id.
    pub async fn delete(&self, restaurant: Restaurant) -> Result<Option<Restaurant>, Error> {
        let Some(id) = restaurant.id else {
            info!("no id was found so cannot delete restaurant");
            return Ok(None);
        };
        info!(id, "deleting restaurant");
        self.repo
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(Some(restaurant))
    }

    /// Field checks, then phone number uniqueness.
    async fn validate(&self, restaurant: &Restaurant) -> Result<(), Error> {
        restaurant.validate().map_err(|violations| {
            Error::invalid_request("Bad Request").with_details(violations.to_details())
        })?;

        let existing = self
            .repo
            .find_by_phone_number(&restaurant.phone_number)
            .await
            .map_err(Self::map_persistence_error)?;
        if let Some(existing) = existing
            && conflicts_with_existing(existing.id, restaurant.id)
        {
            return Err(phone_conflict());
        }
        Ok(())
    }
}
