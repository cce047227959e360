//! In-memory repository doubles shared by the handler test modules.
//!
//! One store backs all three ports so cross-entity behaviour (the review
//! user-reference check, the user→review delete cascade) works the same way
//! it does against the real schema.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::ports::{
    RestaurantPersistenceError, RestaurantRepository, ReviewPersistenceError, ReviewRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Restaurant, RestaurantService, Review, ReviewService, User, UserService};
use crate::inbound::http::state::HttpState;

#[derive(Default)]
pub(crate) struct InMemoryStore {
    users: Mutex<Vec<User>>,
    restaurants: Mutex<Vec<Restaurant>>,
    reviews: Mutex<Vec<Review>>,
}

fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> Option<i64>) -> i64 {
    items.iter().filter_map(id_of).max().unwrap_or(0) + 1
}

impl InMemoryStore {
    pub(crate) fn seed_user(&self, user: User) -> User {
        let mut users = self.users.lock().expect("users lock");
        let seeded = user.with_id(next_id(&users, |u| u.id));
        users.push(seeded.clone());
        seeded
    }

    pub(crate) fn seed_restaurant(&self, restaurant: Restaurant) -> Restaurant {
        let mut restaurants = self.restaurants.lock().expect("restaurants lock");
        let seeded = restaurant.with_id(next_id(&restaurants, |r| r.id));
        restaurants.push(seeded.clone());
        seeded
    }

    pub(crate) fn review_count(&self) -> usize {
        self.reviews.lock().expect("reviews lock").len()
    }
}

pub(crate) struct UsersDouble(pub(crate) Arc<InMemoryStore>);

#[async_trait]
impl UserRepository for UsersDouble {
    async fn find_all_ordered_by_name(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut users = self.0.users.lock().expect("users lock").clone();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserPersistenceError> {
        let users = self.0.users.lock().expect("users lock");
        Ok(users.iter().find(|user| user.id == Some(id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let users = self.0.users.lock().expect("users lock");
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn create(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut users = self.0.users.lock().expect("users lock");
        let created = user.clone().with_id(next_id(&users, |u| u.id));
        users.push(created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut users = self.0.users.lock().expect("users lock");
        let slot = users
            .iter_mut()
            .find(|candidate| candidate.id == user.id)
            .ok_or_else(|| UserPersistenceError::query("record not found"))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), UserPersistenceError> {
        let mut users = self.0.users.lock().expect("users lock");
        users.retain(|user| user.id != Some(id));
        // Emulates the ON DELETE CASCADE on reviews.user_id.
        let mut reviews = self.0.reviews.lock().expect("reviews lock");
        reviews.retain(|review| review.user_id != Some(id));
        Ok(())
    }
}

pub(crate) struct RestaurantsDouble(pub(crate) Arc<InMemoryStore>);

#[async_trait]
impl RestaurantRepository for RestaurantsDouble {
    async fn find_all_ordered_by_name(
        &self,
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let mut restaurants = self.0.restaurants.lock().expect("restaurants lock").clone();
        restaurants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(restaurants)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let restaurants = self.0.restaurants.lock().expect("restaurants lock");
        Ok(restaurants.iter().find(|r| r.id == Some(id)).cloned())
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let restaurants = self.0.restaurants.lock().expect("restaurants lock");
        Ok(restaurants
            .iter()
            .find(|r| r.phone_number == phone_number)
            .cloned())
    }

    async fn create(
        &self,
        restaurant: &Restaurant,
    ) -> Result<Restaurant, RestaurantPersistenceError> {
        let mut restaurants = self.0.restaurants.lock().expect("restaurants lock");
        let created = restaurant.clone().with_id(next_id(&restaurants, |r| r.id));
        restaurants.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        restaurant: &Restaurant,
    ) -> Result<Restaurant, RestaurantPersistenceError> {
        let mut restaurants = self.0.restaurants.lock().expect("restaurants lock");
        let slot = restaurants
            .iter_mut()
            .find(|candidate| candidate.id == restaurant.id)
            .ok_or_else(|| RestaurantPersistenceError::query("record not found"))?;
        *slot = restaurant.clone();
        Ok(restaurant.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RestaurantPersistenceError> {
        let mut restaurants = self.0.restaurants.lock().expect("restaurants lock");
        restaurants.retain(|r| r.id != Some(id));
        Ok(())
    }
}

pub(crate) struct ReviewsDouble(pub(crate) Arc<InMemoryStore>);

#[async_trait]
impl ReviewRepository for ReviewsDouble {
    async fn find_all_ordered(&self) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut reviews = self.0.reviews.lock().expect("reviews lock").clone();
        reviews.sort_by_key(|review| (review.user_id, review.restaurant_id));
        Ok(reviews)
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Review>, ReviewPersistenceError> {
        let reviews = self.0.reviews.lock().expect("reviews lock");
        Ok(reviews
            .iter()
            .filter(|review| review.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create(&self, review: &Review) -> Result<Review, ReviewPersistenceError> {
        let mut reviews = self.0.reviews.lock().expect("reviews lock");
        let created = review.clone().with_id(next_id(&reviews, |r| r.id));
        reviews.push(created.clone());
        Ok(created)
    }
}

/// Build an [`HttpState`] over a fresh shared in-memory store.
pub(crate) fn http_state() -> (Arc<InMemoryStore>, HttpState) {
    let store = Arc::new(InMemoryStore::default());
    let users_repo = Arc::new(UsersDouble(store.clone()));
    let state = HttpState::new(
        UserService::new(users_repo.clone()),
        RestaurantService::new(Arc::new(RestaurantsDouble(store.clone()))),
        ReviewService::new(Arc::new(ReviewsDouble(store.clone())), users_repo),
    );
    (store, state)
}
