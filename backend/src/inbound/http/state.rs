//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain services and remain testable without I/O: tests
//! build the same state over in-memory repositories.

use crate::domain::{RestaurantService, ReviewService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: UserService,
    pub restaurants: RestaurantService,
    pub reviews: ReviewService,
}

impl HttpState {
    /// Bundle the three entity services.
    pub fn new(users: UserService, restaurants: RestaurantService, reviews: ReviewService) -> Self {
        Self {
            users,
            restaurants,
            reviews,
        }
    }
}
