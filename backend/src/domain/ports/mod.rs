//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod restaurant_repository;
mod review_repository;
mod user_repository;

pub use restaurant_repository::{RestaurantPersistenceError, RestaurantRepository};
pub use review_repository::{ReviewPersistenceError, ReviewRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
