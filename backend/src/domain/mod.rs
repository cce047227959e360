//! Domain entities, validation, and services.
//!
//! Purpose: define the strongly typed records used by the API and
//! persistence layers, the aggregate field-validation primitives, and the
//! per-entity services that own the validation-and-persistence contract.
//! Everything here is transport agnostic; HTTP status mapping lives in the
//! inbound adapter.

pub mod error;
pub mod ports;
pub mod restaurant;
pub mod restaurant_service;
pub mod review;
pub mod review_service;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::error::{Error, ErrorCode};
pub use self::restaurant::Restaurant;
pub use self::restaurant_service::RestaurantService;
pub use self::review::Review;
pub use self::review_service::ReviewService;
pub use self::user::User;
pub use self::user_service::UserService;
pub use self::validation::FieldViolations;

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
