//! Application wiring: state construction and route registration.
//!
//! `main` and the integration tests share this module so the routing table
//! under test is the routing table in production; tests only swap the
//! repositories behind [`HttpState`].

pub mod config;

use std::sync::Arc;

use actix_web::{ResponseError, web};

use crate::domain::{Error, RestaurantService, ReviewService, UserService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{restaurants, reviews, users};
use crate::outbound::persistence::{
    DbPool, DieselRestaurantRepository, DieselReviewRepository, DieselUserRepository,
};

/// Build the handler state over the Diesel adapters.
pub fn build_state(pool: DbPool) -> HttpState {
    let users_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    HttpState::new(
        UserService::new(users_repo.clone()),
        RestaurantService::new(Arc::new(DieselRestaurantRepository::new(pool.clone()))),
        ReviewService::new(Arc::new(DieselReviewRepository::new(pool)), users_repo),
    )
}

/// JSON extractor configuration wrapping malformed bodies in the standard
/// error envelope (400), instead of actix's plain-text default.
pub fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response =
            Error::invalid_request("Invalid JSON supplied in request body").error_response();
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// Register the REST surface under `/api`.
///
/// Registration order matters for the users scope: the literal
/// `/users/email/…` segment must be tried before the numeric id pattern.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_error_config())
            .service(users::list_users)
            .service(users::get_user_by_email)
            .service(users::get_user_by_id)
            .service(users::create_user)
            .service(users::update_user)
            .service(users::delete_user)
            .service(restaurants::list_restaurants)
            .service(restaurants::get_restaurant_by_phone_number)
            .service(restaurants::get_restaurant_by_id)
            .service(restaurants::create_restaurant)
            .service(restaurants::update_restaurant)
            .service(restaurants::delete_restaurant)
            .service(reviews::list_reviews)
            .service(reviews::get_reviews_by_user_id)
            .service(reviews::create_review),
    );
}
