//! OpenAPI document for the REST surface.
//!
//! In debug builds the document is served as JSON at
//! `/api-docs/openapi.json`; release builds only carry the types.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Restaurant, Review, User};

/// Public OpenAPI surface used by tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user_by_email,
        crate::inbound::http::users::get_user_by_id,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::restaurants::list_restaurants,
        crate::inbound::http::restaurants::get_restaurant_by_phone_number,
        crate::inbound::http::restaurants::get_restaurant_by_id,
        crate::inbound::http::restaurants::create_restaurant,
        crate::inbound::http::restaurants::update_restaurant,
        crate::inbound::http::restaurants::delete_restaurant,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::get_reviews_by_user_id,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, Restaurant, Review, Error, ErrorCode)),
    tags(
        (name = "users", description = "Operations about users"),
        (name = "restaurants", description = "Operations about restaurants"),
        (name = "reviews", description = "Operations about reviews"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
