//! Restaurants REST handlers.
//!
//! Same shape as the users surface; the unique-field lookup is by phone
//! number rather than email.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::domain::{Error, Restaurant};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn restaurant_not_found(id: i64) -> Error {
    Error::not_found(format!("No Restaurant with the id {id} was found!"))
}

/// List all restaurants, sorted alphabetically by name.
#[utoipa::path(
    get,
    path = "/api/restaurants",
    responses(
        (status = 200, description = "Restaurants", body = [Restaurant])
    ),
    tags = ["restaurants"],
    operation_id = "listRestaurants"
)]
#[get("/restaurants")]
pub async fn list_restaurants(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Restaurant>>> {
    Ok(web::Json(state.restaurants.find_all().await?))
}

/// Fetch a restaurant by phone number.
#[utoipa::path(
    get,
    path = "/api/restaurants/phoneNumber/{phoneNumber}",
    params(("phoneNumber" = String, Path, description = "Phone number of the restaurant to fetch")),
    responses(
        (status = 200, description = "Restaurant found", body = Restaurant),
        (status = 404, description = "Restaurant with phone number not found", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "getRestaurantByPhoneNumber"
)]
#[get("/restaurants/phoneNumber/{phoneNumber:0[0-9]{10}}")]
pub async fn get_restaurant_by_phone_number(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Restaurant>> {
    let phone_number = path.into_inner();
    match state.restaurants.find_by_phone_number(&phone_number).await? {
        Some(restaurant) => Ok(web::Json(restaurant)),
        None => Err(Error::not_found(format!(
            "No Restaurant with the phone number {phone_number} was found!"
        ))),
    }
}

/// Fetch a restaurant by id.
#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    params(("id" = i64, Path, description = "Id of the restaurant to fetch")),
    responses(
        (status = 200, description = "Restaurant found", body = Restaurant),
        (status = 404, description = "Restaurant with id not found", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "getRestaurantById"
)]
#[get("/restaurants/{id:[0-9]+}")]
pub async fn get_restaurant_by_id(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Restaurant>> {
    let id = path.into_inner();
    match state.restaurants.find_by_id(id).await? {
        Some(restaurant) => Ok(web::Json(restaurant)),
        None => Err(restaurant_not_found(id)),
    }
}

/// Create a new restaurant.
#[utoipa::path(
    post,
    path = "/api/restaurants",
    request_body = Restaurant,
    responses(
        (status = 201, description = "Restaurant created successfully", body = Restaurant),
        (status = 400, description = "Invalid Restaurant supplied in request body", body = Error),
        (status = 409, description = "Restaurant conflicts with an existing Restaurant", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "createRestaurant"
)]
#[post("/restaurants")]
pub async fn create_restaurant(
    state: web::Data<HttpState>,
    payload: web::Json<Restaurant>,
) -> ApiResult<HttpResponse> {
    let created = state.restaurants.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Update the restaurant with the given id.
#[utoipa::path(
    put,
    path = "/api/restaurants/{id}",
    params(("id" = i64, Path, description = "Id of the restaurant to update")),
    request_body = Restaurant,
    responses(
        (status = 200, description = "Restaurant updated successfully", body = Restaurant),
        (status = 400, description = "Invalid Restaurant supplied in request body", body = Error),
        (status = 404, description = "Restaurant with id not found", body = Error),
        (status = 409, description = "Restaurant conflicts with an existing Restaurant", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "updateRestaurant"
)]
#[put("/restaurants/{id:[0-9]+}")]
pub async fn update_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<Restaurant>,
) -> ApiResult<web::Json<Restaurant>> {
    let id = path.into_inner();
    let restaurant = payload.into_inner();
    let body_id = restaurant
        .id
        .ok_or_else(|| Error::invalid_request("Invalid Restaurant supplied in request body"))?;
    if body_id != id {
        return Err(Error::conflict(
            "Restaurant details supplied in request body conflict with the Restaurant being updated",
        )
        .with_details(json!({
            "id": "The Restaurant ID in the request body must match that of the Restaurant being updated"
        })));
    }
    if state.restaurants.find_by_id(id).await?.is_none() {
        return Err(restaurant_not_found(id));
    }
    Ok(web::Json(state.restaurants.update(restaurant).await?))
}

/// Delete the restaurant with the given id.
#[utoipa::path(
    delete,
    path = "/api/restaurants/{id}",
    params(("id" = i64, Path, description = "Id of the restaurant to delete")),
    responses(
        (status = 204, description = "Restaurant deleted successfully"),
        (status = 404, description = "Restaurant with id not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "deleteRestaurant"
)]
#[delete("/restaurants/{id:[0-9]+}")]
pub async fn delete_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let Some(restaurant) = state.restaurants.find_by_id(id).await? else {
        return Err(restaurant_not_found(id));
    };
    state.restaurants.delete(restaurant).await?;
    Ok(HttpResponse::NoContent().finish())
}
