//! Users REST handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! GET    /api/users/email/{email}
//! POST   /api/users
//! PUT    /api/users/{id}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn user_not_found(id: i64) -> Error {
    Error::not_found(format!("No User with the id {id} was found!"))
}

/// List all users, sorted alphabetically by name.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [User])
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.find_all().await?))
}

/// Fetch a user by email address.
#[utoipa::path(
    get,
    path = "/api/users/email/{email}",
    params(("email" = String, Path, description = "Email of the user to fetch")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User with email not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserByEmail"
)]
#[get("/users/email/{email}")]
pub async fn get_user_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let email = path.into_inner();
    match state.users.find_by_email(&email).await? {
        Some(user) => Ok(web::Json(user)),
        None => Err(Error::not_found(format!(
            "No User with the email {email} was found!"
        ))),
    }
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "Id of the user to fetch")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User with id not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
#[get("/users/{id:[0-9]+}")]
pub async fn get_user_by_id(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    match state.users.find_by_id(id).await? {
        Some(user) => Ok(web::Json(user)),
        None => Err(user_not_found(id)),
    }
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = User,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Invalid User supplied in request body", body = Error),
        (status = 409, description = "User conflicts with an existing User", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<User>,
) -> ApiResult<HttpResponse> {
    let created = state.users.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Update the user with the given id.
///
/// The body must carry the same id as the path; the generated id is
/// immutable once set.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "Id of the user to update")),
    request_body = User,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, description = "Invalid User supplied in request body", body = Error),
        (status = 404, description = "User with id not found", body = Error),
        (status = 409, description = "User conflicts with an existing User", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id:[0-9]+}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<User>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    let user = payload.into_inner();
    let body_id = user
        .id
        .ok_or_else(|| Error::invalid_request("Invalid User supplied in request body"))?;
    if body_id != id {
        return Err(Error::conflict(
            "User details supplied in request body conflict with the User being updated",
        )
        .with_details(json!({
            "id": "The User ID in the request body must match that of the User being updated"
        })));
    }
    if state.users.find_by_id(id).await?.is_none() {
        return Err(user_not_found(id));
    }
    Ok(web::Json(state.users.update(user).await?))
}

/// Delete the user with the given id. Owned reviews are removed with it.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "Id of the user to delete")),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, description = "User with id not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id:[0-9]+}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let Some(user) = state.users.find_by_id(id).await? else {
        return Err(user_not_found(id));
    };
    state.users.delete(user).await?;
    Ok(HttpResponse::NoContent().finish())
}
