//! Reviews REST handlers.
//!
//! Reviews are immutable once posted: the surface is list, lookup by the
//! posting user, and create. The user-id lookup returns 404 when the user
//! has posted nothing.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, Review};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// List all reviews, ordered by user id then restaurant id.
#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "Reviews", body = [Review])
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/reviews")]
pub async fn list_reviews(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Review>>> {
    Ok(web::Json(state.reviews.find_all().await?))
}

/// Fetch the reviews posted by a user.
#[utoipa::path(
    get,
    path = "/api/reviews/{userId}",
    params(("userId" = i64, Path, description = "Id of the posting user")),
    responses(
        (status = 200, description = "Reviews found", body = [Review]),
        (status = 404, description = "No reviews for that user", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "getReviewsByUserId"
)]
#[get("/reviews/{userId:[0-9]+}")]
pub async fn get_reviews_by_user_id(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<Review>>> {
    let user_id = path.into_inner();
    let reviews = state.reviews.find_by_user_id(user_id).await?;
    if reviews.is_empty() {
        return Err(Error::not_found(format!(
            "No review with the user id {user_id} was found!"
        )));
    }
    Ok(web::Json(reviews))
}

/// Create a new review.
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = Review,
    responses(
        (status = 201, description = "Review created successfully", body = Review),
        (status = 400, description = "Invalid Review supplied in request body", body = Error),
        (status = 409, description = "Review conflicts with an existing Review", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    payload: web::Json<Review>,
) -> ApiResult<HttpResponse> {
    let created = state.reviews.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}
