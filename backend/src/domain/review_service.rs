//! Review domain service.
//!
//! Creation runs three checks in order: aggregate field validation, the
//! user reference check, and the one-review-per-(user, restaurant) rule.
//! The duplicate check is a linear scan over the poster's reviews, mirroring
//! the lookup the read path already uses.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    ReviewPersistenceError, ReviewRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, Review};

const DUPLICATE_REVIEW_REASON: &str = "The user has already given review for that restaurant";
const UNKNOWN_USER_REASON: &str = "The user id does not exist";

fn duplicate_review() -> Error {
    Error::conflict("Review supplied in request body conflicts with an existing Review")
        .with_details(json!({ "review": DUPLICATE_REVIEW_REASON }))
}

fn unknown_user() -> Error {
    Error::invalid_request("Bad Request").with_details(json!({ "userId": UNKNOWN_USER_REASON }))
}

/// Service orchestrating validation and persistence for reviews.
#[derive(Clone)]
pub struct ReviewService {
    repo: Arc<dyn ReviewRepository>,
    users: Arc<dyn UserRepository>,
}

impl ReviewService {
    /// Create a new service over the review repository and the user
    /// repository used for reference checks.
    pub fn new(repo: Arc<dyn ReviewRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { repo, users }
    }

    fn map_persistence_error(error: ReviewPersistenceError) -> Error {
        match error {
            ReviewPersistenceError::Connection { message } => Error::service_unavailable(message),
            ReviewPersistenceError::Query { message } => Error::internal(message),
            ReviewPersistenceError::UniqueViolation { .. } => duplicate_review(),
        }
    }

    fn map_user_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => Error::service_unavailable(message),
            UserPersistenceError::Query { message }
            | UserPersistenceError::UniqueViolation { message } => Error::internal(message),
        }
    }

    /// All reviews, ordered by user id then restaurant id.
    pub async fn find_all(&self) -> Result<Vec<Review>, Error> {
        self.repo
            .find_all_ordered()
            .await
            .map_err(Self::map_persistence_error)
    }

    /// All reviews posted by the given user. An empty list is a value, not
    /// an error; the boundary decides how to report it.
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Review>, Error> {
        self.repo
            .find_by_user_id(user_id)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Validate and persist a new review. Client-supplied ids are ignored;
    /// the store generates them.
    pub async fn create(&self, review: Review) -> Result<Review, Error> {
        let review = Review { id: None, ..review };
        info!(
            user_id = review.user_id,
            restaurant_id = review.restaurant_id,
            "creating review"
        );
        self.validate(&review).await?;
        self.repo
            .create(&review)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Field checks, then the user reference, then pair uniqueness.
    async fn validate(&self, review: &Review) -> Result<(), Error> {
        review.validate().map_err(|violations| {
            Error::invalid_request("Bad Request").with_details(violations.to_details())
        })?;

        // Field validation guarantees both ids are present past this point.
        let user_id = review.user_id.ok_or_else(unknown_user)?;
        let restaurant_id = review
            .restaurant_id
            .ok_or_else(|| Error::internal("validated review lost its restaurant id"))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_persistence_error)?;
        if user.is_none() {
            return Err(unknown_user());
        }

        let existing = self
            .repo
            .find_by_user_id(user_id)
            .await
            .map_err(Self::map_persistence_error)?;
        if existing
            .iter()
            .any(|posted| posted.restaurant_id == Some(restaurant_id))
        {
            return Err(duplicate_review());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::{ErrorCode, User};
    use async_trait::async_trait;

    #[derive(Default)]
    struct StubReviewRepository {
        state: Mutex<Vec<Review>>,
    }

    #[async_trait]
    impl ReviewRepository for StubReviewRepository {
        async fn find_all_ordered(&self) -> Result<Vec<Review>, ReviewPersistenceError> {
            let mut reviews = self.state.lock().expect("state lock").clone();
            reviews.sort_by_key(|review| (review.user_id, review.restaurant_id));
            Ok(reviews)
        }

        async fn find_by_user_id(
            &self,
            user_id: i64,
        ) -> Result<Vec<Review>, ReviewPersistenceError> {
            let reviews = self.state.lock().expect("state lock");
            Ok(reviews
                .iter()
                .filter(|review| review.user_id == Some(user_id))
                .cloned()
                .collect())
        }

        async fn create(&self, review: &Review) -> Result<Review, ReviewPersistenceError> {
            let mut reviews = self.state.lock().expect("state lock");
            let id = i64::try_from(reviews.len()).expect("small test set") + 1;
            let created = review.clone().with_id(id);
            reviews.push(created.clone());
            Ok(created)
        }
    }

    struct StubUserRepository {
        users: Vec<User>,
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn find_all_ordered_by_name(&self) -> Result<Vec<User>, UserPersistenceError> {
            Ok(self.users.clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserPersistenceError> {
            Ok(self.users.iter().find(|user| user.id == Some(id)).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
            Ok(self.users.iter().find(|user| user.email == email).cloned())
        }

        async fn create(&self, _user: &User) -> Result<User, UserPersistenceError> {
            Err(UserPersistenceError::query("not supported in stub"))
        }

        async fn update(&self, _user: &User) -> Result<User, UserPersistenceError> {
            Err(UserPersistenceError::query("not supported in stub"))
        }

        async fn delete(&self, _id: i64) -> Result<(), UserPersistenceError> {
            Err(UserPersistenceError::query("not supported in stub"))
        }
    }

    fn service_with_users(users: Vec<User>) -> ReviewService {
        ReviewService::new(
            Arc::new(StubReviewRepository::default()),
            Arc::new(StubUserRepository { users }),
        )
    }

    fn jack() -> User {
        User::new("Jack Doe", "jack@mailinator.com", "01234567891").with_id(1)
    }

    #[tokio::test]
    async fn create_assigns_a_generated_id() {
        let service = service_with_users(vec![jack()]);
        let created = service
            .create(Review::new(1, 2, "Great food", "4"))
            .await
            .expect("create succeeds");
        assert_eq!(created.id, Some(1));
    }

    #[tokio::test]
    async fn create_for_unknown_user_is_a_bad_request() {
        let service = service_with_users(Vec::new());
        let err = service
            .create(Review::new(99, 2, "Great food", "4"))
            .await
            .expect_err("unknown user must fail");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.reason("userId"), Some(UNKNOWN_USER_REASON));
    }

    #[tokio::test]
    async fn duplicate_pair_conflicts_even_with_different_text() {
        let service = service_with_users(vec![jack()]);
        service
            .create(Review::new(1, 2, "Great food", "4"))
            .await
            .expect("first review succeeds");
        let err = service
            .create(Review::new(1, 2, "Changed my mind", "1"))
            .await
            .expect_err("second review for the pair must conflict");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.reason("review"), Some(DUPLICATE_REVIEW_REASON));
    }

    #[tokio::test]
    async fn same_user_may_review_other_restaurants() {
        let service = service_with_users(vec![jack()]);
        service
            .create(Review::new(1, 2, "Great food", "4"))
            .await
            .expect("first review succeeds");
        service
            .create(Review::new(1, 3, "Decent", "3"))
            .await
            .expect("different restaurant succeeds");
        assert_eq!(service.find_by_user_id(1).await.expect("list").len(), 2);
    }

    #[tokio::test]
    async fn field_violations_report_before_reference_checks() {
        let service = service_with_users(Vec::new());
        let err = service
            .create(Review {
                id: None,
                user_id: None,
                restaurant_id: Some(2),
                review: "Great food".to_owned(),
                rating: "9".to_owned(),
            })
            .await
            .expect_err("invalid review must fail");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert!(err.reason("userId").is_some());
        assert!(err.reason("rating").is_some());
    }

    #[tokio::test]
    async fn find_all_orders_by_user_then_restaurant() {
        let service = service_with_users(vec![
            jack(),
            User::new("Ann Doe", "ann@mailinator.com", "01334567894").with_id(2),
        ]);
        service
            .create(Review::new(2, 1, "Fine", "3"))
            .await
            .expect("review");
        service
            .create(Review::new(1, 2, "Great food", "4"))
            .await
            .expect("review");
        service
            .create(Review::new(1, 1, "Nice", "5"))
            .await
            .expect("review");
        let keys: Vec<(Option<i64>, Option<i64>)> = service
            .find_all()
            .await
            .expect("list")
            .into_iter()
            .map(|review| (review.user_id, review.restaurant_id))
            .collect();
        assert_eq!(
            keys,
            vec![
                (Some(1), Some(1)),
                (Some(1), Some(2)),
                (Some(2), Some(1))
            ]
        );
    }
}
