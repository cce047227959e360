//! User domain service.
//!
//! Owns the create/update validation pipeline: aggregate field checks first,
//! then the email uniqueness check against the repository. The HTTP adapter
//! translates the resulting errors; nothing here knows about status codes.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::validation::conflicts_with_existing;
use crate::domain::{Error, User};

/// Message reported under the `email` reason key on uniqueness conflicts.
const EMAIL_CONFLICT_REASON: &str = "That email is already used, please use a unique email";

fn email_conflict() -> Error {
    Error::conflict("User details supplied in request body conflict with an existing User")
        .with_details(json!({ "email": EMAIL_CONFLICT_REASON }))
}

/// Service orchestrating validation and persistence for users.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => Error::service_unavailable(message),
            UserPersistenceError::Query { message } => Error::internal(message),
            // The unique index is the authoritative guard; a race past the
            // pre-check surfaces as the same conflict.
            UserPersistenceError::UniqueViolation { .. } => email_conflict(),
        }
    }

    /// All users, ordered alphabetically by name.
    pub async fn find_all(&self) -> Result<Vec<User>, Error> {
        self.repo
            .find_all_ordered_by_name()
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Fetch a user by generated id. Absence is `None`, not an error.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Fetch a user by email address. Absence is `None`, not an error.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.repo
            .find_by_email(email)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Validate and persist a new user.
    ///
    /// Ids are store-generated; anything client-supplied is ignored so a
    /// posted id can never claim the update-in-place exemption.
    pub async fn create(&self, user: User) -> Result<User, Error> {
        let user = User { id: None, ..user };
        info!(name = %user.name, "creating user");
        self.validate(&user).await?;
        self.repo
            .create(&user)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Validate and merge changes into an existing user.
    pub async fn update(&self, user: User) -> Result<User, Error> {
        info!(name = %user.name, "updating user");
        self.validate(&user).await?;
        self.repo
            .update(&user)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Delete a persisted user, or do nothing when it has no id.
    ///
    /// An unpersisted entity is never deleted; the no-op returns `None`
    /// without touching the repository.
    pub async fn delete(&self, user: User) -> Result<Option<User>, Error> {
        let Some(id) = user.id else {
            info!("no id was found so cannot delete user");
            return Ok(None);
        };
        info!(id, "deleting user");
        self.repo
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(Some(user))
    }

    /// Field checks, then email uniqueness.
    ///
    /// Field violations aggregate into a single invalid-request error with
    /// the complete reasons map. Uniqueness only runs once fields pass, so
    /// the boundary can distinguish 400 from 409 precisely. An update that
    /// keeps its own email is not a conflict.
    async fn validate(&self, user: &User) -> Result<(), Error> {
        user.validate().map_err(|violations| {
            Error::invalid_request("Bad Request").with_details(violations.to_details())
        })?;

        let existing = self
            .repo
            .find_by_email(&user.email)
            .await
            .map_err(Self::map_persistence_error)?;
        if let Some(existing) = existing
            && conflicts_with_existing(existing.id, user.id)
        {
            return Err(email_conflict());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::ErrorCode;
    use async_trait::async_trait;

    /// In-memory repository double assigning sequential ids.
    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<Vec<User>>,
    }

    impl StubUserRepository {
        fn with_users(users: Vec<User>) -> Self {
            Self {
                state: Mutex::new(users),
            }
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn find_all_ordered_by_name(&self) -> Result<Vec<User>, UserPersistenceError> {
            let mut users = self.state.lock().expect("state lock").clone();
            users.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(users)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserPersistenceError> {
            let users = self.state.lock().expect("state lock");
            Ok(users.iter().find(|user| user.id == Some(id)).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
            let users = self.state.lock().expect("state lock");
            Ok(users.iter().find(|user| user.email == email).cloned())
        }

        async fn create(&self, user: &User) -> Result<User, UserPersistenceError> {
            let mut users = self.state.lock().expect("state lock");
            let id = i64::try_from(users.len()).expect("small test set") + 1;
            let created = user.clone().with_id(id);
            users.push(created.clone());
            Ok(created)
        }

        async fn update(&self, user: &User) -> Result<User, UserPersistenceError> {
            let mut users = self.state.lock().expect("state lock");
            let slot = users
                .iter_mut()
                .find(|candidate| candidate.id == user.id)
                .ok_or_else(|| UserPersistenceError::query("record not found"))?;
            *slot = user.clone();
            Ok(user.clone())
        }

        async fn delete(&self, id: i64) -> Result<(), UserPersistenceError> {
            let mut users = self.state.lock().expect("state lock");
            users.retain(|user| user.id != Some(id));
            Ok(())
        }
    }

    fn service_with(users: Vec<User>) -> UserService {
        UserService::new(Arc::new(StubUserRepository::with_users(users)))
    }

    fn jack() -> User {
        User::new("Jack Doe", "jack@mailinator.com", "01234567891")
    }

    #[tokio::test]
    async fn create_assigns_a_generated_id() {
        let service = service_with(Vec::new());
        let created = service.create(jack()).await.expect("create succeeds");
        assert_eq!(created.id, Some(1));
        let fetched = service.find_by_id(1).await.expect("lookup succeeds");
        assert_eq!(fetched.as_ref().map(|u| u.email.as_str()), Some("jack@mailinator.com"));
    }

    #[tokio::test]
    async fn create_ignores_a_client_supplied_id() {
        let service = service_with(Vec::new());
        let created = service
            .create(jack().with_id(77))
            .await
            .expect("create succeeds");
        assert_eq!(created.id, Some(1));
    }

    #[tokio::test]
    async fn create_collects_every_field_violation() {
        let service = service_with(Vec::new());
        let err = service
            .create(User::new("", "", ""))
            .await
            .expect_err("empty user must fail");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        let details = err.details.as_ref().expect("reasons map");
        assert_eq!(details.as_object().expect("object").len(), 3);
    }

    #[tokio::test]
    async fn create_with_taken_email_conflicts() {
        let service = service_with(vec![jack().with_id(1)]);
        let err = service
            .create(User::new("John Doe", "jack@mailinator.com", "01334567894"))
            .await
            .expect_err("duplicate email must conflict");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.reason("email"), Some(EMAIL_CONFLICT_REASON));
    }

    #[tokio::test]
    async fn update_keeping_own_email_is_not_a_conflict() {
        let service = service_with(vec![jack().with_id(1)]);
        let updated = service
            .update(User::new("Jack D Doe", "jack@mailinator.com", "01234567891").with_id(1))
            .await
            .expect("update in place succeeds");
        assert_eq!(updated.name, "Jack D Doe");
    }

    #[tokio::test]
    async fn update_taking_another_users_email_conflicts() {
        let other = User::new("John Doe", "john@mailinator.com", "01334567894").with_id(2);
        let service = service_with(vec![jack().with_id(1), other]);
        let err = service
            .update(User::new("John Doe", "jack@mailinator.com", "01334567894").with_id(2))
            .await
            .expect_err("email steal must conflict");
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn delete_without_id_is_a_no_op() {
        let service = service_with(vec![jack().with_id(1)]);
        let deleted = service.delete(jack()).await.expect("no-op succeeds");
        assert!(deleted.is_none());
        assert_eq!(service.find_all().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn delete_with_id_removes_the_record() {
        let service = service_with(vec![jack().with_id(1)]);
        let deleted = service
            .delete(jack().with_id(1))
            .await
            .expect("delete succeeds");
        assert!(deleted.is_some());
        assert!(service.find_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_name() {
        let zoe = User::new("Zoe Doe", "zoe@mailinator.com", "01334567894").with_id(2);
        let service = service_with(vec![zoe, jack().with_id(1)]);
        let names: Vec<String> = service
            .find_all()
            .await
            .expect("list")
            .into_iter()
            .map(|user| user.name)
            .collect();
        assert_eq!(names, vec!["Jack Doe".to_owned(), "Zoe Doe".to_owned()]);
    }
}
