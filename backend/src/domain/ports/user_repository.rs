//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
        /// The storage-level unique index rejected the write.
        UniqueViolation => "user unique constraint violated: {message}",
    }
}

/// Persistence port for [`User`] records.
///
/// Lookups signal "absent" as `None`, never as an error; callers decide
/// whether absence is a failure.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered alphabetically by name.
    async fn find_all_ordered_by_name(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by generated identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email address, the domain-unique key.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Persist a new user and return it with its generated id.
    async fn create(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Merge changes into an existing user record.
    async fn update(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Remove a user record. Owned reviews are removed with it.
    async fn delete(&self, id: i64) -> Result<(), UserPersistenceError>;
}
