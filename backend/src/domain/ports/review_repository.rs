//! Port abstraction for review persistence adapters and their errors.
//!
//! Reviews are immutable once posted; the port deliberately exposes no
//! update or delete. Removal only happens through the owning user's
//! delete cascade at the storage layer.
use async_trait::async_trait;

use crate::domain::Review;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewPersistenceError {
        /// Repository connection could not be established.
        Connection => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "review repository query failed: {message}",
        /// The storage-level unique index rejected the write.
        UniqueViolation => "review unique constraint violated: {message}",
    }
}

/// Persistence port for [`Review`] records.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// All reviews ordered by user id, then restaurant id.
    async fn find_all_ordered(&self) -> Result<Vec<Review>, ReviewPersistenceError>;

    /// All reviews posted by the given user.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Review>, ReviewPersistenceError>;

    /// Persist a new review and return it with its generated id.
    async fn create(&self, review: &Review) -> Result<Review, ReviewPersistenceError>;
}
