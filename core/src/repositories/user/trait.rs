//! User repository trait defining the interface for user persistence.
//!
//! All reads exclude soft-deleted rows unless noted otherwise. The
//! trait is async-first and returns `DomainError` for infrastructure
//! failures so workflow code never sees driver types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Filter applied to administrative list/search/count queries
///
/// `query` is substring-matched across first_name, last_name,
/// phone_number, email, bvn and customer_id; the date range applies to
/// `created_at`.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a non-deleted user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a non-deleted user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a non-deleted user whose phone matches either the raw or
    /// the canonical form
    async fn find_by_phone(
        &self,
        raw: &str,
        canonical: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Find the owner of a referral code
    async fn find_by_referral_code(&self, code: &str) -> Result<Option<User>, DomainError>;

    /// Check whether any user (deleted included) owns this referral code
    async fn exists_by_referral_code(&self, code: &str) -> Result<bool, DomainError>;

    /// Check whether any user (deleted included) owns this customer id
    async fn exists_by_customer_id(&self, customer_id: &str) -> Result<bool, DomainError>;

    /// Persist a new user row
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing row
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Page through non-deleted users matching the filter, newest first
    async fn search(
        &self,
        filter: &SearchFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, DomainError>;

    /// Count non-deleted users matching the filter
    async fn count(&self, filter: &SearchFilter) -> Result<u64, DomainError>;
}
