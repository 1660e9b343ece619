//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;

use super::trait_::{SearchFilter, UserRepository};

/// Mock user repository backed by a HashMap
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed the repository with an existing user
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Number of rows, soft-deleted included
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(user: &User, filter: &SearchFilter) -> bool {
    if let Some(from) = filter.from {
        if user.created_at < from {
            return false;
        }
    }
    if let Some(to) = filter.to {
        if user.created_at > to {
            return false;
        }
    }
    match &filter.query {
        None => true,
        Some(q) => {
            let q = q.to_lowercase();
            [
                &user.first_name,
                &user.last_name,
                &user.phone_number,
                &user.email,
                &user.bvn,
                &user.customer_id,
            ]
            .iter()
            .any(|field| {
                field
                    .as_deref()
                    .map(|v| v.to_lowercase().contains(&q))
                    .unwrap_or(false)
            })
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| !u.is_deleted()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| !u.is_deleted() && u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_phone(
        &self,
        raw: &str,
        canonical: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| {
                !u.is_deleted()
                    && (u.phone_number.as_deref() == Some(raw)
                        || u.phone_number.as_deref() == Some(canonical))
            })
            .cloned())
    }

    async fn find_by_referral_code(&self, code: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| !u.is_deleted() && u.referral_code.as_deref() == Some(code))
            .cloned())
    }

    async fn exists_by_referral_code(&self, code: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.referral_code.as_deref() == Some(code)))
    }

    async fn exists_by_customer_id(&self, customer_id: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.customer_id.as_deref() == Some(customer_id)))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(DomainError::not_found("User"));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn search(
        &self,
        filter: &SearchFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut matched: Vec<User> = users
            .values()
            .filter(|u| !u.is_deleted() && matches_filter(u, filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: &SearchFilter) -> Result<u64, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| !u.is_deleted() && matches_filter(u, filter))
            .count() as u64)
    }
}
