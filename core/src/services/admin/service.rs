//! Administrative account operations: listing, search, contact
//! updates and lifecycle state transitions.
//!
//! Every state transition is precondition-guarded; repeating one is an
//! error, never a silent success. Transitions against another account
//! leave an activity trail naming the acting administrator.

use std::sync::Arc;

use bcrypt::{hash, DEFAULT_COST};
use uuid::Uuid;

use kb_shared::config::AssetConfig;
use kb_shared::types::{PageMeta, PageQuery};
use kb_shared::utils::phone;

use crate::domain::entities::{NewUser, User, UserUpdate};
use crate::domain::value_objects::UserView;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{SearchFilter, UserRepository};
use crate::services::codegen::{generate_unique, CodeCharset};
use crate::services::notifier::{emit, Notification, Notifier};

const CUSTOMER_ID_LEN: usize = 8;
const REFERRAL_CODE_LEN: usize = 12;

const EMAIL_LOCKED: &str = "You have a verified email already. You cannot update email.";
const PHONE_LOCKED: &str = "You have a verified phone number already. You cannot update phone number.";
const EMAIL_EXISTS: &str = "Email address already exists";
const PHONE_EXISTS: &str = "Phone number already exists";
const ACCOUNT_UNDER_REVIEW: &str = "This account is currently being reviewed.";
const ALREADY_SUSPENDED: &str = "This account is already suspended.";
const NOT_SUSPENDED: &str = "Your account is not suspended.";
const ALREADY_CLOSED: &str = "Your account is closed already.";
const NOT_CLOSED: &str = "Your account is not closed.";

/// Input for an administrative account creation
#[derive(Debug, Clone, Default)]
pub struct AdminCreateData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub gender: Option<String>,
    pub source: Option<String>,
}

/// Back-office use cases over the user base
pub struct AdminService<R: UserRepository, N: Notifier> {
    user_repository: Arc<R>,
    notifier: Arc<N>,
    assets: AssetConfig,
}

impl<R: UserRepository, N: Notifier> AdminService<R, N> {
    pub fn new(user_repository: Arc<R>, notifier: Arc<N>, assets: AssetConfig) -> Self {
        Self {
            user_repository,
            notifier,
            assets,
        }
    }

    /// Create an account on a user's behalf
    pub async fn create(&self, data: AdminCreateData) -> DomainResult<UserView> {
        let canonical_phone = data.phone_number.as_deref().map(phone::canonicalize);

        if let Some(canonical) = &canonical_phone {
            let raw = data.phone_number.as_deref().unwrap_or(canonical);
            if self
                .user_repository
                .find_by_phone(raw, canonical)
                .await?
                .is_some()
            {
                return Err(DomainError::conflict(PHONE_EXISTS));
            }
        }
        if let Some(email) = &data.email {
            if self.user_repository.find_by_email(email).await?.is_some() {
                return Err(DomainError::conflict(EMAIL_EXISTS));
            }
        }

        let referral_code = {
            let repo = Arc::clone(&self.user_repository);
            generate_unique(REFERRAL_CODE_LEN, CodeCharset::Alphanumeric, move |code| {
                let repo = Arc::clone(&repo);
                async move { repo.exists_by_referral_code(&code).await }
            })
            .await?
        };
        let customer_id = {
            let repo = Arc::clone(&self.user_repository);
            generate_unique(CUSTOMER_ID_LEN, CodeCharset::Digits, move |id| {
                let repo = Arc::clone(&repo);
                async move { repo.exists_by_customer_id(&id).await }
            })
            .await?
        };

        let password_hash = match &data.password {
            Some(plain) => Some(
                hash(plain, DEFAULT_COST)
                    .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))?,
            ),
            None => None,
        };

        let user = User::new(NewUser {
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone_number: canonical_phone,
            gender: data.gender,
            password: password_hash,
            source: data.source,
            referral_code: Some(referral_code),
            customer_id: Some(customer_id),
            ..Default::default()
        });
        let created = self.user_repository.create(user).await?;
        tracing::info!(user_id = %created.id, "user created by administrator");
        Ok(UserView::project(&created, &self.assets))
    }

    /// Page through accounts, newest first
    pub async fn list(
        &self,
        filter: SearchFilter,
        page: PageQuery,
    ) -> DomainResult<(Vec<UserView>, PageMeta)> {
        let total = self.user_repository.count(&filter).await?;
        let users = self
            .user_repository
            .search(&filter, page.offset_i64(), page.limit_i64())
            .await?;
        let views = users
            .iter()
            .map(|u| UserView::project(u, &self.assets))
            .collect();
        Ok((views, PageMeta::new(page.page, page.per_page, total)))
    }

    /// One-shot lookup across name, phone, email, bvn and customer id
    pub async fn search(
        &self,
        query: &str,
        per_page: u32,
    ) -> DomainResult<(Vec<UserView>, PageMeta)> {
        let filter = SearchFilter {
            query: Some(query.to_string()),
            ..Default::default()
        };
        let users = self
            .user_repository
            .search(&filter, 0, i64::from(per_page))
            .await?;
        let views: Vec<UserView> = users
            .iter()
            .map(|u| UserView::project(u, &self.assets))
            .collect();
        let meta = PageMeta::single(views.len() as u64);
        Ok((views, meta))
    }

    /// Fetch a single account
    pub async fn find(&self, id: Uuid) -> DomainResult<UserView> {
        let user = self.require(id).await?;
        Ok(UserView::project(&user, &self.assets))
    }

    /// Apply a partial administrative update
    ///
    /// A phone number in the update is canonicalized before storage.
    pub async fn update(&self, id: Uuid, mut update: UserUpdate) -> DomainResult<Uuid> {
        let mut user = self.require(id).await?;
        if let Some(raw) = &update.phone_number {
            update.phone_number = Some(phone::canonicalize(raw));
        }
        user.apply_admin_update(update);
        let user = self.user_repository.update(user).await?;
        Ok(user.id)
    }

    /// Soft-delete an account
    pub async fn remove(&self, id: Uuid) -> DomainResult<()> {
        let mut user = self.require(id).await?;
        user.mark_deleted();
        self.user_repository.update(user).await?;
        tracing::info!(user_id = %id, "user soft-deleted");
        Ok(())
    }

    /// Count accounts matching the filter
    pub async fn metrics(&self, filter: SearchFilter) -> DomainResult<u64> {
        self.user_repository.count(&filter).await
    }

    /// Replace an account's email, refused once the email is verified
    pub async fn update_email(&self, id: Uuid, email: String) -> DomainResult<UserView> {
        let mut user = self.require(id).await?;
        if user.email_otp_verified == Some(true) {
            return Err(DomainError::precondition(EMAIL_LOCKED));
        }
        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict(EMAIL_EXISTS));
        }

        user.email = Some(email.clone());
        user.email_valid = None;
        let user = self.user_repository.update(user).await?;

        emit(
            self.notifier.as_ref(),
            Notification::VerifyEmail {
                user_id: user.id,
                email,
            },
        )
        .await;
        Ok(UserView::project(&user, &self.assets))
    }

    /// Replace an account's phone, refused once the phone is verified
    pub async fn update_phone(&self, id: Uuid, phone_number: String) -> DomainResult<UserView> {
        let mut user = self.require(id).await?;
        if user.phone_otp_verified == Some(true) {
            return Err(DomainError::precondition(PHONE_LOCKED));
        }
        let canonical = phone::canonicalize(&phone_number);
        if self
            .user_repository
            .find_by_phone(&phone_number, &canonical)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(PHONE_EXISTS));
        }

        user.phone_number = Some(canonical);
        let user = self.user_repository.update(user).await?;
        Ok(UserView::project(&user, &self.assets))
    }

    /// Place an account under suspension
    pub async fn suspend(
        &self,
        id: Uuid,
        actor: Uuid,
        message: Option<String>,
    ) -> DomainResult<UserView> {
        let mut user = self.require(id).await?;
        if user.is_closed() {
            return Err(DomainError::precondition(ACCOUNT_UNDER_REVIEW));
        }
        if user.is_suspended() {
            return Err(DomainError::precondition(ALREADY_SUSPENDED));
        }
        user.suspend();
        let user = self.user_repository.update(user).await?;
        self.log_activity(actor, "Suspend", id, message).await;
        Ok(UserView::project(&user, &self.assets))
    }

    /// Lift an account's suspension
    pub async fn unsuspend(
        &self,
        id: Uuid,
        actor: Uuid,
        message: Option<String>,
    ) -> DomainResult<UserView> {
        let mut user = self.require(id).await?;
        if !user.is_suspended() {
            return Err(DomainError::precondition(NOT_SUSPENDED));
        }
        user.unsuspend();
        let user = self.user_repository.update(user).await?;
        self.log_activity(actor, "Unsuspend", id, message).await;
        Ok(UserView::project(&user, &self.assets))
    }

    /// Close an account
    pub async fn close(
        &self,
        id: Uuid,
        actor: Uuid,
        message: Option<String>,
    ) -> DomainResult<UserView> {
        let mut user = self.require(id).await?;
        if user.is_closed() {
            return Err(DomainError::precondition(ALREADY_CLOSED));
        }
        user.close();
        let user = self.user_repository.update(user).await?;
        self.log_activity(actor, "Close", id, message).await;
        Ok(UserView::project(&user, &self.assets))
    }

    /// Reopen a closed account
    pub async fn open(
        &self,
        id: Uuid,
        actor: Uuid,
        message: Option<String>,
    ) -> DomainResult<UserView> {
        let mut user = self.require(id).await?;
        if !user.is_closed() {
            return Err(DomainError::precondition(NOT_CLOSED));
        }
        user.open();
        let user = self.user_repository.update(user).await?;
        self.log_activity(actor, "Open", id, message).await;
        Ok(UserView::project(&user, &self.assets))
    }

    async fn require(&self, id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    async fn log_activity(&self, actor: Uuid, action: &str, target: Uuid, message: Option<String>) {
        emit(
            self.notifier.as_ref(),
            Notification::Activity {
                actor,
                action: action.to_string(),
                target,
                message,
            },
        )
        .await;
    }
}
