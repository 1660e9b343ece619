//! Registration, login, token refresh and the profile surface.

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use uuid::Uuid;

use kb_shared::config::AssetConfig;
use kb_shared::utils::phone;

use crate::domain::entities::{NewUser, ProfileUpdate, User};
use crate::domain::value_objects::UserView;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::codegen::{generate_unique, CodeCharset};
use crate::services::notifier::{emit, Notification, Notifier};
use crate::services::token::TokenService;

const CUSTOMER_ID_LEN: usize = 8;
const REFERRAL_CODE_LEN: usize = 12;

const PHONE_TAKEN: &str = "Looks like you already have an account. Phone number already exist";
const EMAIL_TAKEN: &str = "Looks like you already have an account. Email already exist";

/// Read-side settings the workflow needs for projections
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    pub assets: AssetConfig,
    pub acquire_secret: String,
}

/// Validated registration input, phone still in caller-supplied form
#[derive(Debug, Clone, Default)]
pub struct RegisterData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub gender: Option<String>,
    pub referral_code: Option<String>,
    pub device_id: Option<String>,
    pub device_type: Option<String>,
    pub source: Option<String>,
}

/// Device metadata captured at sign-in
#[derive(Debug, Clone, Default)]
pub struct DeviceMeta {
    pub device_id: Option<String>,
    pub device_type: Option<String>,
}

/// A signed token together with the masked account it belongs to
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthOutcome {
    pub token: String,
    pub user: UserView,
}

/// Authentication and profile use cases
pub struct AuthService<R: UserRepository, N: Notifier> {
    user_repository: Arc<R>,
    notifier: Arc<N>,
    tokens: Arc<TokenService>,
    config: AuthServiceConfig,
}

impl<R: UserRepository, N: Notifier> AuthService<R, N> {
    pub fn new(
        user_repository: Arc<R>,
        notifier: Arc<N>,
        tokens: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            notifier,
            tokens,
            config,
        }
    }

    /// Create an account and sign the caller in
    ///
    /// Phone ownership is checked before email, so a request clashing
    /// on both reports the phone conflict.
    pub async fn register(&self, data: RegisterData) -> DomainResult<AuthOutcome> {
        let canonical_phone = phone::canonicalize(&data.phone_number);

        if self
            .user_repository
            .find_by_phone(&data.phone_number, &canonical_phone)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(PHONE_TAKEN));
        }
        if self
            .user_repository
            .find_by_email(&data.email)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(EMAIL_TAKEN));
        }

        // An unknown referral code is not an error; the account simply
        // has no referrer.
        let referrer_id = match &data.referral_code {
            Some(code) => self
                .user_repository
                .find_by_referral_code(code)
                .await?
                .map(|owner| owner.id),
            None => None,
        };

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

        let password_hash = hash(&data.password, DEFAULT_COST)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))?;

        let user = User::new(NewUser {
            first_name: data.first_name,
            last_name: data.last_name,
            email: Some(data.email),
            phone_number: Some(canonical_phone),
            gender: data.gender,
            password: Some(password_hash),
            device_id: data.device_id,
            device_type: data.device_type,
            source: data.source,
            referrer_id,
            referral_code: Some(referral_code),
            customer_id: Some(customer_id),
        });
        let created = self.user_repository.create(user).await?;

        if let Some(email) = created.email.clone() {
            emit(
                self.notifier.as_ref(),
                Notification::VerifyEmail {
                    user_id: created.id,
                    email,
                },
            )
            .await;
        }
        emit(
            self.notifier.as_ref(),
            Notification::UserRegistered {
                user_id: created.id,
            },
        )
        .await;

        tracing::info!(user_id = %created.id, "user registered");
        self.outcome(created)
    }

    /// Check an email/password pair and return the matching account
    pub async fn verify_credentials(&self, email: &str, password: &str) -> DomainResult<User> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;
        let stored = user
            .password
            .as_deref()
            .ok_or(DomainError::InvalidCredentials)?;
        let matches = verify(password, stored).map_err(|_| DomainError::InvalidCredentials)?;
        if !matches {
            return Err(DomainError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Sign a verified account in, refreshing its device metadata
    ///
    /// Accounts not yet screened by the fraud check are asked to
    /// re-verify their email on every sign-in.
    pub async fn login(&self, mut user: User, device: DeviceMeta) -> DomainResult<AuthOutcome> {
        user.touch_device(device.device_id, device.device_type);
        let user = self.user_repository.update(user).await?;

        if user.fraudulent.is_none() {
            if let Some(email) = user.email.clone() {
                emit(
                    self.notifier.as_ref(),
                    Notification::VerifyEmail {
                        user_id: user.id,
                        email,
                    },
                )
                .await;
            }
        }
        emit(
            self.notifier.as_ref(),
            Notification::UserLoggedIn { user_id: user.id },
        )
        .await;

        tracing::info!(user_id = %user.id, "user logged in");
        self.outcome(user)
    }

    /// Exchange a possibly-expired token for a fresh one
    pub async fn refresh(&self, token: &str) -> DomainResult<String> {
        let subject = self.tokens.subject_for_refresh(token)?;
        let user = self
            .user_repository
            .find_by_id(subject)
            .await?
            .ok_or(DomainError::InvalidSession)?;
        self.tokens.issue(user.id)
    }

    /// The caller's own profile, including the acquire identity hash
    pub async fn profile(&self, user_id: Uuid) -> DomainResult<UserView> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        Ok(UserView::project(&user, &self.config.assets)
            .with_acquire_hash(&self.config.acquire_secret))
    }

    /// Merge a partial profile update into the caller's account
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> DomainResult<UserView> {
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        user.apply_profile_update(update);
        let user = self.user_repository.update(user).await?;
        Ok(UserView::project(&user, &self.config.assets))
    }

    fn outcome(&self, user: User) -> DomainResult<AuthOutcome> {
        let token = self.tokens.issue(user.id)?;
        Ok(AuthOutcome {
            token,
            user: UserView::project(&user, &self.config.assets),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;
    use crate::services::notifier::MockNotifier;

    fn config() -> AuthServiceConfig {
        AuthServiceConfig {
            assets: AssetConfig {
                profile_base_url: "https://cdn.example.com/profiles".to_string(),
                document_base_url: "https://cdn.example.com/documents".to_string(),
            },
            acquire_secret: "acquire-secret".to_string(),
        }
    }

    fn service() -> AuthService<MockUserRepository, MockNotifier> {
        AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockNotifier::new()),
            Arc::new(TokenService::new("unit-test-secret-0123456789abcdef", 3600)),
            config(),
        )
    }

    fn register_data(email: &str, phone: &str) -> RegisterData {
        RegisterData {
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: email.to_string(),
            password: "s3cret-pass".to_string(),
            phone_number: phone.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_creates_account_with_generated_codes() {
        let svc = service();
        let outcome = svc
            .register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap();

        let view = outcome.user;
        assert!(view.password.is_none());
        assert_eq!(view.phone_number.as_deref(), Some("2348031234567"));
        assert_eq!(view.customer_id.map(|c| c.len()), Some(8));
        assert_eq!(view.referral_code.map(|c| c.len()), Some(12));

        // the issued token is immediately usable
        let claims = svc.tokens.verify(&outcome.token).unwrap();
        assert_eq!(claims.sub, view.id.to_string());

        let events = svc.notifier.recorded().await;
        assert!(matches!(events[0], Notification::VerifyEmail { .. }));
        assert!(matches!(events[1], Notification::UserRegistered { .. }));
    }

    #[tokio::test]
    async fn test_register_reports_phone_conflict_before_email() {
        let svc = service();
        svc.register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap();

        // clashes on both; the phone message wins
        let err = svc
            .register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), PHONE_TAKEN);

        // clashes on email only
        let err = svc
            .register(register_data("jane@example.com", "08139998877"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), EMAIL_TAKEN);
    }

    #[tokio::test]
    async fn test_register_matches_phone_in_either_form() {
        let svc = service();
        svc.register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap();

        // same number, canonical form this time
        let err = svc
            .register(register_data("other@example.com", "2348031234567"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), PHONE_TAKEN);
    }

    #[tokio::test]
    async fn test_register_resolves_referrer_and_ignores_unknown_codes() {
        let svc = service();
        let referrer = svc
            .register(register_data("ref@example.com", "08031234567"))
            .await
            .unwrap();
        let code = referrer.user.referral_code.clone().unwrap();

        let mut data = register_data("friend@example.com", "08139998877");
        data.referral_code = Some(code);
        let outcome = svc.register(data).await.unwrap();
        assert_eq!(outcome.user.referrer_id, Some(referrer.user.id));

        let mut data = register_data("loner@example.com", "08120001122");
        data.referral_code = Some("NOSUCHCODE99".to_string());
        let outcome = svc.register(data).await.unwrap();
        assert!(outcome.user.referrer_id.is_none());
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let svc = service();
        svc.register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap();

        let user = svc
            .verify_credentials("jane@example.com", "s3cret-pass")
            .await
            .unwrap();
        assert_eq!(user.email.as_deref(), Some("jane@example.com"));

        assert!(matches!(
            svc.verify_credentials("jane@example.com", "wrong").await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            svc.verify_credentials("nobody@example.com", "s3cret-pass")
                .await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_merges_device_and_notifies() {
        let svc = service();
        svc.register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap();
        let user = svc
            .verify_credentials("jane@example.com", "s3cret-pass")
            .await
            .unwrap();

        let outcome = svc
            .login(
                user,
                DeviceMeta {
                    device_id: Some("pixel-9".to_string()),
                    device_type: Some("android".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome.user.device_id.as_deref(), Some("pixel-9"));

        let events = svc.notifier.recorded().await;
        // register emits two, login re-asks for email verification then
        // announces the sign-in
        assert!(matches!(events[2], Notification::VerifyEmail { .. }));
        assert!(matches!(events[3], Notification::UserLoggedIn { .. }));
    }

    #[tokio::test]
    async fn test_login_skips_verify_email_once_screened() {
        let svc = service();
        svc.register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap();
        let mut user = svc
            .verify_credentials("jane@example.com", "s3cret-pass")
            .await
            .unwrap();
        user.fraudulent = Some(false);

        svc.login(user, DeviceMeta::default()).await.unwrap();

        let events = svc.notifier.recorded().await;
        assert_eq!(events.len(), 3);
        assert!(matches!(events[2], Notification::UserLoggedIn { .. }));
    }

    #[tokio::test]
    async fn test_refresh_accepts_expired_token_for_known_user() {
        let repo = Arc::new(MockUserRepository::new());
        let expired_tokens = TokenService::new("unit-test-secret-0123456789abcdef", -60);
        let svc = AuthService::new(
            Arc::clone(&repo),
            Arc::new(MockNotifier::new()),
            Arc::new(TokenService::new("unit-test-secret-0123456789abcdef", 3600)),
            config(),
        );

        let outcome = svc
            .register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap();
        let stale = expired_tokens.issue(outcome.user.id).unwrap();

        let fresh = svc.refresh(&stale).await.unwrap();
        let claims = svc.tokens.verify(&fresh).unwrap();
        assert_eq!(claims.sub, outcome.user.id.to_string());
    }

    #[tokio::test]
    async fn test_refresh_for_unknown_subject_is_invalid_session() {
        let svc = service();
        let ghost = svc.tokens.issue(Uuid::new_v4()).unwrap();
        let err = svc.refresh(&ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidSession));
        assert_eq!(err.to_string(), "You need to login again :)");
    }

    #[tokio::test]
    async fn test_profile_carries_acquire_hash() {
        let svc = service();
        let outcome = svc
            .register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap();

        let view = svc.profile(outcome.user.id).await.unwrap();
        assert_eq!(view.acquire_hash.as_ref().map(|h| h.len()), Some(64));

        // the hash never leaks outside the profile read
        assert!(outcome.user.acquire_hash.is_none());
    }

    #[tokio::test]
    async fn test_update_profile_merges_partial_fields() {
        let svc = service();
        let outcome = svc
            .register(register_data("jane@example.com", "08031234567"))
            .await
            .unwrap();

        let view = svc
            .update_profile(
                outcome.user.id,
                ProfileUpdate {
                    employer: Some("Acme".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(view.employer.as_deref(), Some("Acme"));
        assert_eq!(view.first_name.as_deref(), Some("Jane"));
    }
}
