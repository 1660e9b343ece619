//! User entity representing a registered account in the Kobo system.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity backing the `users` table
///
/// Sensitive columns (`password`, `pin`, `bvn`) hold hashes or raw
/// values that must never leave the system unmasked; responses go
/// through [`crate::domain::value_objects::UserView`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// 8-digit customer id, server-generated, globally unique
    pub customer_id: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,

    /// Email, unique among non-deleted users
    pub email: Option<String>,
    pub email_valid: Option<bool>,
    pub email_otp_verified: Option<bool>,

    /// Phone number in the canonical digit format
    pub phone_number: Option<String>,
    pub phone_otp_verified: Option<bool>,

    /// bcrypt hash of the password
    pub password: Option<String>,

    /// bcrypt hash of the 4-digit PIN
    pub pin: Option<String>,

    /// Bank verification number (11 digits)
    pub bvn: Option<String>,
    pub bvn_valid: Option<bool>,
    pub bvn_otp_verified: Option<bool>,

    /// Set by the external fraud check; None means not yet screened
    pub fraudulent: Option<bool>,

    // Profile block
    pub home_address: Option<String>,
    pub state_of_residence: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub no_of_children: Option<i32>,
    pub payday: Option<i32>,
    pub net_income: Option<f64>,
    pub monthly_income: Option<f64>,
    pub date_of_employment: Option<NaiveDate>,
    pub type_of_employment: Option<String>,
    pub industry: Option<String>,
    pub employer: Option<String>,
    pub employer_address: Option<String>,
    pub employer_state: Option<String>,
    pub company_name: Option<String>,

    // Next of kin block
    pub next_of_kin_title: Option<String>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_relationship: Option<String>,
    pub next_of_kin_phone: Option<String>,
    pub next_of_kin_address: Option<String>,
    pub next_of_kin_state: Option<String>,

    /// Unique referral token owned by this user (6-12 chars)
    pub referral_code: Option<String>,

    /// Resolved once at registration, immutable thereafter
    pub referrer_id: Option<Uuid>,

    // Device and session metadata
    pub device_id: Option<String>,
    pub device_type: Option<String>,
    pub source: Option<String>,

    /// Stored relative path; full URL composed at the read boundary
    pub image: Option<String>,

    /// Stored relative path; full URL composed at the read boundary
    pub document: Option<String>,

    pub tier: Option<i32>,
    pub language: Option<String>,

    // Lifecycle timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; non-null rows are invisible to normal reads
    pub deleted_at: Option<DateTime<Utc>>,

    pub suspended_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Data required to create a user row
///
/// `referral_code` and `customer_id` are always server-generated;
/// `password` arrives already hashed.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub password: Option<String>,
    pub device_id: Option<String>,
    pub device_type: Option<String>,
    pub source: Option<String>,
    pub referrer_id: Option<Uuid>,
    pub referral_code: Option<String>,
    pub customer_id: Option<String>,
}

impl User {
    /// Creates a new User from registration data
    pub fn new(data: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id: data.customer_id,
            first_name: data.first_name,
            last_name: data.last_name,
            gender: data.gender,
            marital_status: None,
            email: data.email,
            email_valid: None,
            email_otp_verified: None,
            phone_number: data.phone_number,
            phone_otp_verified: None,
            password: data.password,
            pin: None,
            bvn: None,
            bvn_valid: None,
            bvn_otp_verified: None,
            fraudulent: None,
            home_address: None,
            state_of_residence: None,
            date_of_birth: None,
            no_of_children: None,
            payday: None,
            net_income: None,
            monthly_income: None,
            date_of_employment: None,
            type_of_employment: None,
            industry: None,
            employer: None,
            employer_address: None,
            employer_state: None,
            company_name: None,
            next_of_kin_title: None,
            next_of_kin_name: None,
            next_of_kin_relationship: None,
            next_of_kin_phone: None,
            next_of_kin_address: None,
            next_of_kin_state: None,
            referral_code: data.referral_code,
            referrer_id: data.referrer_id,
            device_id: data.device_id,
            device_type: data.device_type,
            source: data.source,
            image: None,
            document: None,
            tier: None,
            language: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            suspended_at: None,
            closed_at: None,
        }
    }

    /// Whether the account is currently suspended
    pub fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }

    /// Whether the account is currently closed
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    /// Whether the account has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Place the account under suspension
    pub fn suspend(&mut self) {
        self.suspended_at = Some(Utc::now());
        self.touch();
    }

    /// Lift a suspension
    pub fn unsuspend(&mut self) {
        self.suspended_at = None;
        self.touch();
    }

    /// Close the account
    pub fn close(&mut self) {
        self.closed_at = Some(Utc::now());
        self.touch();
    }

    /// Reopen a closed account
    pub fn open(&mut self) {
        self.closed_at = None;
        self.touch();
    }

    /// Soft-delete the account
    pub fn mark_deleted(&mut self) {
        self.deleted_at = Some(Utc::now());
        self.touch();
    }

    /// Update device metadata, keeping existing values when absent
    pub fn touch_device(&mut self, device_id: Option<String>, device_type: Option<String>) {
        if device_id.is_some() {
            self.device_id = device_id;
        }
        if device_type.is_some() {
            self.device_type = device_type;
        }
        self.touch();
    }

    /// Apply a partial profile update onto the record
    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        merge(&mut self.gender, update.gender);
        merge(&mut self.marital_status, update.marital_status);
        merge(&mut self.no_of_children, update.no_of_children);
        merge(&mut self.home_address, update.home_address);
        merge(&mut self.state_of_residence, update.state_of_residence);
        merge(&mut self.date_of_birth, update.date_of_birth);
        merge(&mut self.payday, update.payday);
        merge(&mut self.net_income, update.net_income);
        merge(&mut self.monthly_income, update.monthly_income);
        merge(&mut self.date_of_employment, update.date_of_employment);
        merge(&mut self.type_of_employment, update.type_of_employment);
        merge(&mut self.industry, update.industry);
        merge(&mut self.employer, update.employer);
        merge(&mut self.employer_address, update.employer_address);
        merge(&mut self.employer_state, update.employer_state);
        merge(&mut self.company_name, update.company_name);
        merge(&mut self.next_of_kin_title, update.next_of_kin_title);
        merge(&mut self.next_of_kin_name, update.next_of_kin_name);
        merge(
            &mut self.next_of_kin_relationship,
            update.next_of_kin_relationship,
        );
        merge(&mut self.next_of_kin_phone, update.next_of_kin_phone);
        merge(&mut self.next_of_kin_address, update.next_of_kin_address);
        merge(&mut self.next_of_kin_state, update.next_of_kin_state);
        merge(&mut self.language, update.language);
        self.touch();
    }

    /// Apply an administrative partial update onto the record
    pub fn apply_admin_update(&mut self, update: UserUpdate) {
        merge(&mut self.first_name, update.first_name);
        merge(&mut self.last_name, update.last_name);
        merge(&mut self.email, update.email);
        merge(&mut self.phone_number, update.phone_number);
        merge(&mut self.bvn, update.bvn);
        merge(&mut self.tier, update.tier);
        merge(&mut self.source, update.source);
        if let Some(profile) = update.profile {
            self.apply_profile_update(profile);
        } else {
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Partial set of self-service profile fields
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub no_of_children: Option<i32>,
    pub home_address: Option<String>,
    pub state_of_residence: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub payday: Option<i32>,
    pub net_income: Option<f64>,
    pub monthly_income: Option<f64>,
    pub date_of_employment: Option<NaiveDate>,
    pub type_of_employment: Option<String>,
    pub industry: Option<String>,
    pub employer: Option<String>,
    pub employer_address: Option<String>,
    pub employer_state: Option<String>,
    pub company_name: Option<String>,
    pub next_of_kin_title: Option<String>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_relationship: Option<String>,
    pub next_of_kin_phone: Option<String>,
    pub next_of_kin_address: Option<String>,
    pub next_of_kin_state: Option<String>,
    pub language: Option<String>,
}

/// Administrative partial update; supersets the profile fields
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub bvn: Option<String>,
    pub tier: Option<i32>,
    pub source: Option<String>,
    pub profile: Option<ProfileUpdate>,
}

fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(NewUser {
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone_number: Some("2348031234567".to_string()),
            password: Some("hashed".to_string()),
            referral_code: Some("ABC123XYZ456".to_string()),
            customer_id: Some("12345678".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();
        assert!(user.pin.is_none());
        assert!(user.deleted_at.is_none());
        assert!(!user.is_suspended());
        assert!(!user.is_closed());
        assert_eq!(user.customer_id.as_deref(), Some("12345678"));
    }

    #[test]
    fn test_suspend_and_unsuspend() {
        let mut user = sample_user();
        user.suspend();
        assert!(user.is_suspended());
        user.unsuspend();
        assert!(!user.is_suspended());
    }

    #[test]
    fn test_close_and_open() {
        let mut user = sample_user();
        user.close();
        assert!(user.is_closed());
        user.open();
        assert!(!user.is_closed());
    }

    #[test]
    fn test_suspended_and_closed_are_independent_markers() {
        let mut user = sample_user();
        user.suspend();
        user.close();
        assert!(user.is_suspended());
        assert!(user.is_closed());
    }

    #[test]
    fn test_profile_update_is_partial_merge() {
        let mut user = sample_user();
        user.home_address = Some("1 Old Street".to_string());

        user.apply_profile_update(ProfileUpdate {
            employer: Some("Acme".to_string()),
            ..Default::default()
        });

        assert_eq!(user.employer.as_deref(), Some("Acme"));
        // untouched fields survive
        assert_eq!(user.home_address.as_deref(), Some("1 Old Street"));
    }

    #[test]
    fn test_touch_device_keeps_existing_when_absent() {
        let mut user = sample_user();
        user.device_id = Some("old-device".to_string());
        user.touch_device(None, Some("android".to_string()));
        assert_eq!(user.device_id.as_deref(), Some("old-device"));
        assert_eq!(user.device_type.as_deref(), Some("android"));
    }

    #[test]
    fn test_mark_deleted() {
        let mut user = sample_user();
        user.mark_deleted();
        assert!(user.is_deleted());
    }
}
