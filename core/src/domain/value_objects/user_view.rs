//! Masked projection of the user entity
//!
//! The stored entity is free of presentation concerns; this projection
//! applies them in one place at the read boundary: password nulling,
//! PIN/BVN masking, and asset URL composition.

use chrono::{DateTime, NaiveDate, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use uuid::Uuid;

use kb_shared::config::AssetConfig;
use kb_shared::utils::mask::mask;

use crate::domain::entities::User;

type HmacSha256 = Hmac<Sha256>;

/// User representation safe for inclusion in responses
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub customer_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub email: Option<String>,
    pub email_valid: Option<bool>,
    pub email_otp_verified: Option<bool>,
    pub phone_number: Option<String>,
    pub phone_otp_verified: Option<bool>,

    /// Always serialized as null
    pub password: Option<String>,

    /// Partially redacted
    pub pin: Option<String>,

    /// Partially redacted
    pub bvn: Option<String>,

    pub bvn_valid: Option<bool>,
    pub bvn_otp_verified: Option<bool>,
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
    pub next_of_kin_title: Option<String>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_relationship: Option<String>,
    pub next_of_kin_phone: Option<String>,
    pub next_of_kin_address: Option<String>,
    pub next_of_kin_state: Option<String>,
    pub referral_code: Option<String>,
    pub referrer_id: Option<Uuid>,
    pub device_id: Option<String>,
    pub device_type: Option<String>,
    pub source: Option<String>,

    /// Full URL composed from the configured base and the stored path
    pub image: Option<String>,

    /// Full URL composed from the configured base and the stored path
    pub document: Option<String>,

    pub tier: Option<i32>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub suspended_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,

    /// Keyed identity hash, present only on profile reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquire_hash: Option<String>,
}

impl UserView {
    /// Project a stored user into its response shape
    pub fn project(user: &User, assets: &AssetConfig) -> Self {
        Self {
            id: user.id,
            customer_id: user.customer_id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            gender: user.gender.clone(),
            marital_status: user.marital_status.clone(),
            email: user.email.clone(),
            email_valid: user.email_valid,
            email_otp_verified: user.email_otp_verified,
            phone_number: user.phone_number.clone(),
            phone_otp_verified: user.phone_otp_verified,
            password: None,
            pin: mask(user.pin.as_deref()),
            bvn: mask(user.bvn.as_deref()),
            bvn_valid: user.bvn_valid,
            bvn_otp_verified: user.bvn_otp_verified,
            home_address: user.home_address.clone(),
            state_of_residence: user.state_of_residence.clone(),
            date_of_birth: user.date_of_birth,
            no_of_children: user.no_of_children,
            payday: user.payday,
            net_income: user.net_income,
            monthly_income: user.monthly_income,
            date_of_employment: user.date_of_employment,
            type_of_employment: user.type_of_employment.clone(),
            industry: user.industry.clone(),
            employer: user.employer.clone(),
            employer_address: user.employer_address.clone(),
            employer_state: user.employer_state.clone(),
            company_name: user.company_name.clone(),
            next_of_kin_title: user.next_of_kin_title.clone(),
            next_of_kin_name: user.next_of_kin_name.clone(),
            next_of_kin_relationship: user.next_of_kin_relationship.clone(),
            next_of_kin_phone: user.next_of_kin_phone.clone(),
            next_of_kin_address: user.next_of_kin_address.clone(),
            next_of_kin_state: user.next_of_kin_state.clone(),
            referral_code: user.referral_code.clone(),
            referrer_id: user.referrer_id,
            device_id: user.device_id.clone(),
            device_type: user.device_type.clone(),
            source: user.source.clone(),
            image: compose_url(&assets.profile_base_url, user.image.as_deref()),
            document: compose_url(&assets.document_base_url, user.document.as_deref()),
            tier: user.tier,
            language: user.language.clone(),
            created_at: user.created_at,
            suspended_at: user.suspended_at,
            closed_at: user.closed_at,
            acquire_hash: None,
        }
    }

    /// Attach the acquire identity hash (profile reads only)
    pub fn with_acquire_hash(mut self, secret: &str) -> Self {
        if let Some(email) = &self.email {
            self.acquire_hash = Some(acquire_hash(secret, email));
        }
        self
    }
}

/// Keyed hash asserting identity towards the acquire integration
///
/// hex(HMAC-SHA256(secret, email)); no raw credential crosses the wire.
pub fn acquire_hash(secret: &str, email: &str) -> String {
    // HMAC accepts keys of any length, so construction cannot fail
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(email.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn compose_url(base: &str, path: Option<&str>) -> Option<String> {
    let path = path?;
    if path.is_empty() || base.is_empty() {
        return Some(path.to_string());
    }
    Some(format!("{}/{}", base.trim_end_matches('/'), path))
}
