//! Self-service request DTOs.
//!
//! Normalization (trim, case transforms, date reduction) runs before
//! validation so the checks apply to what will actually be stored.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use kb_core::domain::entities::ProfileUpdate;
use kb_core::services::auth::{DeviceMeta, RegisterData};
use kb_shared::utils::phone;
use kb_shared::utils::text::{strict_date, title_case};

pub(crate) fn validate_phone_field(value: &str) -> Result<(), ValidationError> {
    if phone::is_valid(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("must be a valid phone number".into());
        Err(err)
    }
}

pub(crate) fn validate_date_field(value: &str) -> Result<(), ValidationError> {
    if strict_date(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("date");
        err.message = Some("must be a YYYY-MM-DD date".into());
        Err(err)
    }
}

fn trim(slot: &mut Option<String>) {
    if let Some(v) = slot {
        *v = v.trim().to_string();
    }
}

fn titled(slot: &mut Option<String>) {
    if let Some(v) = slot {
        *v = title_case(v.trim());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 64, message = "must be 8 to 64 characters"))]
    pub password: String,
    #[validate(custom = "validate_phone_field")]
    pub phone_number: String,
    pub gender: Option<String>,
    #[validate(length(min = 6, max = 12, message = "must be 6 to 12 characters"))]
    pub referral_code: Option<String>,
    pub device_id: Option<String>,
    pub device_type: Option<String>,
    pub source: Option<String>,
}

impl RegisterRequest {
    pub fn normalize(&mut self) {
        titled(&mut self.first_name);
        titled(&mut self.last_name);
        titled(&mut self.gender);
        trim(&mut self.referral_code);
        trim(&mut self.device_id);
        trim(&mut self.device_type);
        trim(&mut self.source);
        self.email = self.email.trim().to_lowercase();
        self.phone_number = self.phone_number.trim().to_string();
    }

    pub fn into_register_data(self) -> RegisterData {
        RegisterData {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            phone_number: self.phone_number,
            gender: self.gender,
            referral_code: self.referral_code,
            device_id: self.device_id,
            device_type: self.device_type,
            source: self.source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
    pub device_id: Option<String>,
    pub device_type: Option<String>,
}

impl LoginRequest {
    pub fn normalize(&mut self) {
        self.email = self.email.trim().to_lowercase();
        trim(&mut self.device_id);
        trim(&mut self.device_type);
    }

    pub fn device_meta(&self) -> DeviceMeta {
        DeviceMeta {
            device_id: self.device_id.clone(),
            device_type: self.device_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub token: String,
}

/// Partial self-service profile update; absent fields stay untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub no_of_children: Option<i32>,
    pub home_address: Option<String>,
    pub state_of_residence: Option<String>,
    #[validate(custom = "validate_date_field")]
    pub date_of_birth: Option<String>,
    #[validate(range(min = 1, max = 31, message = "must be a day of the month"))]
    pub payday: Option<i32>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub net_income: Option<f64>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub monthly_income: Option<f64>,
    #[validate(custom = "validate_date_field")]
    pub date_of_employment: Option<String>,
    pub type_of_employment: Option<String>,
    pub industry: Option<String>,
    pub employer: Option<String>,
    pub employer_address: Option<String>,
    pub employer_state: Option<String>,
    pub company_name: Option<String>,
    pub next_of_kin_title: Option<String>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_relationship: Option<String>,
    #[validate(custom = "validate_phone_field")]
    pub next_of_kin_phone: Option<String>,
    pub next_of_kin_address: Option<String>,
    pub next_of_kin_state: Option<String>,
    pub language: Option<String>,
}

impl UpdateProfileRequest {
    pub fn normalize(&mut self) {
        titled(&mut self.gender);
        titled(&mut self.marital_status);
        titled(&mut self.next_of_kin_name);
        titled(&mut self.next_of_kin_title);
        trim(&mut self.home_address);
        trim(&mut self.state_of_residence);
        trim(&mut self.type_of_employment);
        trim(&mut self.industry);
        trim(&mut self.employer);
        trim(&mut self.employer_address);
        trim(&mut self.employer_state);
        trim(&mut self.company_name);
        trim(&mut self.next_of_kin_relationship);
        trim(&mut self.next_of_kin_phone);
        trim(&mut self.next_of_kin_address);
        trim(&mut self.next_of_kin_state);
        trim(&mut self.language);
    }

    pub fn into_profile_update(self) -> ProfileUpdate {
        ProfileUpdate {
            gender: self.gender,
            marital_status: self.marital_status,
            no_of_children: self.no_of_children,
            home_address: self.home_address,
            state_of_residence: self.state_of_residence,
            date_of_birth: self.date_of_birth.as_deref().and_then(strict_date),
            payday: self.payday,
            net_income: self.net_income,
            monthly_income: self.monthly_income,
            date_of_employment: self.date_of_employment.as_deref().and_then(strict_date),
            type_of_employment: self.type_of_employment,
            industry: self.industry,
            employer: self.employer,
            employer_address: self.employer_address,
            employer_state: self.employer_state,
            company_name: self.company_name,
            next_of_kin_title: self.next_of_kin_title,
            next_of_kin_name: self.next_of_kin_name,
            next_of_kin_relationship: self.next_of_kin_relationship,
            next_of_kin_phone: self.next_of_kin_phone.as_deref().map(phone::canonicalize),
            next_of_kin_address: self.next_of_kin_address,
            next_of_kin_state: self.next_of_kin_state,
            language: self.language,
        }
    }
}
