//! Back-office request DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use kb_core::domain::entities::UserUpdate;
use kb_core::repositories::SearchFilter;
use kb_core::services::admin::AdminCreateData;
use kb_shared::types::PageQuery;
use kb_shared::utils::text::{strict_date, title_case};

use super::user_dto::{validate_date_field, validate_phone_field, UpdateProfileRequest};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminCreateRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(custom = "validate_phone_field")]
    pub phone_number: Option<String>,
    #[validate(length(min = 8, max = 64, message = "must be 8 to 64 characters"))]
    pub password: Option<String>,
    pub gender: Option<String>,
    pub source: Option<String>,
}

impl AdminCreateRequest {
    pub fn normalize(&mut self) {
        if let Some(v) = &mut self.first_name {
            *v = title_case(v.trim());
        }
        if let Some(v) = &mut self.last_name {
            *v = title_case(v.trim());
        }
        if let Some(v) = &mut self.email {
            *v = v.trim().to_lowercase();
        }
        if let Some(v) = &mut self.phone_number {
            *v = v.trim().to_string();
        }
    }

    pub fn into_create_data(self) -> AdminCreateData {
        AdminCreateData {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            password: self.password,
            gender: self.gender,
            source: self.source,
        }
    }
}

/// Administrative partial update; supersets the profile fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdminUpdateRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(custom = "validate_phone_field")]
    pub phone_number: Option<String>,
    #[validate(length(equal = 11, message = "must be 11 digits"))]
    pub bvn: Option<String>,
    #[validate(range(min = 0, max = 3, message = "must be an account tier"))]
    pub tier: Option<i32>,
    pub source: Option<String>,

    #[serde(flatten)]
    #[validate]
    pub profile: UpdateProfileRequest,
}

impl AdminUpdateRequest {
    pub fn normalize(&mut self) {
        if let Some(v) = &mut self.first_name {
            *v = title_case(v.trim());
        }
        if let Some(v) = &mut self.last_name {
            *v = title_case(v.trim());
        }
        if let Some(v) = &mut self.email {
            *v = v.trim().to_lowercase();
        }
        self.profile.normalize();
    }

    pub fn into_user_update(self) -> UserUpdate {
        UserUpdate {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            bvn: self.bvn,
            tier: self.tier,
            source: self.source,
            profile: Some(self.profile.into_profile_update()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEmailRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePhoneRequest {
    #[validate(custom = "validate_phone_field")]
    pub phone_number: String,
}

/// Optional note recorded in the activity trail of a state transition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusActionRequest {
    pub message: Option<String>,
}

/// Query string for the paged user listing and metrics
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListUsersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub query: Option<String>,
    #[validate(custom = "validate_date_field")]
    pub from: Option<String>,
    #[validate(custom = "validate_date_field")]
    pub to: Option<String>,
}

impl ListUsersQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page.unwrap_or(1), self.per_page.unwrap_or(12))
    }

    /// Build the repository filter; `from` starts its day, `to` ends it
    pub fn filter(&self) -> SearchFilter {
        let from = self
            .from
            .as_deref()
            .and_then(strict_date)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());
        let to = self
            .to
            .as_deref()
            .and_then(strict_date)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .map(|dt| dt.and_utc());
        SearchFilter {
            query: self.query.clone().filter(|q| !q.trim().is_empty()),
            from,
            to,
        }
    }
}

/// Query string for the one-shot search endpoint
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchUsersQuery {
    #[validate(length(min = 1, message = "is required"))]
    pub query: String,
    pub per_page: Option<u32>,
}

impl SearchUsersQuery {
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(12)
    }
}
