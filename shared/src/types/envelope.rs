//! Uniform response envelope returned by every endpoint

use serde::{Deserialize, Serialize};

use super::pagination::PageMeta;

/// Standard response wrapper
///
/// Every endpoint normalizes its outcome into exactly one of two shapes:
/// a success envelope carrying a payload (and optionally pagination
/// metadata) or an error envelope carrying only a title and message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the request was successful
    pub status: bool,

    /// Short human-readable context (e.g. "User Registration")
    pub title: String,

    /// Outcome description
    pub message: String,

    /// Response payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Pagination metadata for list responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

impl<T> Envelope<T> {
    /// Create a successful response
    pub fn success(data: T, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: true,
            title: title.into(),
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    /// Create an error response
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: false,
            title: title.into(),
            message: message.into(),
            data: None,
            pagination: None,
        }
    }

    /// Attach pagination metadata to a success response
    pub fn with_pagination(mut self, meta: PageMeta) -> Self {
        self.pagination = Some(meta);
        self
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.status
    }

    /// Extract the payload, consuming the envelope
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let env = Envelope::success(42, "Users", "User details");
        assert!(env.status);
        assert_eq!(env.title, "Users");
        assert_eq!(env.data, Some(42));
        assert!(env.pagination.is_none());
    }

    #[test]
    fn test_error_envelope_has_no_data() {
        let env: Envelope<()> = Envelope::error("Registration", "Email already exist");
        assert!(!env.status);
        assert!(env.data.is_none());

        let json = serde_json::to_value(&env).unwrap();
        assert!(json.get("data").is_none());
        assert!(json.get("pagination").is_none());
    }

    #[test]
    fn test_envelope_with_pagination() {
        let meta = PageMeta::new(2, 12, 40);
        let env = Envelope::success(vec![1, 2, 3], "Users", "Users list").with_pagination(meta);
        let page = env.pagination.unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total, 40);
    }
}
