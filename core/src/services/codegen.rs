//! Uniqueness-code generation
//!
//! Referral codes and customer ids are drawn at random and re-drawn
//! until no existing row holds the value. The retry loop is unbounded;
//! this is acceptable only because the code space is large relative to
//! the table size.

use std::future::Future;

use rand::Rng;

use crate::errors::DomainResult;

const DIGITS: &[u8] = b"0123456789";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Character set used when drawing a candidate code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCharset {
    /// Numeric codes (customer ids)
    Digits,
    /// Uppercase alphanumeric codes (referral codes)
    Alphanumeric,
}

impl CodeCharset {
    fn chars(self) -> &'static [u8] {
        match self {
            CodeCharset::Digits => DIGITS,
            CodeCharset::Alphanumeric => ALPHANUMERIC,
        }
    }
}

fn draw(len: usize, charset: CodeCharset) -> String {
    let chars = charset.chars();
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| chars[rng.gen_range(0..chars.len())] as char)
        .collect()
}

/// Draw a random numeric-digit code
pub fn random_digits(len: usize) -> String {
    draw(len, CodeCharset::Digits)
}

/// Draw a random uppercase-alphanumeric code
pub fn random_code(len: usize) -> String {
    draw(len, CodeCharset::Alphanumeric)
}

/// Draw candidates until the existence check reports no collision
///
/// `exists` queries persistence for a matching value. The returned
/// value is absent from the table at check time; a race with a
/// concurrent insert of the same value is not guarded here.
pub async fn generate_unique<F, Fut>(
    len: usize,
    charset: CodeCharset,
    exists: F,
) -> DomainResult<String>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = DomainResult<bool>>,
{
    loop {
        let candidate = draw(len, charset);
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_random_digits_charset_and_length() {
        let code = random_digits(8);
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_random_code_charset_and_length() {
        let code = random_code(12);
        assert_eq!(code.len(), 12);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_returns_first_unused_draw() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_check = Arc::clone(&calls);

        // collide on the first 3 draws, then succeed
        let code = generate_unique(6, CodeCharset::Digits, move |_candidate| {
            let calls = Arc::clone(&calls_in_check);
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Ok(n < 3)
            }
        })
        .await
        .unwrap();

        assert_eq!(code.len(), 6);
        // exactly K+1 existence checks for K collisions
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_no_collision_checks_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_check = Arc::clone(&calls);

        generate_unique(12, CodeCharset::Alphanumeric, move |_| {
            let calls = Arc::clone(&calls_in_check);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(false)
            }
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_existence_check_errors_propagate() {
        let result = generate_unique(6, CodeCharset::Digits, |_| async {
            Err(crate::errors::DomainError::Database("gone".to_string()))
        })
        .await;
        assert!(result.is_err());
    }
}
