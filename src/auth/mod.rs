// API key authentication

use crate::config::AuthConfig;
use crate::error::{Result, TranslatorError};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Header carrying the per-request secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Checks the `x-api-key` header against the configured key.
///
/// An unset key fails closed: every request is rejected, including those
/// sending an empty or missing header.
#[derive(Clone)]
pub struct Authenticator {
    expected: Option<Zeroizing<Vec<u8>>>,
}

impl Authenticator {
    pub fn new(config: &AuthConfig) -> Self {
        let expected = config
            .is_configured()
            .then(|| Zeroizing::new(config.api_key.as_bytes().to_vec()));
        Self { expected }
    }

    pub fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    /// Succeeds only on an exact match with the configured key.
    pub fn verify(&self, provided: Option<&str>) -> Result<()> {
        let (Some(expected), Some(provided)) = (self.expected.as_ref(), provided) else {
            return Err(TranslatorError::Unauthorized);
        };

        if bool::from(expected.as_slice().ct_eq(provided.as_bytes())) {
            Ok(())
        } else {
            Err(TranslatorError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(key: &str) -> Authenticator {
        Authenticator::new(&AuthConfig {
            api_key: key.to_string(),
        })
    }

    #[test]
    fn test_exact_match_passes() {
        assert!(auth("s3cret").verify(Some("s3cret")).is_ok());
    }

    #[test]
    fn test_mismatch_and_missing_fail() {
        let a = auth("s3cret");
        assert!(matches!(a.verify(Some("S3CRET")), Err(TranslatorError::Unauthorized)));
        assert!(matches!(a.verify(Some("s3cret ")), Err(TranslatorError::Unauthorized)));
        assert!(matches!(a.verify(Some("")), Err(TranslatorError::Unauthorized)));
        assert!(matches!(a.verify(None), Err(TranslatorError::Unauthorized)));
    }

    #[test]
    fn test_unset_key_rejects_everything() {
        let a = auth("");
        assert!(!a.is_configured());
        assert!(a.verify(Some("")).is_err());
        assert!(a.verify(None).is_err());
        assert!(a.verify(Some("anything")).is_err());
    }

    #[test]
    fn test_error_message_is_fixed() {
        let err = auth("k").verify(Some("nope")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid API Key");
    }
}
