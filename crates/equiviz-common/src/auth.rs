//! HTTP Basic credential encoding
//!
//! The backend has no login endpoint; every request carries
//! `Authorization: Basic <base64(username:password)>`. The encoded string is
//! treated as opaque once produced.

use crate::error::{CommonError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

/// Base64-encoded `username:password` pair
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials(String);

impl BasicCredentials {
    /// Encode a username/password pair
    pub fn encode(username: &str, password: &str) -> Self {
        Self(STANDARD.encode(format!("{}:{}", username, password)))
    }

    /// Wrap an already-encoded value without validating it
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Basic {}", self.0)
    }

    /// Recover the username half of the pair.
    ///
    /// Only used for diagnostics; the password is never returned.
    pub fn username(&self) -> Result<String> {
        let bytes = STANDARD
            .decode(&self.0)
            .map_err(|e| CommonError::MalformedCredentials(e.to_string()))?;
        let decoded = String::from_utf8(bytes)
            .map_err(|e| CommonError::MalformedCredentials(e.to_string()))?;

        decoded
            .split_once(':')
            .map(|(user, _)| user.to_string())
            .ok_or_else(|| CommonError::MalformedCredentials("missing ':' separator".to_string()))
    }
}

// Never print the secret, even in debug output
impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BasicCredentials(****)")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_known_value() {
        let credentials = BasicCredentials::encode("admin", "admin123");
        assert_eq!(credentials.as_str(), "YWRtaW46YWRtaW4xMjM=");
        assert_eq!(credentials.header_value(), "Basic YWRtaW46YWRtaW4xMjM=");
    }

    #[test]
    fn test_debug_hides_secret() {
        let credentials = BasicCredentials::encode("admin", "admin123");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("YWRt"));
    }

    #[test]
    fn test_username_of_garbage_is_error() {
        let credentials = BasicCredentials::from_encoded("not base64!");
        assert!(credentials.username().is_err());
    }

    proptest! {
        #[test]
        fn username_survives_encoding(user in "[a-zA-Z0-9_.@-]{1,24}", pass in "\\PC{0,32}") {
            let credentials = BasicCredentials::encode(&user, &pass);
            prop_assert_eq!(credentials.username().unwrap(), user);
        }
    }
}
