//! Credentials for the Ambar web API.
//!
//! Ambar authenticates with two custom headers carrying the user's email and
//! a session token. The token is kept in the OS keyring, never in the config
//! file. A profile without a stored token talks to the backend anonymously.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use tracing::warn;

use super::error::{ApiError, Result};

/// The keyring service name for LazyAmbar tokens.
const KEYRING_SERVICE: &str = "lazyambar";

/// Header carrying the user's email.
const EMAIL_HEADER: &str = "ambar-email";

/// Header carrying the user's session token.
const TOKEN_HEADER: &str = "ambar-email-token";

/// Credentials attached to every request.
#[derive(Debug, Clone, Default)]
pub struct Auth {
    email: Option<String>,
    token: Option<String>,
}

impl Auth {
    /// Credentials from an explicit email and token.
    pub fn new(email: &str, token: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            token: Some(token.to_string()),
        }
    }

    /// No credentials at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Look up the token for `profile_name` in the keyring.
    ///
    /// Falls back to anonymous access when no token is stored, since a
    /// community-edition backend does not require one.
    pub fn from_keyring(profile_name: &str, email: &str) -> Self {
        match get_token(profile_name) {
            Ok(token) => Self::new(email, &token),
            Err(e) => {
                warn!(profile = %profile_name, error = %e, "No token available, using anonymous access");
                Self::anonymous()
            }
        }
    }

    /// Whether a token will be sent.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The default headers shared by every request.
    pub fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let (Some(email), Some(token)) = (&self.email, &self.token) {
            if let (Ok(email), Ok(token)) = (HeaderValue::from_str(email), HeaderValue::from_str(token)) {
                headers.insert(HeaderName::from_static(EMAIL_HEADER), email);
                headers.insert(HeaderName::from_static(TOKEN_HEADER), token);
            } else {
                warn!("Credentials contain characters not allowed in headers, sending none");
            }
        }

        headers
    }
}

/// Store a token in the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be stored in the keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token)
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))
}

/// Retrieve a token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be retrieved from the keyring.
pub fn get_token(profile_name: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_headers_only_accept() {
        let headers = Auth::anonymous().default_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_authenticated_headers() {
        let auth = Auth::new("user@example.com", "secret");
        assert!(auth.is_authenticated());

        let headers = auth.default_headers();
        assert_eq!(headers.get(EMAIL_HEADER).unwrap(), "user@example.com");
        assert_eq!(headers.get(TOKEN_HEADER).unwrap(), "secret");
    }

    #[test]
    fn test_invalid_header_value_is_dropped() {
        let auth = Auth::new("user@example.com", "bad\ntoken");
        let headers = auth.default_headers();
        assert!(headers.get(TOKEN_HEADER).is_none());
        assert!(headers.get(EMAIL_HEADER).is_none());
    }
}
