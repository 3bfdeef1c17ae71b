//! Backend profile configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Connection details for one Ambar backend.
///
/// The session token is stored separately in the OS keychain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Unique, whitespace-free profile name.
    pub name: String,

    /// Base URL of the web API (e.g. "https://ambar.company.com").
    pub url: String,

    /// Login email. Empty for anonymous community-edition backends.
    #[serde(default)]
    pub email: String,
}

impl Profile {
    /// Create a new profile.
    pub fn new(name: String, url: String, email: String) -> Self {
        Self { name, url, email }
    }

    /// Validate this profile.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL must start with http:// or https://",
                self.name
            )));
        }

        if !self.email.is_empty() && !self.email.contains('@') {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': '{}' does not appear to be a valid email address",
                self.name, self.email
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, url: &str, email: &str) -> Profile {
        Profile::new(name.to_string(), url.to_string(), email.to_string())
    }

    #[test]
    fn test_valid_profile() {
        assert!(profile("work", "https://ambar.company.com", "me@company.com")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_anonymous_profile_accepted() {
        assert!(profile("local", "http://localhost:8080", "").validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = profile("", "https://x", "").validate().unwrap_err();
        assert!(err.to_string().contains("name cannot be empty"));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let err = profile("my work", "https://x", "").validate().unwrap_err();
        assert!(err.to_string().contains("cannot contain whitespace"));
    }

    #[test]
    fn test_invalid_url_scheme_rejected() {
        let err = profile("work", "ambar.local", "").validate().unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let err = profile("work", "https://x", "not-an-email")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("valid email"));
    }

    #[test]
    fn test_missing_email_defaults_to_empty() {
        let parsed: Profile = toml::from_str("name = \"a\"\nurl = \"http://localhost\"").unwrap();
        assert!(parsed.email.is_empty());
    }
}
