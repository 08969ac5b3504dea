//! Confluent Cloud Authentication
//!
//! Cloud API keys are sent as HTTP Basic credentials (key as user name,
//! secret as password).

use std::fmt;

/// Environment variable holding the Cloud API key
pub const API_KEY_ENV: &str = "CONFLUENT_CLOUD_API_KEY";

/// Environment variable holding the Cloud API secret
pub const API_SECRET_ENV: &str = "CONFLUENT_CLOUD_API_SECRET";

/// Cloud API key pair
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
    api_secret: Option<String>,
}

impl Credentials {
    /// Create credentials, treating empty strings as absent
    pub fn new(api_key: Option<String>, api_secret: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            api_secret: api_secret.filter(|s| !s.is_empty()),
        }
    }

    /// Both halves of the key pair are present
    pub fn is_complete(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }

    /// User name and password for HTTP Basic auth, if the pair is complete
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some((key.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

// Security: never print the secret
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .finish()
    }
}
