//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate to keep classifier API tokens out of logs.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when building the outgoing request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Where to reach a hosted text classifier, and how to authenticate.
#[derive(Clone)]
pub struct ClassifierCredentials {
    /// Inference endpoint accepting `{"inputs": "..."}`
    pub endpoint: String,

    /// Bearer token, if the endpoint requires one
    pub api_key: Option<SecretString>,
}

impl ClassifierCredentials {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key));
        self
    }

    /// Read `CREDIBILITY_CLASSIFIER_URL` and `CREDIBILITY_CLASSIFIER_API_KEY`.
    ///
    /// Returns `None` when no endpoint is configured.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("CREDIBILITY_CLASSIFIER_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())?;
        let credentials = Self::new(endpoint);

        Some(match std::env::var("CREDIBILITY_CLASSIFIER_API_KEY") {
            Ok(key) if !key.is_empty() => credentials.with_api_key(key),
            _ => credentials,
        })
    }
}

impl fmt::Debug for ClassifierCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierCredentials")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
