//! Configuration types for the moresleep client.

use std::time::Duration;

/// Connection settings for [`MoresleepClient`](crate::MoresleepClient).
#[derive(Debug, Clone)]
pub struct MoresleepConfig {
    /// Base URL of the moresleep API (e.g. "http://localhost:8082").
    pub url: String,
    /// Basic auth user name.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for MoresleepConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8082".to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl MoresleepConfig {
    /// Create a config for an unauthenticated API.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set basic auth credentials. Empty values are ignored.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let password = password.into();
        if !username.is_empty() && !password.is_empty() {
            self.username = Some(username);
            self.password = Some(password);
        }
        self
    }

    /// Returns true if both user and password are configured.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}
