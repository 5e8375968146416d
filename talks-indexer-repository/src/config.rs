//! Configuration types for the OpenSearch client.

/// Connection settings for [`OpenSearchClient`](crate::OpenSearchClient).
#[derive(Debug, Clone)]
pub struct OpenSearchConfig {
    /// The OpenSearch node URL (e.g. "http://localhost:9200").
    pub url: String,
    /// Basic auth user name.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            username: None,
            password: None,
        }
    }
}

impl OpenSearchConfig {
    /// Create a config for an unauthenticated node.
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

    /// Returns the credentials if both user and password are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(password)) => Some((user.as_str(), password.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_values() {
        let config = OpenSearchConfig::new("http://search:9200").with_credentials("admin", "");
        assert!(config.credentials().is_none());

        let config = config.with_credentials("admin", "secret");
        assert_eq!(config.credentials(), Some(("admin", "secret")));
        assert_eq!(config.url, "http://search:9200");
    }
}
