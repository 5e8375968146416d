//! Runtime settings read from the environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::IndexingError;
use talks_indexer_repository::opensearch::{DEFAULT_PRIVATE_INDEX, DEFAULT_PUBLIC_INDEX};
use talks_indexer_repository::OpenSearchConfig;
use talks_indexer_source::MoresleepConfig;

/// Default moresleep API URL.
const DEFAULT_MORESLEEP_URL: &str = "http://localhost:8082";

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Application running mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// JSON logs at info level.
    #[default]
    Production,
    /// Human-readable logs at debug level.
    Development,
}

impl Mode {
    pub fn is_development(&self) -> bool {
        matches!(self, Mode::Development)
    }

    /// Log level used when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Mode::Production => "info",
            Mode::Development => "debug",
        }
    }
}

impl FromStr for Mode {
    type Err = IndexingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Mode::Production),
            "development" => Ok(Mode::Development),
            other => Err(IndexingError::config(format!(
                "invalid MODE '{}', expected 'production' or 'development'",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Production => f.write_str("production"),
            Mode::Development => f.write_str("development"),
        }
    }
}

/// Everything the binary needs to build its dependencies.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: Mode,
    pub moresleep: MoresleepConfig,
    pub opensearch: OpenSearchConfig,
    pub private_index: String,
    pub public_index: String,
}

impl Settings {
    /// Read settings from the process environment, after loading `.env` if
    /// present.
    ///
    /// # Environment Variables
    ///
    /// - `MODE`: `production` or `development` (default: production)
    /// - `MORESLEEP_URL`: moresleep API URL (default: http://localhost:8082)
    /// - `MORESLEEP_USER`, `MORESLEEP_PASSWORD`: moresleep basic auth
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USER`, `OPENSEARCH_PASSWORD`: OpenSearch basic auth
    /// - `ELASTICSEARCH_URL`, `ELASTICSEARCH_USER`, `ELASTICSEARCH_PASSWORD`:
    ///   accepted when the matching `OPENSEARCH_*` variable is unset
    /// - `PRIVATE_INDEX`: private index name (default: javazone_private)
    /// - `PUBLIC_INDEX`: public index name (default: javazone_public)
    ///
    /// Credentials are only used when both user and password are set.
    pub fn from_env() -> Result<Self, IndexingError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let mode = match var("MODE") {
            Some(mode) => mode.parse::<Mode>()?,
            None => Mode::default(),
        };

        let moresleep = MoresleepConfig::new(var_or("MORESLEEP_URL", DEFAULT_MORESLEEP_URL))
            .with_credentials(
                var("MORESLEEP_USER").unwrap_or_default(),
                var("MORESLEEP_PASSWORD").unwrap_or_default(),
            );

        // OPENSEARCH_* wins over the older ELASTICSEARCH_* names.
        let search_var = |suffix: &str| {
            var(&format!("OPENSEARCH_{}", suffix)).or_else(|| var(&format!("ELASTICSEARCH_{}", suffix)))
        };
        let opensearch = OpenSearchConfig::new(
            search_var("URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
        )
        .with_credentials(
            search_var("USER").unwrap_or_default(),
            search_var("PASSWORD").unwrap_or_default(),
        );

        let private_index = var_or("PRIVATE_INDEX", DEFAULT_PRIVATE_INDEX);
        let public_index = var_or("PUBLIC_INDEX", DEFAULT_PUBLIC_INDEX);

        if private_index == public_index {
            return Err(IndexingError::config(format!(
                "PRIVATE_INDEX and PUBLIC_INDEX must differ, both are '{}'",
                private_index
            )));
        }

        Ok(Self {
            mode,
            moresleep,
            opensearch,
            private_index,
            public_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, IndexingError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.mode, Mode::Production);
        assert_eq!(settings.moresleep.url, "http://localhost:8082");
        assert!(!settings.moresleep.has_credentials());
        assert_eq!(settings.opensearch.url, "http://localhost:9200");
        assert!(settings.opensearch.credentials().is_none());
        assert_eq!(settings.private_index, "javazone_private");
        assert_eq!(settings.public_index, "javazone_public");
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("MODE", "development"),
            ("MORESLEEP_URL", "https://sleepingpill.javazone.no"),
            ("MORESLEEP_USER", "admin"),
            ("MORESLEEP_PASSWORD", "secret"),
            ("OPENSEARCH_URL", "https://search.internal:9200"),
            ("OPENSEARCH_USER", "indexer"),
            ("OPENSEARCH_PASSWORD", "hunter2"),
            ("PRIVATE_INDEX", "talks_admin"),
            ("PUBLIC_INDEX", "talks"),
        ])
        .unwrap();

        assert!(settings.mode.is_development());
        assert_eq!(settings.moresleep.url, "https://sleepingpill.javazone.no");
        assert!(settings.moresleep.has_credentials());
        assert_eq!(settings.opensearch.credentials(), Some(("indexer", "hunter2")));
        assert_eq!(settings.private_index, "talks_admin");
        assert_eq!(settings.public_index, "talks");
    }

    #[test]
    fn test_elasticsearch_variables_as_fallback() {
        let fallback = settings(&[
            ("ELASTICSEARCH_URL", "http://elastic:9200"),
            ("ELASTICSEARCH_USER", "elastic"),
            ("ELASTICSEARCH_PASSWORD", "changeme"),
        ])
        .unwrap();

        assert_eq!(fallback.opensearch.url, "http://elastic:9200");
        assert_eq!(fallback.opensearch.credentials(), Some(("elastic", "changeme")));

        let both = settings(&[
            ("OPENSEARCH_URL", "http://opensearch:9200"),
            ("ELASTICSEARCH_URL", "http://elastic:9200"),
        ])
        .unwrap();

        assert_eq!(both.opensearch.url, "http://opensearch:9200");
    }

    #[test]
    fn test_partial_credentials_are_ignored() {
        let settings = settings(&[("OPENSEARCH_USER", "indexer"), ("MORESLEEP_PASSWORD", "x")]).unwrap();

        assert!(settings.opensearch.credentials().is_none());
        assert!(!settings.moresleep.has_credentials());
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let settings = settings(&[("PRIVATE_INDEX", ""), ("MODE", " ")]).unwrap();
        assert_eq!(settings.private_index, "javazone_private");
        assert_eq!(settings.mode, Mode::Production);
    }

    #[test]
    fn test_invalid_mode() {
        let err = settings(&[("MODE", "staging")]).unwrap_err();
        assert!(matches!(err, IndexingError::ConfigError(_)));
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn test_index_names_must_differ() {
        let err = settings(&[("PRIVATE_INDEX", "talks"), ("PUBLIC_INDEX", "talks")]).unwrap_err();
        assert!(matches!(err, IndexingError::ConfigError(_)));
    }

    #[test]
    fn test_mode_log_levels() {
        assert_eq!(Mode::Production.default_log_level(), "info");
        assert_eq!(Mode::Development.default_log_level(), "debug");
        assert_eq!(Mode::Development.to_string(), "development");
    }
}
