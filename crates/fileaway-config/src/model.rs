//! Validated runtime configuration handed to the hook orchestrator.
//!
//! # Design
//! - Values are constructed once at process start and never mutated.
//! - Every constructor validates, so holders can rely on the invariants.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::defaults::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::error::{ConfigError, ConfigResult};
use crate::validate::{normalize_root, parse_api_url, validate_api_key, validate_category};

/// Fully validated hook configuration.
#[derive(Debug, Clone)]
pub struct HookConfig {
    /// Base URL of the file-management service.
    pub api_url: Url,
    /// Key sent in the `X-API-KEY` header.
    pub api_key: ApiKey,
    /// Upper bound for the whole request/response exchange.
    pub timeout: Duration,
    /// Upper bound for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// Category routing table.
    pub categories: CategoryMapping,
}

impl HookConfig {
    /// Build a configuration with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL or API key fails validation.
    pub fn new(api_url: &str, api_key: &str, categories: CategoryMapping) -> ConfigResult<Self> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            api_key: ApiKey::new(api_key)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            categories,
        })
    }

    /// Replace both timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }
}

/// API key credential; redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate and wrap a raw key.
    ///
    /// # Errors
    ///
    /// Returns an error when the key is blank or not visible ASCII.
    pub fn new(raw: &str) -> ConfigResult<Self> {
        validate_api_key(raw).map(Self)
    }

    /// Raw header value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ApiKey(<redacted>)")
    }
}

/// Source and target roots for a single category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    source_root: String,
    target_root: String,
}

impl PathPair {
    /// Root under which the download client leaves completed jobs.
    #[must_use]
    pub fn source_root(&self) -> &str {
        &self.source_root
    }

    /// Root the service should place the content under.
    #[must_use]
    pub fn target_root(&self) -> &str {
        &self.target_root
    }
}

/// One-to-one routing table from category name to [`PathPair`].
///
/// Lookups are case-sensitive and exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMapping {
    entries: BTreeMap<String, PathPair>,
}

impl CategoryMapping {
    /// Build a mapping from `(category, source_root, target_root)` triples.
    ///
    /// # Errors
    ///
    /// Returns an error for empty category names, non-absolute roots, or a
    /// category listed more than once.
    pub fn new<I, C, S, T>(entries: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (C, S, T)>,
        C: Into<String>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut mapping = Self::default();
        for (category, source, target) in entries {
            mapping.insert(category.into(), source.as_ref(), target.as_ref())?;
        }
        Ok(mapping)
    }

    pub(crate) fn insert(
        &mut self,
        category: String,
        source: &str,
        target: &str,
    ) -> ConfigResult<()> {
        validate_category(&category)?;
        let source_root = normalize_root(&format!("categories.{category}.source_root"), source)?;
        let target_root = normalize_root(&format!("categories.{category}.target_root"), target)?;
        if self.entries.contains_key(&category) {
            return Err(ConfigError::invalid(
                format!("categories.{category}"),
                None,
                "category is mapped more than once",
            ));
        }
        self.entries.insert(
            category,
            PathPair {
                source_root,
                target_root,
            },
        );
        Ok(())
    }

    /// Look up the roots configured for `category`.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&PathPair> {
        self.entries.get(category)
    }

    /// Number of mapped categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no categories are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate mapped categories in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathPair)> {
        self.entries.iter().map(|(name, pair)| (name.as_str(), pair))
    }
}
