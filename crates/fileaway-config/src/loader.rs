//! JSON-backed configuration loader with environment overrides.
//!
//! # Design
//! - The document is read once at start-up; nothing is re-read mid-run.
//! - Environment access goes through a caller-supplied lookup so tests never
//!   mutate process state.
//! - Categories accept either `{"source_root": .., "target_root": ..}` or the
//!   single-entry `{"<source root>": "<target root>"}` shorthand.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::defaults::{
    API_KEY_ENV, API_URL_ENV, CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_TIMEOUT_SECS, TIMEOUT_ENV,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{CategoryMapping, HookConfig};
use crate::validate::{parse_timeout_override, parse_timeout_secs};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    api_url: String,
    api_key: String,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    connect_timeout_secs: Option<u64>,
    #[serde(default)]
    categories: CategoryEntries,
}

/// Category entries in document order; duplicates are kept so they can be
/// rejected instead of silently overwritten.
#[derive(Debug, Default)]
struct CategoryEntries(Vec<(String, PathPairDocument)>);

impl<'de> Deserialize<'de> for CategoryEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = CategoryEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of category names to source/target roots")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, PathPairDocument>()? {
                    entries.push(entry);
                }
                Ok(CategoryEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExplicitPair {
    source_root: String,
    target_root: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PathPairDocument {
    Explicit(ExplicitPair),
    Shorthand(BTreeMap<String, String>),
}

impl PathPairDocument {
    fn into_roots(self, category: &str) -> ConfigResult<(String, String)> {
        match self {
            Self::Explicit(pair) => Ok((pair.source_root, pair.target_root)),
            Self::Shorthand(map) => {
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some(pair), None) => Ok(pair),
                    _ => Err(ConfigError::invalid(
                        format!("categories.{category}"),
                        None,
                        "must map exactly one source root to one target root",
                    )),
                }
            }
        }
    }
}

/// Load configuration, locating the file through `FILEAWAY_CONFIG` or next to
/// the running executable.
///
/// # Errors
///
/// Returns an error when the file cannot be located, read, parsed, or
/// validated.
pub fn load(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<HookConfig> {
    let path = default_config_path(&lookup)?;
    load_from_path(&path, lookup)
}

/// Resolve the configuration file path.
///
/// # Errors
///
/// Returns an error when no explicit path is set and the executable location
/// cannot be determined.
pub fn default_config_path(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<PathBuf> {
    if let Some(explicit) = lookup(CONFIG_PATH_ENV).filter(|value| !value.trim().is_empty()) {
        return Ok(PathBuf::from(explicit));
    }

    let executable =
        std::env::current_exe().map_err(|source| ConfigError::PathUnavailable { source })?;
    let directory = executable
        .parent()
        .ok_or_else(|| ConfigError::PathUnavailable {
            source: io::Error::other("executable has no parent directory"),
        })?;
    Ok(directory.join(DEFAULT_CONFIG_FILE))
}

/// Read and validate the document at `path`, then apply environment overrides.
///
/// # Errors
///
/// Returns an error when the file cannot be read, parsed, or validated.
pub fn load_from_path(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> ConfigResult<HookConfig> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = decode(&text, Some(path))?;
    let config = build(document, &lookup)?;
    info!(
        path = %path.display(),
        categories = config.categories.len(),
        api_url = %config.api_url,
        "configuration loaded"
    );
    Ok(config)
}

/// Parse an in-memory JSON document and apply environment overrides.
///
/// # Errors
///
/// Returns an error when the document cannot be parsed or validated.
pub fn parse_document(
    text: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> ConfigResult<HookConfig> {
    let document = decode(text, None)?;
    build(document, &lookup)
}

fn decode(text: &str, path: Option<&Path>) -> ConfigResult<ConfigDocument> {
    serde_json::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.map(Path::to_path_buf),
        source,
    })
}

fn build(
    document: ConfigDocument,
    lookup: &impl Fn(&str) -> Option<String>,
) -> ConfigResult<HookConfig> {
    let api_url = override_value(lookup, API_URL_ENV).unwrap_or(document.api_url);
    let api_key = override_value(lookup, API_KEY_ENV).unwrap_or(document.api_key);

    let timeout = match override_value(lookup, TIMEOUT_ENV) {
        Some(raw) => parse_timeout_override(TIMEOUT_ENV, &raw)?,
        None => parse_timeout_secs(
            "timeout_secs",
            document.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        )?,
    };
    let connect_timeout = parse_timeout_secs(
        "connect_timeout_secs",
        document
            .connect_timeout_secs
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
    )?;

    let mut categories = CategoryMapping::default();
    for (category, pair) in document.categories.0 {
        let (source, target) = pair.into_roots(&category)?;
        categories.insert(category, &source, &target)?;
    }

    Ok(HookConfig::new(&api_url, &api_key, categories)?.with_timeouts(timeout, connect_timeout))
}

fn override_value(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    let value = lookup(name).filter(|value| !value.trim().is_empty())?;
    debug!(variable = name, "applying environment override");
    Some(value)
}
