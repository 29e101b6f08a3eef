//! Validation helpers and parsing utilities for configuration documents.

use std::time::Duration;

use url::Url;

use crate::error::{ConfigError, ConfigResult};

pub(crate) fn parse_api_url(value: &str) -> ConfigResult<Url> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed)
        .map_err(|_| ConfigError::invalid("api_url", Some(trimmed), "must be an absolute URL"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "api_url",
            Some(trimmed),
            "scheme must be http or https",
        ));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::invalid(
            "api_url",
            Some(trimmed),
            "must include a host",
        ));
    }

    Ok(url)
}

/// API keys travel as an HTTP header, so they must be visible ASCII.
pub(crate) fn validate_api_key(value: &str) -> ConfigResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::invalid("api_key", None, "must not be empty"));
    }
    if !trimmed.bytes().all(|byte| (0x20..0x7f).contains(&byte)) {
        return Err(ConfigError::invalid(
            "api_key",
            None,
            "must contain only visible ASCII characters",
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn parse_timeout_secs(field: &str, value: u64) -> ConfigResult<Duration> {
    if value == 0 {
        return Err(ConfigError::invalid(
            field,
            Some(&value.to_string()),
            "must be greater than zero",
        ));
    }
    Ok(Duration::from_secs(value))
}

pub(crate) fn parse_timeout_override(field: &str, value: &str) -> ConfigResult<Duration> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::invalid(field, Some(value), "must be an integer"))?;
    parse_timeout_secs(field, secs)
}

pub(crate) fn validate_category(name: &str) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::invalid(
            "categories",
            None,
            "category names must not be empty",
        ));
    }
    Ok(())
}

/// Checks that a mapped root is absolute and strips trailing separators so
/// joining with `/` never doubles them. The filesystem root normalises to an
/// empty prefix.
pub(crate) fn normalize_root(field: &str, value: &str) -> ConfigResult<String> {
    if value.is_empty() {
        return Err(ConfigError::invalid(field, None, "must not be empty"));
    }
    if !value.starts_with('/') {
        return Err(ConfigError::invalid(
            field,
            Some(value),
            "must be an absolute path",
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_api_url_accepts_http_hosts() {
        let url = parse_api_url(" http://192.168.8.23:8002 ").expect("valid url");
        assert_eq!(url.host_str(), Some("192.168.8.23"));
        assert_eq!(url.port(), Some(8002));
    }

    #[test]
    fn parse_api_url_rejects_other_schemes() {
        let err = parse_api_url("ftp://files.local").expect_err("ftp rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidField { reason: "scheme must be http or https", .. }
        ));
        assert!(parse_api_url("not a url").is_err());
        assert!(parse_api_url("mailto:ops@example.com").is_err());
    }

    #[test]
    fn validate_api_key_rejects_blank_and_control_characters() {
        assert!(validate_api_key("   ").is_err());
        assert!(validate_api_key("abc\ndef").is_err());
        assert!(validate_api_key("clé").is_err());
        assert_eq!(validate_api_key(" 123456 ").expect("valid key"), "123456");
    }

    #[test]
    fn timeouts_must_be_positive() {
        assert!(parse_timeout_secs("timeout_secs", 0).is_err());
        assert_eq!(
            parse_timeout_secs("timeout_secs", 3).expect("valid"),
            Duration::from_secs(3)
        );
        assert!(parse_timeout_override("FILEAWAY_HTTP_TIMEOUT_SECS", "ten").is_err());
        assert_eq!(
            parse_timeout_override("FILEAWAY_HTTP_TIMEOUT_SECS", " 30 ").expect("valid"),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn normalize_root_strips_trailing_separators() {
        assert_eq!(normalize_root("root", "/share/iso/").expect("valid"), "/share/iso");
        assert_eq!(normalize_root("root", "/share/iso").expect("valid"), "/share/iso");
        assert_eq!(normalize_root("root", "/").expect("valid"), "");
        assert!(normalize_root("root", "share/iso").is_err());
        assert!(normalize_root("root", "").is_err());
    }

    #[test]
    fn validate_category_rejects_empty_names() {
        assert!(validate_category("").is_err());
        assert!(validate_category("Unprocessed Isos").is_ok());
    }
}
