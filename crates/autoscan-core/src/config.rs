use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::rewrite::RewriteRule;

pub const DEFAULT_PRODUCT: &str = "autoscan";
pub const DEFAULT_CLIENT_IDENTIFIER: &str = "autoscan";

/// Settings for a single media-server target, as written in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct TargetConfig {
    pub url: String,
    pub token: String,
    pub rewrite: Vec<RewriteRule>,
    pub verbosity: String,
    pub timeout: String,
    pub product: String,
    pub client_identifier: String,
}

impl TargetConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.url.trim().is_empty() {
            return Err(ConfigValidationError::MissingUrl);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Result<Option<Duration>, ConfigValidationError> {
        parse_timeout(&self.timeout)
    }

    pub fn product(&self) -> String {
        if self.product.trim().is_empty() {
            DEFAULT_PRODUCT.to_owned()
        } else {
            self.product.clone()
        }
    }

    pub fn client_identifier(&self) -> String {
        if self.client_identifier.trim().is_empty() {
            default_client_identifier(&self.url)
        } else {
            self.client_identifier.clone()
        }
    }
}

/// Parses a request timeout. A blank value means requests never time out.
pub fn parse_timeout(raw: &str) -> Result<Option<Duration>, ConfigValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let timeout = humantime::parse_duration(raw.trim()).map_err(|err| {
        ConfigValidationError::InvalidTimeout {
            raw: raw.to_owned(),
            reason: err.to_string(),
        }
    })?;

    if timeout.is_zero() {
        return Err(ConfigValidationError::InvalidTimeout {
            raw: raw.to_owned(),
            reason: "must be greater than zero".into(),
        });
    }

    Ok(Some(timeout))
}

/// Derives a client identifier from the host of `raw_url`, e.g.
/// `https://www.example.com:32400` becomes `autoscan-example.com:32400`.
pub fn default_client_identifier(raw_url: &str) -> String {
    let Ok(parsed) = url::Url::parse(raw_url) else {
        return DEFAULT_CLIENT_IDENTIFIER.to_owned();
    };

    let host = match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_owned(),
        (None, _) => return DEFAULT_CLIENT_IDENTIFIER.to_owned(),
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() || host.starts_with(':') {
        return DEFAULT_CLIENT_IDENTIFIER.to_owned();
    }

    format!("{DEFAULT_CLIENT_IDENTIFIER}-{host}")
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("target url must be provided")]
    MissingUrl,
    #[error("invalid target url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid timeout {raw:?}: {reason}")]
    InvalidTimeout { raw: String, reason: String },
    #[error("invalid rewrite pattern {pattern:?}: {reason}")]
    InvalidRewrite { pattern: String, reason: String },
}
