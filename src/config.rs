//! Site configuration.
//!
//! Two layers, deliberately kept apart:
//!
//! - `site.toml` holds the non-secret deployment shape: the base path the
//!   static site is published under and the directory layout. The file is
//!   optional — a missing file means stock defaults.
//! - Environment variables hold per-invocation overrides and secrets:
//!   `FORM_ENDPOINT` and `BUILD_VERSION` for the prerenderer, `PORT` and the
//!   `SMTP_*` family for the live server.
//!
//! ```toml
//! # site.toml — all keys optional, defaults shown
//! base_path = "/artemisia-pharma-website"  # URL prefix on the static host
//! data_dir = "data"                        # product workbooks
//! public_dir = "public"                    # static assets copied verbatim
//! output_dir = "dist"                      # prerender output
//! publish_dir = "docs"                     # deployable mirror of output
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Deployment shape loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// URL path prefix the static site is published under (project-pages
    /// style hosting). Must start with `/` and carry no trailing slash.
    pub base_path: String,
    /// Directory holding one product workbook per category.
    pub data_dir: String,
    /// Static assets directory, copied into the output root as-is.
    pub public_dir: String,
    /// Prerender output directory. Removed and recreated on every build.
    pub output_dir: String,
    /// Publish directory: a mirror of the output plus hosting markers.
    pub publish_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: "/artemisia-pharma-website".to_string(),
            data_dir: "data".to_string(),
            public_dir: "public".to_string(),
            output_dir: "dist".to_string(),
            publish_dir: "docs".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load from a `site.toml` path, falling back to defaults when the file
    /// does not exist. Parse and validation errors are real errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "base_path must start with '/'".into(),
            ));
        }
        if self.base_path.len() > 1 && self.base_path.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_path must not end with '/'".into(),
            ));
        }
        for (name, value) in [
            ("data_dir", &self.data_dir),
            ("public_dir", &self.public_dir),
            ("output_dir", &self.output_dir),
            ("publish_dir", &self.publish_dir),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Cache-busting token for rewritten asset URLs.
///
/// `BUILD_VERSION` override first, else the current Unix time in milliseconds
/// — every uncontrolled build gets a fresh token.
pub fn build_version() -> String {
    if let Ok(version) = std::env::var("BUILD_VERSION")
        && !version.is_empty()
    {
        return version;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

/// External form-submission endpoint, when one is configured.
pub fn form_endpoint() -> Option<String> {
    std::env::var("FORM_ENDPOINT").ok().filter(|v| !v.is_empty())
}

/// SMTP relay settings for the live server, read from the environment.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// `true` → implicit TLS (wrapper); `false` → STARTTLS.
    pub secure: bool,
    pub user: String,
    pub pass: String,
    /// Sender address; falls back to `user` when `SMTP_FROM` is unset.
    pub from: String,
    /// Destination for contact-form submissions.
    pub company_email: String,
}

impl SmtpConfig {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        let user = var("SMTP_USER");
        let from = {
            let from = var("SMTP_FROM");
            if from.is_empty() { user.clone() } else { from }
        };
        Self {
            host: var("SMTP_HOST"),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            secure: var("SMTP_SECURE") == "true",
            user,
            pass: var("SMTP_PASS"),
            from,
            company_email: var("COMPANY_EMAIL"),
        }
    }
}
