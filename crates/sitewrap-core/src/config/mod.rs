//! Bundled app configuration.
//!
//! The wrapper ships a small JSON document next to the binary. It names the
//! website to load and a display name. Loading never fails outward: any read
//! or parse problem falls back to [`AppConfig::default`].

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::util::{is_web_url, normalize_text_option};

/// URL loaded when the bundled config does not provide one.
pub const DEFAULT_WEBSITE_URL: &str = "https://example.com";

/// Display name used when the bundled config does not provide one.
pub const DEFAULT_APP_NAME: &str = "Web App";

/// Resolved wrapper configuration, immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Website loaded into the surface at launch.
    pub website_url: String,
    /// Display name shown by the host window.
    pub app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            website_url: DEFAULT_WEBSITE_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Parses a bundled config document, falling back to defaults on any error.
    pub fn load_from_str(raw: &str) -> Self {
        match Self::try_parse(raw) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!("Failed to parse bundled app config: {}", error);
                Self::default()
            }
        }
    }

    /// Reads and parses a config file, falling back to defaults on any error.
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::load_from_str(&content),
            Err(error) => {
                tracing::warn!(
                    "Failed to read app config at {}: {}",
                    path.display(),
                    error
                );
                Self::default()
            }
        }
    }

    /// Parses a config document and surfaces the failure instead of hiding it.
    ///
    /// A non-empty `testLink` wins over `websiteLink`; when neither is usable
    /// the default URL stands. Unknown keys are ignored.
    pub fn try_parse(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(Error::InvalidInput(
                "app config root must be a JSON object".to_string(),
            ));
        }
        let document: BundledConfigDocument = serde_json::from_value(value)?;

        let website_url = normalize_text_option(document.test_link)
            .or_else(|| normalize_text_option(document.website_link))
            .unwrap_or_else(|| DEFAULT_WEBSITE_URL.to_string());
        let app_name = normalize_text_option(document.app_name)
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        // Kept as configured; the engine decides what a non-web URL does.
        if !is_web_url(&website_url) {
            tracing::warn!("Configured website URL is not http(s): {}", website_url);
        }

        Ok(Self {
            website_url,
            app_name,
        })
    }

    /// Token appended to the engine's user agent, e.g. `MyShop/0.1.0`.
    pub fn user_agent_suffix(&self) -> String {
        let name: String = self
            .app_name
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect();
        let name = if name.is_empty() {
            DEFAULT_APP_NAME.replace(' ', "")
        } else {
            name
        };
        format!("{name}/{}", env!("CARGO_PKG_VERSION"))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundledConfigDocument {
    #[serde(default)]
    test_link: Option<String>,
    #[serde(default)]
    website_link: Option<String>,
    #[serde(default)]
    app_name: Option<String>,
}
