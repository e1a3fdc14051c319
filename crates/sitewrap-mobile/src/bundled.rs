//! App config bundled into the binary at build time.
#![cfg_attr(not(feature = "native"), allow(dead_code))]

use sitewrap_core::AppConfig;

/// Raw JSON copied from `assets/appConfig.json` by the build script.
pub const BUNDLED_CONFIG: &str = include_str!(concat!(env!("OUT_DIR"), "/app-config.json"));

/// Resolves the bundled config. Falls back to defaults if it does not parse.
pub fn load_bundled_config() -> AppConfig {
    let config = AppConfig::load_from_str(BUNDLED_CONFIG);
    tracing::info!(
        "Resolved app config: {} ({})",
        config.app_name,
        config.website_url
    );
    config
}
