//! Build-time runtime configuration.
//!
//! The JSON in `config/default.json` is embedded at compile time and parsed on
//! startup. Keys are camelCase so the same file can be shared with the HTML
//! shell and tooling outside the crate.

use hashbrown::HashMap;
use serde::Deserialize;

use crate::error::NavError;

const DEFAULT_CONFIG_JSON: &str = include_str!("../../config/default.json");

fn default_public_path() -> String {
    "/assets/".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// URL prefix static assets are served from.
    #[serde(default = "default_public_path")]
    pub public_path: String,
    /// Per-view feature flags, keyed by [`crate::route::ViewKind::feature`].
    #[serde(default)]
    pub experimental_features: HashMap<String, bool>,
    #[serde(default)]
    pub third_party_api_key: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            public_path: default_public_path(),
            experimental_features: HashMap::new(),
            third_party_api_key: None,
        }
    }
}

impl RuntimeConfig {
    pub fn from_json(raw: &str) -> Result<Self, NavError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// A missing flag counts as enabled; only an explicit `false` disables.
    pub fn feature_enabled(&self, name: &str) -> bool {
        self.experimental_features.get(name).copied().unwrap_or(true)
    }
}

/// Constants baked in by the build: package version, debug flag and config.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub debug: bool,
    pub config: RuntimeConfig,
}

impl BuildInfo {
    pub fn current() -> Result<Self, NavError> {
        Ok(Self {
            version: env!("CARGO_PKG_VERSION"),
            debug: cfg!(debug_assertions),
            config: RuntimeConfig::from_json(DEFAULT_CONFIG_JSON)?,
        })
    }
}
