use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::http::DEFAULT_TIMEOUT_SECS;
use crate::sitemap::{ANGULAR_SITEMAP_URL, DEFAULT_DOC_MARKERS};

const ENV_PREFIX: &str = "DOCSCRAPE";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub sitemap_url: String,
    pub timeout_secs: u64,
    pub doc_path_markers: Vec<String>,
}

impl Settings {
    /// Defaults, overridden by `DOCSCRAPE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("sitemap_url", ANGULAR_SITEMAP_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("doc_path_markers", DEFAULT_DOC_MARKERS.to_vec())?
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("doc_path_markers"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
