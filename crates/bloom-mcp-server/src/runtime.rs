//! Runtime utilities
//!
//! This module is only used by the main binary and provides helper code
//! related to runtime configuration.

mod config;
mod logging;

use std::path::Path;

pub use config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Prefix for environment variables that can set any config field
const ENV_PREFIX: &str = "BLOOM_MCP_";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(bloom_common_env())
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .extract()
}

/// Read in a config from a YAML file, with environment variables taking precedence
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(bloom_common_env())
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(Yaml::file(yaml_path))
        .extract()
}

/// Figment provider for the `BLOOM_API_URL` and `BLOOM_API_TOKEN` variables shared with other
/// Bloom tooling
fn bloom_common_env() -> Env {
    Env::prefixed("BLOOM_API_")
        .only(&["url", "token"])
        .map(|key| match key.as_str().to_lowercase().as_str() {
            "url" => "endpoint".into(),
            other => other.to_string().into(),
        })
}
