use std::time::Duration;

use bloom_mcp_server::server::{RootTypes, Transport};
use reqwest::header::HeaderMap;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use super::logging::Logging;

/// Configuration for the MCP server
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The Bloom GraphQL endpoint
    ///
    /// Kept as text so that a bad value is reported in the log instead of preventing startup.
    pub endpoint: Option<String>,

    /// The API token sent as a bearer credential
    pub token: Option<SecretString>,

    /// Extra headers to include in all GraphQL requests
    #[serde(deserialize_with = "parsers::header_map")]
    pub headers: HeaderMap,

    /// Overall timeout for each GraphQL request
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,

    /// Root operation type names of the remote schema
    pub root_types: RootTypes,

    /// The type of server transport to use
    pub transport: Transport,

    /// Logging configuration
    pub logging: Logging,
}

impl Config {
    /// The endpoint as a URL, if one is configured and valid
    pub fn endpoint_url(&self) -> Option<Url> {
        let endpoint = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())?;

        Url::parse(endpoint)
            .inspect_err(|error| warn!(%error, endpoint, "Ignoring invalid GraphQL endpoint"))
            .ok()
    }
}

mod parsers {
    use std::collections::BTreeMap;

    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use serde::{Deserialize, Deserializer};

    pub(super) fn header_map<'de, D>(deserializer: D) -> Result<HeaderMap, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut headers = HeaderMap::with_capacity(raw.len());
        for (name, value) in raw {
            let name = HeaderName::try_from(name.as_str()).map_err(serde::de::Error::custom)?;
            let value = HeaderValue::try_from(value.as_str()).map_err(serde::de::Error::custom)?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}
