//! HTTP transport for GraphQL

use std::time::Duration;

use async_trait::async_trait;
use bon::bon;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::{GraphQLError, GraphQLTransport, Response};

/// Sends GraphQL-over-HTTP POST requests to a single endpoint
///
/// A missing endpoint or token does not prevent construction. Requests fail instead, which
/// keeps a misconfigured server running and able to report the problem to the agent.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    endpoint: Option<Url>,
    headers: HeaderMap,
}

#[bon]
impl HttpClient {
    #[builder]
    pub fn new(
        endpoint: Option<Url>,
        token: Option<SecretString>,
        #[builder(default)] headers: HeaderMap,
        timeout: Option<Duration>,
    ) -> Result<Self, GraphQLError> {
        let mut headers = headers;
        match token.as_ref().map(|token| token.expose_secret().trim()) {
            Some(token) if !token.is_empty() => {
                match HeaderValue::from_str(&format!("Bearer {token}")) {
                    Ok(mut value) => {
                        value.set_sensitive(true);
                        headers.insert(AUTHORIZATION, value);
                    }
                    Err(_) => warn!("API token is not a valid header value - sending no credentials"),
                }
            }
            _ => warn!("No API token configured - requests will be sent without credentials"),
        }

        if endpoint.is_none() {
            warn!("No GraphQL endpoint configured - every request will fail");
        }

        let mut client = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            client = client.timeout(timeout);
        }

        Ok(Self {
            client: client.build().map_err(GraphQLError::Request)?,
            endpoint,
            headers,
        })
    }
}

impl HttpClient {
    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }
}

#[async_trait]
impl GraphQLTransport for HttpClient {
    async fn execute(&self, document: &str, variables: Value) -> Result<Response, GraphQLError> {
        let endpoint = self.endpoint.as_ref().ok_or(GraphQLError::NoEndpoint)?;

        let response = self
            .client
            .post(endpoint.clone())
            .headers(self.headers.clone())
            .json(&json!({
                "query": document,
                "variables": variables,
            }))
            .send()
            .await
            .map_err(GraphQLError::Request)?;

        let status = response.status();
        let body = response.bytes().await.map_err(GraphQLError::Request)?;
        debug!(%status, bytes = body.len(), "GraphQL response received");

        let parsed = serde_json::from_slice::<Response>(&body);
        if status.is_success() {
            return parsed.map_err(GraphQLError::Decode);
        }

        // Some servers pair an error status with a regular GraphQL body
        match parsed {
            Ok(response) if response.data.is_some() || response.errors.is_some() => Ok(response),
            _ => Err(GraphQLError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }
}
