//! The transport seam between operation logic and the remote endpoint

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::GraphQLError;

/// Able to send GraphQL documents to a remote endpoint
///
/// One transport is created at startup and shared by every request, so implementations must
/// be safe to use concurrently.
#[async_trait]
pub trait GraphQLTransport: Send + Sync {
    /// Send a document with its variables and return the raw GraphQL response
    ///
    /// A response carrying GraphQL `errors` is still `Ok`; only failures to reach the endpoint
    /// or to read its answer are errors.
    async fn execute(&self, document: &str, variables: Value) -> Result<Response, GraphQLError>;
}

/// A GraphQL response, which may hold partial data and errors at the same time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ResponseError>>,
}

/// A single entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl Response {
    /// True when the response has errors and nothing else to show for it
    pub fn is_error(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
            && self.data.as_ref().is_none_or(Value::is_null)
    }

    /// Decode `data` into a typed value, treating an errors-only response as a failure
    pub(crate) fn into_data<T: DeserializeOwned>(self) -> Result<T, GraphQLError> {
        match self.data {
            Some(data) if !data.is_null() => {
                serde_json::from_value(data).map_err(GraphQLError::Decode)
            }
            _ => match self.errors {
                Some(errors) if !errors.is_empty() => Err(GraphQLError::Remote(
                    errors.into_iter().map(|error| error.message).collect(),
                )),
                _ => Err(GraphQLError::MissingData),
            },
        }
    }
}
