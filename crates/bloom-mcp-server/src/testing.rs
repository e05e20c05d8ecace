//! Test doubles

use std::sync::Mutex;

use async_trait::async_trait;
use bloom_graphql::{GraphQLError, GraphQLTransport, Response};
use serde_json::Value;

/// A transport that replays canned responses, one per request, and records what was sent
pub(crate) struct FakeTransport {
    responses: Mutex<Vec<Result<Value, String>>>,
    pub(crate) requests: Mutex<Vec<(String, Value)>>,
}

impl FakeTransport {
    /// Answer every request with `response`
    pub(crate) fn new(response: Value) -> Self {
        Self::with_responses(vec![Ok(response)])
    }

    /// Fail every request as if the endpoint were unreachable
    pub(crate) fn unreachable() -> Self {
        Self::with_responses(vec![Err("connection refused".to_string())])
    }

    /// Answer requests in order, repeating the last response once the rest are used up
    pub(crate) fn with_responses(responses: Vec<Result<Value, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().rev().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphQLTransport for FakeTransport {
    async fn execute(&self, document: &str, variables: Value) -> Result<Response, GraphQLError> {
        self.requests
            .lock()
            .unwrap()
            .push((document.to_string(), variables));

        let mut responses = self.responses.lock().unwrap();
        let response = if responses.len() > 1 {
            responses.pop().unwrap()
        } else {
            responses.last().cloned().unwrap()
        };

        match response {
            Ok(response) => serde_json::from_value(response).map_err(GraphQLError::Decode),
            Err(message) => Err(GraphQLError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: message,
            }),
        }
    }
}
