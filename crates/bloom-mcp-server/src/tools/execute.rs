use std::sync::Arc;

use bloom_graphql::{GraphQLTransport, execute_operation};
use rmcp::model::{CallToolResult, Content, Tool};
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::Value;
use rmcp::{schemars, serde_json};
use serde::Deserialize;
use tracing::warn;

use crate::errors::McpError;
use crate::schema_from_type;

/// The name of the tool to execute an ad hoc GraphQL operation
pub const EXECUTE_QUERY_TOOL_NAME: &str = "execute_query";

#[derive(Clone)]
pub struct Execute {
    client: Arc<dyn GraphQLTransport>,
    pub tool: Tool,
}

/// Input for the execute tool.
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// The GraphQL query or mutation
    pub query: String,

    /// The variable values represented as JSON
    #[schemars(schema_with = "String::json_schema", default)]
    pub variables: Option<Value>,
}

impl Execute {
    pub fn new(client: Arc<dyn GraphQLTransport>) -> Self {
        Self {
            client,
            tool: Tool::new(
                EXECUTE_QUERY_TOOL_NAME,
                "Execute a GraphQL query or mutation against the Bloom API. Use the `get_query_details` and `get_mutation_details` tools to learn the arguments and return types first, and always build operations from the schema. Mutations change data and cannot be undone.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        let result = execute_operation(self.client.as_ref(), &input.query, input.variables)
            .await
            .and_then(|response| {
                serde_json::to_string(&response)
                    .map(|json| (json, response.is_error()))
                    .map_err(bloom_graphql::GraphQLError::Decode)
            });

        match result {
            Ok((json, is_error)) => Ok(CallToolResult {
                content: vec![Content::text(json)],
                is_error: Some(is_error),
            }),
            Err(error) => {
                warn!(%error, "Failed to execute operation");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error executing query: {error}"
                ))]))
            }
        }
    }
}
