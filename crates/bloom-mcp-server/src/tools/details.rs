use std::sync::Arc;

use bloom_graphql::introspection::operation_details_yaml;
use bloom_graphql::{GraphQLTransport, OperationKind};
use rmcp::model::{CallToolResult, Content, Tool};
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::Value;
use rmcp::{schemars, serde_json};
use serde::Deserialize;
use tracing::warn;

use crate::errors::McpError;
use crate::schema_from_type;

/// The name of the tool to describe root query fields
pub const GET_QUERY_DETAILS_TOOL_NAME: &str = "get_query_details";

/// The name of the tool to describe root mutation fields
pub const GET_MUTATION_DETAILS_TOOL_NAME: &str = "get_mutation_details";

/// A tool to get arguments, return types and example usage for root fields
#[derive(Clone)]
pub struct OperationDetails {
    client: Arc<dyn GraphQLTransport>,
    kind: OperationKind,
    root_type: String,
    pub tool: Tool,
}

/// Input for the query details tool.
#[derive(JsonSchema, Deserialize)]
pub struct QueryDetailsInput {
    /// Comma-separated list of query names to get details for
    pub query_names: String,
}

/// Input for the mutation details tool.
#[derive(JsonSchema, Deserialize)]
pub struct MutationDetailsInput {
    /// Comma-separated list of mutation names to get details for
    pub mutation_names: String,
}

impl OperationDetails {
    pub fn queries(client: Arc<dyn GraphQLTransport>, root_type: impl Into<String>) -> Self {
        Self {
            client,
            kind: OperationKind::Query,
            root_type: root_type.into(),
            tool: Tool::new(
                GET_QUERY_DETAILS_TOOL_NAME,
                "Get detailed information about specific GraphQL queries, including argument requirements, return types, descriptions and an example query. Read the `bloom://queries` resource to find query names.",
                schema_from_type!(QueryDetailsInput),
            ),
        }
    }

    pub fn mutations(client: Arc<dyn GraphQLTransport>, root_type: impl Into<String>) -> Self {
        Self {
            client,
            kind: OperationKind::Mutation,
            root_type: root_type.into(),
            tool: Tool::new(
                GET_MUTATION_DETAILS_TOOL_NAME,
                "Get detailed information about specific GraphQL mutations, including argument requirements, return types, descriptions and an example mutation. Read the `bloom://mutations` resource to find mutation names.",
                schema_from_type!(MutationDetailsInput),
            ),
        }
    }

    pub async fn execute(&self, names: &str) -> Result<CallToolResult, McpError> {
        match operation_details_yaml(self.client.as_ref(), names, self.kind, &self.root_type).await
        {
            Ok(details) => Ok(CallToolResult::success(vec![Content::text(details)])),
            Err(error) => {
                warn!(%error, kind = %self.kind, "Failed to get operation details");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error getting {} details: {error}",
                    self.kind
                ))]))
            }
        }
    }
}
