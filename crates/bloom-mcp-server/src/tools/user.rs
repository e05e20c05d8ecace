use std::sync::Arc;

use bloom_graphql::{GraphQLTransport, authenticated_user_id};
use rmcp::model::{CallToolResult, Content, Tool};
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::Value;
use rmcp::{schemars, serde_json};
use serde::Deserialize;
use tracing::warn;

use crate::errors::McpError;
use crate::schema_from_type;

/// The name of the tool to look up the user behind the API token
pub const GET_AUTHENTICATED_USER_ID_TOOL_NAME: &str = "get_authenticated_user_id";

#[derive(Clone)]
pub struct AuthenticatedUser {
    client: Arc<dyn GraphQLTransport>,
    pub tool: Tool,
}

/// Input for the authenticated user tool, which takes no arguments
#[derive(JsonSchema, Deserialize, Default)]
pub struct Input {}

impl AuthenticatedUser {
    pub fn new(client: Arc<dyn GraphQLTransport>) -> Self {
        Self {
            client,
            tool: Tool::new(
                GET_AUTHENTICATED_USER_ID_TOOL_NAME,
                "Get the id of the Bloom user the API token belongs to. Use it wherever an operation asks for the current user's id.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self) -> Result<CallToolResult, McpError> {
        match authenticated_user_id(self.client.as_ref()).await {
            Ok(id) => Ok(CallToolResult::success(vec![Content::text(
                id.unwrap_or_else(|| "null".to_string()),
            )])),
            Err(error) => {
                warn!(%error, "Failed to get the authenticated user");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error getting authenticated user ID: {error}"
                ))]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::RawContent;
    use serde_json::json;

    use super::*;
    use crate::testing::FakeTransport;

    fn text(result: &CallToolResult) -> &str {
        match result.content.first().map(|content| &content.raw) {
            Some(RawContent::Text(text)) => &text.text,
            _ => panic!("expected text content: {result:?}"),
        }
    }

    #[tokio::test]
    async fn it_returns_the_id() {
        let tool = AuthenticatedUser::new(Arc::new(FakeTransport::new(
            json!({ "data": { "getAuthenticatedUserId": "u-42" } }),
        )));

        let result = tool.execute().await.unwrap();

        assert_eq!(result.is_error, Some(false));
        assert_eq!(text(&result), "u-42");
    }

    #[tokio::test]
    async fn no_user_is_null() {
        let tool = AuthenticatedUser::new(Arc::new(FakeTransport::new(
            json!({ "data": { "getAuthenticatedUserId": null } }),
        )));

        assert_eq!(text(&tool.execute().await.unwrap()), "null");
    }

    #[tokio::test]
    async fn failures_become_text() {
        let tool = AuthenticatedUser::new(Arc::new(FakeTransport::new(
            json!({ "errors": [{ "message": "Invalid token" }] }),
        )));

        let result = tool.execute().await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text(&result),
            "Error getting authenticated user ID: GraphQL errors: Invalid token"
        );
    }

    #[test]
    fn it_takes_no_arguments() {
        let tool = AuthenticatedUser::new(Arc::new(FakeTransport::new(json!({}))));

        assert!(
            tool.tool
                .input_schema
                .get("properties")
                .and_then(Value::as_object)
                .is_none_or(|properties| properties.is_empty())
        );
    }
}
