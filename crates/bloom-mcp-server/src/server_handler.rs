//! The MCP server handler, routing tool, resource and prompt requests

use std::sync::Arc;

use bloom_graphql::GraphQLTransport;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, GetPromptRequestParam, GetPromptResult,
    Implementation, JsonObject, ListPromptsResult, ListResourcesResult, ListToolsResult,
    PaginatedRequestParam, ReadResourceRequestParam, ReadResourceResult, ServerCapabilities,
    ServerInfo, Tool,
};
use rmcp::serde_json::Value;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler, serde_json};
use tracing::debug;

use crate::errors::McpError;
use crate::prompts::Prompts;
use crate::resources::OperationResources;
use crate::server::RootTypes;
use crate::tools::details::{
    GET_MUTATION_DETAILS_TOOL_NAME, GET_QUERY_DETAILS_TOOL_NAME, MutationDetailsInput,
    OperationDetails, QueryDetailsInput,
};
use crate::tools::execute::{EXECUTE_QUERY_TOOL_NAME, Execute};
use crate::tools::user::{AuthenticatedUser, GET_AUTHENTICATED_USER_ID_TOOL_NAME};

const INSTRUCTIONS: &str = "This server gives access to the Bloom Growth GraphQL API. \
Read the `bloom://queries` and `bloom://mutations` resources to find operations, \
describe them with `get_query_details` or `get_mutation_details`, \
then run them with `execute_query`.";

#[derive(Clone)]
pub struct BloomMcpServerHandler {
    resources: OperationResources,
    query_details: OperationDetails,
    mutation_details: OperationDetails,
    execute_tool: Execute,
    user_tool: AuthenticatedUser,
    prompts: Prompts,
}

impl BloomMcpServerHandler {
    pub fn new(client: Arc<dyn GraphQLTransport>, root_types: &RootTypes) -> Self {
        Self {
            resources: OperationResources::new(client.clone()),
            query_details: OperationDetails::queries(client.clone(), &root_types.query),
            mutation_details: OperationDetails::mutations(client.clone(), &root_types.mutation),
            execute_tool: Execute::new(client.clone()),
            user_tool: AuthenticatedUser::new(client),
            prompts: Prompts,
        }
    }

    pub(crate) fn tools(&self) -> Vec<Tool> {
        vec![
            self.query_details.tool.clone(),
            self.mutation_details.tool.clone(),
            self.execute_tool.tool.clone(),
            self.user_tool.tool.clone(),
        ]
    }

    pub(crate) async fn dispatch_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = name, "Calling tool");
        match name {
            GET_QUERY_DETAILS_TOOL_NAME => {
                let input: QueryDetailsInput = convert_arguments(arguments)?;
                self.query_details.execute(&input.query_names).await
            }
            GET_MUTATION_DETAILS_TOOL_NAME => {
                let input: MutationDetailsInput = convert_arguments(arguments)?;
                self.mutation_details.execute(&input.mutation_names).await
            }
            EXECUTE_QUERY_TOOL_NAME => {
                self.execute_tool
                    .execute(convert_arguments(arguments)?)
                    .await
            }
            GET_AUTHENTICATED_USER_ID_TOOL_NAME => self.user_tool.execute().await,
            _ => Err(tool_not_found(name)),
        }
    }
}

impl ServerHandler for BloomMcpServerHandler {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch_tool(request.name.as_ref(), request.arguments)
            .await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools(),
        })
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            next_cursor: None,
            resources: self.resources.list(),
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.resources.read(&request.uri).await
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            next_cursor: None,
            prompts: self.prompts.list(),
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.prompts.get(&request.name, request.arguments)
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "Bloom MCP Server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

fn tool_not_found(name: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("Tool {name} not found"),
        None,
    )
}

fn convert_arguments<T: serde::de::DeserializeOwned>(
    arguments: Option<JsonObject>,
) -> Result<T, McpError> {
    serde_json::from_value(Value::from(arguments))
        .map_err(|_| McpError::new(ErrorCode::INVALID_PARAMS, "Invalid input".to_string(), None))
}

#[cfg(test)]
mod tests {
    use rmcp::model::RawContent;
    use serde_json::json;

    use super::*;
    use crate::testing::FakeTransport;

    fn handler(transport: Arc<FakeTransport>) -> BloomMcpServerHandler {
        BloomMcpServerHandler::new(transport, &RootTypes::default())
    }

    fn arguments(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    fn text(result: &CallToolResult) -> &str {
        match result.content.first().map(|content| &content.raw) {
            Some(RawContent::Text(text)) => &text.text,
            _ => panic!("expected text content: {result:?}"),
        }
    }

    #[test]
    fn it_lists_every_tool() {
        let handler = handler(Arc::new(FakeTransport::new(json!({}))));

        let names: Vec<_> = handler
            .tools()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "get_query_details",
                "get_mutation_details",
                "execute_query",
                "get_authenticated_user_id"
            ]
        );
    }

    #[tokio::test]
    async fn details_use_the_configured_root_type() {
        let transport = Arc::new(FakeTransport::new(json!({
            "data": { "__type": { "fields": [] } }
        })));
        let handler = BloomMcpServerHandler::new(
            transport.clone(),
            &RootTypes {
                query: "Query".to_string(),
                mutation: "Mutation".to_string(),
            },
        );

        let result = handler
            .dispatch_tool(
                GET_MUTATION_DETAILS_TOOL_NAME,
                arguments(json!({ "mutation_names": "createTodo" })),
            )
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            transport.requests.lock().unwrap()[0].1,
            json!({ "typeName": "Mutation" })
        );
    }

    #[tokio::test]
    async fn execute_passes_variables_through() {
        let transport = Arc::new(FakeTransport::new(json!({ "data": { "todo": { "id": "7" } } })));
        let handler = handler(transport.clone());

        let result = handler
            .dispatch_tool(
                EXECUTE_QUERY_TOOL_NAME,
                arguments(json!({
                    "query": "query Todo($id: ID!) { todo(id: $id) { id } }",
                    "variables": { "id": "7" }
                })),
            )
            .await
            .unwrap();

        insta::assert_snapshot!(text(&result), @r#"{"data":{"todo":{"id":"7"}}}"#);
        assert_eq!(
            transport.requests.lock().unwrap()[0].1,
            json!({ "id": "7" })
        );
    }

    #[tokio::test]
    async fn the_user_tool_needs_no_arguments() {
        let handler = handler(Arc::new(FakeTransport::new(
            json!({ "data": { "getAuthenticatedUserId": "u-1" } }),
        )));

        let result = handler
            .dispatch_tool(GET_AUTHENTICATED_USER_ID_TOOL_NAME, None)
            .await
            .unwrap();

        assert_eq!(text(&result), "u-1");
    }

    #[tokio::test]
    async fn invalid_arguments_are_rejected() {
        let transport = Arc::new(FakeTransport::new(json!({})));
        let handler = handler(transport.clone());

        let error = handler
            .dispatch_tool(GET_QUERY_DETAILS_TOOL_NAME, arguments(json!({ "names": "me" })))
            .await
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(error.message, "Invalid input");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn unknown_tools_are_not_found() {
        let handler = handler(Arc::new(FakeTransport::new(json!({}))));

        let error = handler
            .dispatch_tool("execute_mutation", None)
            .await
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::METHOD_NOT_FOUND);
    }

    #[test]
    fn it_advertises_tools_resources_and_prompts() {
        let info = handler(Arc::new(FakeTransport::new(json!({})))).get_info();

        assert_eq!(info.server_info.name, "Bloom MCP Server");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
    }
}
