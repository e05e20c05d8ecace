//! Prompts that walk an agent through building an operation with the server's tools

use bloom_graphql::OperationKind;
use rmcp::model::{
    ErrorCode, GetPromptResult, JsonObject, Prompt, PromptArgument, PromptMessage,
    PromptMessageRole,
};
use rmcp::serde_json::Value;

use crate::errors::McpError;
use crate::resources::{MUTATIONS_RESOURCE_URI, QUERIES_RESOURCE_URI};
use crate::tools::details::{GET_MUTATION_DETAILS_TOOL_NAME, GET_QUERY_DETAILS_TOOL_NAME};
use crate::tools::execute::EXECUTE_QUERY_TOOL_NAME;

pub const BUILD_QUERY_PROMPT_NAME: &str = "build_query";
pub const BUILD_MUTATION_PROMPT_NAME: &str = "build_mutation";

const OPERATION_ARGUMENT: &str = "operation";
const GOAL_ARGUMENT: &str = "goal";

#[derive(Clone, Default)]
pub struct Prompts;

impl Prompts {
    pub fn list(&self) -> Vec<Prompt> {
        vec![
            prompt(
                BUILD_QUERY_PROMPT_NAME,
                "Build and run a GraphQL query against the Bloom API",
                OperationKind::Query,
            ),
            prompt(
                BUILD_MUTATION_PROMPT_NAME,
                "Build and run a GraphQL mutation against the Bloom API",
                OperationKind::Mutation,
            ),
        ]
    }

    pub fn get(&self, name: &str, arguments: Option<JsonObject>) -> Result<GetPromptResult, McpError> {
        let kind = match name {
            BUILD_QUERY_PROMPT_NAME => OperationKind::Query,
            BUILD_MUTATION_PROMPT_NAME => OperationKind::Mutation,
            _ => {
                return Err(McpError::new(
                    ErrorCode::INVALID_PARAMS,
                    format!("Prompt {name} not found"),
                    None,
                ));
            }
        };

        let arguments = arguments.unwrap_or_default();
        let operation = argument(&arguments, OPERATION_ARGUMENT).ok_or_else(|| {
            McpError::new(
                ErrorCode::INVALID_PARAMS,
                format!("Missing required argument: {OPERATION_ARGUMENT}"),
                None,
            )
        })?;
        let goal = argument(&arguments, GOAL_ARGUMENT);

        Ok(GetPromptResult {
            description: Some(format!("Build the {operation} {kind}")),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                scaffold(kind, operation, goal),
            )],
        })
    }
}

fn prompt(name: &str, description: &str, kind: OperationKind) -> Prompt {
    Prompt::new(
        name,
        Some(description),
        Some(vec![
            PromptArgument {
                name: OPERATION_ARGUMENT.to_string(),
                description: Some(format!("Name of the {kind} to build")),
                required: Some(true),
            },
            PromptArgument {
                name: GOAL_ARGUMENT.to_string(),
                description: Some("What the result should be used for".to_string()),
                required: Some(false),
            },
        ]),
    )
}

/// Non-blank string argument, ignoring anything else
fn argument<'a>(arguments: &'a JsonObject, name: &str) -> Option<&'a str> {
    arguments
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn scaffold(kind: OperationKind, operation: &str, goal: Option<&str>) -> String {
    let (details_tool, resource) = match kind {
        OperationKind::Query => (GET_QUERY_DETAILS_TOOL_NAME, QUERIES_RESOURCE_URI),
        OperationKind::Mutation => (GET_MUTATION_DETAILS_TOOL_NAME, MUTATIONS_RESOURCE_URI),
    };

    let mut text = format!("I want to run the `{operation}` {kind} against the Bloom API.\n");
    if let Some(goal) = goal {
        text.push_str(&format!("Goal: {goal}\n"));
    }
    text.push_str(&format!(
        "\n1. Call `{details_tool}` with `{operation}` to learn its arguments and return type. \
         If it is not found, read `{resource}` for the available names.\n\
         2. Start from the example in the details. Replace the `id` placeholder with the fields \
         the goal needs, and supply every required argument.\n\
         3. Run it with `{EXECUTE_QUERY_TOOL_NAME}`, passing arguments as JSON variables.\n"
    ));
    if kind == OperationKind::Mutation {
        text.push_str(
            "\nMutations change data and cannot be undone. Confirm the arguments with the user \
             before running it.\n",
        );
    }
    text
}
