//! Resources listing the root operations of the remote schema

use std::sync::Arc;

use bloom_graphql::introspection::list_operations;
use bloom_graphql::{GraphQLTransport, OperationKind};
use rmcp::model::{
    AnnotateAble, ErrorCode, RawResource, ReadResourceResult, Resource, ResourceContents,
};
use tracing::warn;

use crate::errors::McpError;

/// The resource listing every query name
pub const QUERIES_RESOURCE_URI: &str = "bloom://queries";

/// The resource listing every mutation name
pub const MUTATIONS_RESOURCE_URI: &str = "bloom://mutations";

#[derive(Clone)]
pub struct OperationResources {
    client: Arc<dyn GraphQLTransport>,
}

impl OperationResources {
    pub fn new(client: Arc<dyn GraphQLTransport>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Vec<Resource> {
        vec![
            resource(
                QUERIES_RESOURCE_URI,
                "queries",
                "Comma-separated names of all available GraphQL queries",
            ),
            resource(
                MUTATIONS_RESOURCE_URI,
                "mutations",
                "Comma-separated names of all available GraphQL mutations",
            ),
        ]
    }

    pub async fn read(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let kind = match uri {
            QUERIES_RESOURCE_URI => OperationKind::Query,
            MUTATIONS_RESOURCE_URI => OperationKind::Mutation,
            _ => {
                return Err(McpError::new(
                    ErrorCode::RESOURCE_NOT_FOUND,
                    format!("Resource {uri} not found"),
                    None,
                ));
            }
        };

        let text = match list_operations(self.client.as_ref(), kind).await {
            Ok(names) => names.join(", "),
            Err(error) => {
                warn!(%error, %kind, "Failed to list operations");
                format!("Error listing {kind} operations: {error}")
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

fn resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut raw = RawResource::new(uri, name);
    raw.description = Some(description.to_string());
    raw.mime_type = Some("text/plain".to_string());
    raw.no_annotation()
}
