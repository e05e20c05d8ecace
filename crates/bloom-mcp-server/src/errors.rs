use bloom_graphql::GraphQLError;
use tokio::task::JoinError;

/// An error in server initialization
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to create GraphQL client: {0}")]
    Client(#[from] GraphQLError),

    #[error("Server I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start server: {0}")]
    McpInitialize(#[from] Box<rmcp::service::ServerInitializeError<std::io::Error>>),

    #[error("Failed to start server")]
    StartupError(#[from] JoinError),
}

/// An MCP tool error
pub type McpError = rmcp::model::ErrorData;
