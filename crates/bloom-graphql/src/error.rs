use apollo_compiler::ast::Document;
use apollo_compiler::validation::WithErrors;
use reqwest::StatusCode;

/// An error talking to the remote GraphQL endpoint
#[derive(Debug, thiserror::Error)]
pub enum GraphQLError {
    #[error("No GraphQL endpoint is configured")]
    NoEndpoint,

    #[error("Failed to send GraphQL request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("GraphQL endpoint responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to read GraphQL response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Could not parse GraphQL document: {0}")]
    Document(Box<WithErrors<Document>>),

    #[error("No operations defined")]
    NoOperations,

    #[error("Too many operations. Expected 1 but got {0}")]
    TooManyOperations(usize),

    #[error("Error parsing variables: {0}")]
    Variables(#[source] serde_json::Error),

    #[error("GraphQL errors: {}", .0.join("; "))]
    Remote(Vec<String>),

    #[error("GraphQL response contained no data")]
    MissingData,

    #[error("Type {0} not found in schema")]
    MissingType(String),

    #[error("Failed to serialize operation details: {0}")]
    Serialize(#[from] serde_yaml::Error),
}
