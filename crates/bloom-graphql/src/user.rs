//! Lookup of the user behind the API token

use serde_json::{Map, Value};

use crate::{GraphQLError, GraphQLTransport};

/// Resolves the user that owns the API token. Bloom exposes this as a mutation.
const AUTHENTICATED_USER_ID_DOCUMENT: &str = r#"
mutation GetAuthenticatedUserId {
  getAuthenticatedUserId
}
"#;

/// Get the id of the user the configured token belongs to, if any
pub async fn authenticated_user_id(
    transport: &dyn GraphQLTransport,
) -> Result<Option<String>, GraphQLError> {
    let data: Map<String, Value> = transport
        .execute(AUTHENTICATED_USER_ID_DOCUMENT, Value::Object(Map::new()))
        .await?
        .into_data()?;

    Ok(match data.get("getAuthenticatedUserId") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}
