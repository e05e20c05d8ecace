//! Schema introspection
//!
//! Fixed introspection documents run against the remote schema to list root operations and
//! describe them in a form an agent can act on.

mod details;

pub use details::{
    ArgumentDescriptor, OperationDetail, OperationLookup, operation_details,
    operation_details_yaml,
};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{GraphQLError, GraphQLTransport, OperationKind};

/// Lists the root query fields
const QUERY_FIELDS_DOCUMENT: &str = r#"
{
  __schema {
    queryType {
      name
      fields {
        name
        description
      }
    }
  }
}
"#;

/// Lists the root mutation fields
const MUTATION_FIELDS_DOCUMENT: &str = r#"
{
  __schema {
    mutationType {
      name
      fields {
        name
        description
      }
    }
  }
}
"#;

#[derive(Deserialize)]
struct SchemaData {
    #[serde(rename = "__schema")]
    schema: RootTypes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RootTypes {
    #[serde(default)]
    query_type: Option<RootType>,
    #[serde(default)]
    mutation_type: Option<RootType>,
}

#[derive(Deserialize)]
struct RootType {
    #[serde(default)]
    fields: Option<Vec<FieldName>>,
}

#[derive(Deserialize)]
struct FieldName {
    name: String,
}

/// List the names of the root fields of the given kind, in schema order.
///
/// A schema without a root type for `kind` has no operations of that kind.
pub async fn list_operations(
    transport: &dyn GraphQLTransport,
    kind: OperationKind,
) -> Result<Vec<String>, GraphQLError> {
    let document = match kind {
        OperationKind::Query => QUERY_FIELDS_DOCUMENT,
        OperationKind::Mutation => MUTATION_FIELDS_DOCUMENT,
    };

    let data: SchemaData = transport
        .execute(document, Value::Object(Default::default()))
        .await?
        .into_data()?;

    let root = match kind {
        OperationKind::Query => data.schema.query_type,
        OperationKind::Mutation => data.schema.mutation_type,
    };
    let names: Vec<String> = root
        .and_then(|root| root.fields)
        .unwrap_or_default()
        .into_iter()
        .map(|field| field.name)
        .collect();

    debug!(
        "Found {} {kind} operations on {}",
        names.len(),
        kind.schema_field()
    );
    Ok(names)
}
