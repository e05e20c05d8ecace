//! Detailed descriptions of root operations

use apollo_compiler::collections::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    GraphQLError, GraphQLTransport, OperationKind, TypeRef, format_type, generate_example,
};

/// Describes every field of a root type, with arguments unwrapped three levels deep and the
/// return type one level deep
const ROOT_FIELDS_DOCUMENT: &str = r#"
query RootFields($typeName: String!) {
  __type(name: $typeName) {
    fields(includeDeprecated: false) {
      name
      description
      args {
        name
        description
        type {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
        defaultValue
      }
      type {
        kind
        name
        ofType {
          kind
          name
        }
      }
    }
  }
}
"#;

const NO_DESCRIPTION: &str = "No description";

/// An argument of a root field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub required: bool,
    #[serde(rename = "defaultValue")]
    pub default_value: Value,
}

/// Everything an agent needs to call a root field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDetail {
    pub name: String,
    pub description: String,
    pub arguments: Vec<ArgumentDescriptor>,
    pub return_type: String,
    pub example: String,
}

/// The outcome of looking up one requested operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationLookup {
    Found(OperationDetail),
    NotFound(String),
}

#[derive(Deserialize)]
struct TypeData {
    #[serde(rename = "__type")]
    r#type: Option<RootFields>,
}

#[derive(Deserialize)]
struct RootFields {
    #[serde(default)]
    fields: Option<Vec<Field>>,
}

#[derive(Deserialize)]
struct Field {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    args: Vec<Argument>,
    #[serde(default, rename = "type")]
    r#type: Option<TypeRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Argument {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "type")]
    r#type: Option<TypeRef>,
    #[serde(default)]
    default_value: Value,
}

impl Field {
    fn detail(&self, kind: OperationKind) -> OperationDetail {
        let arguments: Vec<ArgumentDescriptor> = self
            .args
            .iter()
            .map(|arg| {
                let r#type = format_type(arg.r#type.as_ref());
                ArgumentDescriptor {
                    name: arg.name.clone(),
                    description: describe(arg.description.as_deref()),
                    required: r#type.ends_with('!'),
                    r#type,
                    default_value: arg.default_value.clone(),
                }
            })
            .collect();

        OperationDetail {
            name: self.name.clone(),
            description: describe(self.description.as_deref()),
            example: generate_example(&self.name, &arguments, kind),
            arguments,
            return_type: format_type(self.r#type.as_ref()),
        }
    }
}

fn describe(description: Option<&str>) -> String {
    description
        .filter(|description| !description.is_empty())
        .unwrap_or(NO_DESCRIPTION)
        .to_string()
}

/// Look up a comma-separated list of root field names on `root_type`.
///
/// The schema is introspected once for the whole batch. Names missing from the schema get a
/// not-found message without affecting the others. Results keep the order of the request.
pub async fn operation_details(
    transport: &dyn GraphQLTransport,
    names: &str,
    kind: OperationKind,
    root_type: &str,
) -> Result<IndexMap<String, OperationLookup>, GraphQLError> {
    let data: TypeData = transport
        .execute(ROOT_FIELDS_DOCUMENT, json!({ "typeName": root_type }))
        .await?
        .into_data()?;
    let fields = data
        .r#type
        .ok_or_else(|| GraphQLError::MissingType(root_type.to_string()))?
        .fields
        .unwrap_or_default();

    let mut details = IndexMap::default();
    for name in names.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        // The first field with a matching name wins
        let lookup = match fields.iter().find(|field| field.name == name) {
            Some(field) => OperationLookup::Found(field.detail(kind)),
            None => OperationLookup::NotFound(format!("{} '{name}' not found", kind.title())),
        };
        details.insert(name.to_string(), lookup);
    }

    debug!(
        "Resolved {} {kind} operation(s) against {root_type}",
        details.len()
    );
    Ok(details)
}

/// Look up operations and render the result as YAML
pub async fn operation_details_yaml(
    transport: &dyn GraphQLTransport,
    names: &str,
    kind: OperationKind,
    root_type: &str,
) -> Result<String, GraphQLError> {
    let details = operation_details(transport, names, kind, root_type).await?;

    let mut document = serde_yaml::Mapping::with_capacity(details.len());
    for (name, lookup) in details {
        document.insert(name.into(), serde_yaml::to_value(lookup)?);
    }
    Ok(serde_yaml::to_string(&document)?)
}
