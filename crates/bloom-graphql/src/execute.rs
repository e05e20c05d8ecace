//! Execute ad hoc GraphQL operations

use apollo_compiler::ast::Definition;
use apollo_compiler::parser::Parser;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{GraphQLError, GraphQLTransport, Response};

/// Normalize tool-supplied variables into a JSON object.
///
/// Agents send variables either as an object or as a string holding JSON, so both are
/// accepted. Missing or null variables become an empty object.
pub fn parse_variables(variables: Option<Value>) -> Result<Value, GraphQLError> {
    match variables {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(Value::String(variables)) if variables.trim().is_empty() => {
            Ok(Value::Object(Map::new()))
        }
        Some(Value::String(variables)) => serde_json::from_str::<Map<String, Value>>(&variables)
            .map(Value::Object)
            .map_err(GraphQLError::Variables),
        Some(Value::Object(variables)) => Ok(Value::Object(variables)),
        Some(other) => Err(GraphQLError::Variables(serde::de::Error::custom(format!(
            "expected a JSON object but got {other}"
        )))),
    }
}

/// Check that `document` holds exactly one operation
fn check_document(document: &str) -> Result<(), GraphQLError> {
    let document = Parser::new()
        .parse_ast(document, "operation.graphql")
        .map_err(|e| GraphQLError::Document(Box::new(e)))?;

    match document
        .definitions
        .iter()
        .filter(|definition| matches!(definition, Definition::OperationDefinition(_)))
        .count()
    {
        0 => Err(GraphQLError::NoOperations),
        1 => Ok(()),
        count => Err(GraphQLError::TooManyOperations(count)),
    }
}

/// Send a query or mutation to the remote endpoint as-is.
///
/// The document and variables are checked locally first, so malformed input never reaches the
/// network. The response is returned whole: partial data and errors travel together.
pub async fn execute_operation(
    transport: &dyn GraphQLTransport,
    document: &str,
    variables: Option<Value>,
) -> Result<Response, GraphQLError> {
    let variables = parse_variables(variables)?;
    check_document(document)?;

    debug!("Executing operation:\n{document}");
    transport.execute(document, variables).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ResponseError;
    use crate::introspection::tests::FakeTransport;

    #[test]
    fn variables_as_string() {
        assert_eq!(
            parse_variables(Some(json!("{\"id\": \"123\"}"))).unwrap(),
            json!({ "id": "123" })
        );
    }

    #[test]
    fn variables_as_json() {
        assert_eq!(
            parse_variables(Some(json!({ "id": "123" }))).unwrap(),
            json!({ "id": "123" })
        );
    }

    #[test]
    fn missing_variables_are_empty() {
        assert_eq!(parse_variables(None).unwrap(), json!({}));
        assert_eq!(parse_variables(Some(Value::Null)).unwrap(), json!({}));
        assert_eq!(parse_variables(Some(json!("  "))).unwrap(), json!({}));
    }

    #[test]
    fn non_object_variables_are_rejected() {
        assert!(matches!(
            parse_variables(Some(json!([1, 2]))),
            Err(GraphQLError::Variables(_))
        ));
        assert!(matches!(
            parse_variables(Some(json!("[1, 2]"))),
            Err(GraphQLError::Variables(_))
        ));
    }

    #[tokio::test]
    async fn malformed_variables_never_reach_the_network() {
        let transport = FakeTransport::new(json!({ "data": {} }));

        let error = execute_operation(&transport, "{ ping }", Some(json!("{not json")))
            .await
            .unwrap_err();

        assert!(error.to_string().contains("parsing"));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_documents_never_reach_the_network() {
        let transport = FakeTransport::new(json!({ "data": {} }));

        let error = execute_operation(&transport, "query Broken {{ ping }", None)
            .await
            .unwrap_err();

        assert!(matches!(error, GraphQLError::Document(_)));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn documents_need_exactly_one_operation() {
        let transport = FakeTransport::new(json!({ "data": {} }));

        assert!(matches!(
            execute_operation(&transport, "fragment F on User { id }", None).await,
            Err(GraphQLError::NoOperations)
        ));
        assert!(matches!(
            execute_operation(&transport, "query A { a } query B { b }", None).await,
            Err(GraphQLError::TooManyOperations(2))
        ));
    }

    #[tokio::test]
    async fn queries_and_mutations_are_both_sent() {
        let transport = FakeTransport::new(json!({ "data": { "ok": true } }));

        execute_operation(&transport, "query Q($id: ID!) { user(id: $id) { id } }", Some(json!({ "id": "1" })))
            .await
            .unwrap();
        execute_operation(&transport, "mutation M { archive }", None)
            .await
            .unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].1, json!({ "id": "1" }));
        assert_eq!(requests[1].0, "mutation M { archive }");
        assert_eq!(requests[1].1, json!({}));
    }

    #[tokio::test]
    async fn partial_data_and_errors_are_both_returned() {
        let transport = FakeTransport::new(json!({
            "data": { "todos": [{ "id": "1" }], "issues": null },
            "errors": [{ "message": "issues unavailable", "path": ["issues"] }]
        }));

        let response = execute_operation(&transport, "{ todos { id } issues { id } }", None)
            .await
            .unwrap();

        assert_eq!(
            response.data,
            Some(json!({ "todos": [{ "id": "1" }], "issues": null }))
        );
        assert_eq!(
            response.errors,
            Some(vec![ResponseError {
                message: "issues unavailable".to_string(),
                path: Some(vec![json!("issues")]),
                locations: None,
                extensions: None,
            }])
        );
    }
}
