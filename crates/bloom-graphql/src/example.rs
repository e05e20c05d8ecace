//! Example operations for root fields

use std::fmt;

use crate::introspection::ArgumentDescriptor;

/// The kind of root operation a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// The kind as a capitalized word, for messages
    pub fn title(&self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
        }
    }

    /// The field on `__schema` holding the root type for this kind
    pub(crate) fn schema_field(&self) -> &'static str {
        match self {
            OperationKind::Query => "queryType",
            OperationKind::Mutation => "mutationType",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        })
    }
}

/// Generate a template operation that calls the root field `name` with all of its arguments
/// bound to variables.
pub fn generate_example(name: &str, args: &[ArgumentDescriptor], kind: OperationKind) -> String {
    let (variables, arguments) = if args.is_empty() {
        (String::new(), String::new())
    } else {
        (
            format!(
                "({})",
                args.iter()
                    .map(|arg| format!("${}: {}", arg.name, arg.r#type))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            format!(
                "({})",
                args.iter()
                    .map(|arg| format!("{}: ${}", arg.name, arg.name))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )
    };

    format!(
        "{kind} {}{variables} {{\n  {name}{arguments} {{\n    # Include fields you want to retrieve\n    id\n    # Add more fields as needed\n  }}\n}}",
        capitalize(name)
    )
}

/// Upper-case the first character and lower-case the rest
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
