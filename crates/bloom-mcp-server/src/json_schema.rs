/// Generate the JSON schema of a tool input type as a JSON object
#[macro_export]
macro_rules! schema_from_type {
    ($type:ty) => {{
        #[allow(clippy::panic)]
        let schema = match serde_json::to_value(schemars::schema_for!($type)) {
            Ok(Value::Object(schema)) => schema,
            _ => panic!("Failed to generate schema for {}", stringify!($type)),
        };
        schema
    }};
}
