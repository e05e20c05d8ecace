pub mod errors;
pub mod json_schema;
mod prompts;
mod resources;
pub mod server;
mod server_handler;
mod tools;
#[cfg(test)]
mod testing;
